use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;

use super::routes::AppState;
use crate::errors::GymResult;
use crate::models::{CheckinEvent, CreateCheckin};

pub fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_checkins).post(create_checkin))
        .route("/:id", get(list_member_checkins))
        .route("/:id/checkout", post(checkout))
}

/// Record a member entering the gym now
pub async fn create_checkin(
    State(state): State<AppState>,
    Json(payload): Json<CreateCheckin>,
) -> GymResult<Json<CheckinEvent>> {
    let checkin = state
        .checkin_service
        .check_in(payload.member_id, Utc::now())
        .await?;
    Ok(Json(checkin))
}

/// Record the exit of an open visit
pub async fn checkout(
    State(state): State<AppState>,
    Path(checkin_id): Path<i64>,
) -> GymResult<Json<CheckinEvent>> {
    let checkin = state.checkin_service.check_out(checkin_id, Utc::now()).await?;
    Ok(Json(checkin))
}

pub async fn list_checkins(State(state): State<AppState>) -> GymResult<Json<Vec<CheckinEvent>>> {
    let checkins = state.checkin_service.list_checkins().await?;
    Ok(Json(checkins))
}

pub async fn list_member_checkins(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> GymResult<Json<Vec<CheckinEvent>>> {
    let checkins = state.checkin_service.list_member_checkins(member_id).await?;
    Ok(Json(checkins))
}

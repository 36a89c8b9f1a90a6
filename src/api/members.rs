use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use super::routes::AppState;
use crate::errors::GymResult;
use crate::models::{CreateMember, Member, MemberMetricsResponse};

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:member_id", get(get_member))
        .route("/:member_id/metrics", get(get_member_metrics))
}

/// Register a new member
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateMember>,
) -> GymResult<Json<Member>> {
    let member = state.member_service.create_member(payload).await?;
    Ok(Json(member))
}

pub async fn list_members(State(state): State<AppState>) -> GymResult<Json<Vec<Member>>> {
    let members = state.member_service.list_members().await?;
    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> GymResult<Json<Member>> {
    let member = state.member_service.get_member(member_id).await?;
    Ok(Json(member))
}

/// Current churn features for a member, e.g. for exporting training rows
pub async fn get_member_metrics(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> GymResult<Json<MemberMetricsResponse>> {
    let now = Utc::now();
    let metrics = state.churn_service.member_metrics(member_id, now).await?;

    Ok(Json(MemberMetricsResponse {
        member_id,
        metrics,
        calculated_at: now,
    }))
}

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use super::routes::AppState;
use crate::errors::GymResult;
use crate::models::ChurnPrediction;

pub fn churn_routes() -> Router<AppState> {
    Router::new().route("/:member_id", get(predict_churn))
}

/// Probability that the member's enrollment gets cancelled
pub async fn predict_churn(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> GymResult<Json<ChurnPrediction>> {
    let prediction = state.churn_service.predict(member_id, Utc::now()).await?;
    Ok(Json(prediction))
}

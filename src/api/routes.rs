use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::checkins::checkin_routes;
use super::churn::churn_routes;
use super::health::health_check;
use super::members::member_routes;
use crate::services::{ChurnClassifier, ChurnPredictionService, CheckinService, MemberService};
use crate::storage::{CheckinStore, MemberStore};

#[derive(Clone)]
pub struct AppState {
    pub member_service: MemberService,
    pub checkin_service: CheckinService,
    pub churn_service: ChurnPredictionService,
}

impl AppState {
    /// Wire services over the given stores. The classifier is shared
    /// read-only by every request.
    pub fn new(
        members: Arc<dyn MemberStore>,
        checkins: Arc<dyn CheckinStore>,
        classifier: Arc<dyn ChurnClassifier>,
    ) -> Self {
        Self {
            member_service: MemberService::new(members.clone()),
            checkin_service: CheckinService::new(members.clone(), checkins.clone()),
            churn_service: ChurnPredictionService::new(members, checkins, classifier),
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/members", member_routes())
        .nest("/checkins", checkin_routes())
        .nest("/churn", churn_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

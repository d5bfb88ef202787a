pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::metrics;
use crate::scheduling::handlers as scheduling;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening
        .route("/api/v1/roles", get(screening::handle_list_roles))
        .route("/api/v1/screenings", post(screening::handle_screening))
        // Interview scheduling
        .route(
            "/api/v1/interviews/slots",
            get(scheduling::handle_list_slots),
        )
        .route(
            "/api/v1/interviews",
            post(scheduling::handle_book_interview).get(scheduling::handle_list_interviews),
        )
        // Metrics
        .route("/api/v1/metrics", get(metrics::handle_get_metrics))
        .route("/api/v1/metrics/reset", post(metrics::handle_reset_metrics))
        .with_state(state)
}

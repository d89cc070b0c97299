use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/record", post(handlers::record))
        .route("/api/record", post(handlers::api_record))
        .route("/api/daily", get(handlers::get_daily))
        .route("/export.csv", get(handlers::export_csv))
        .with_state(state)
}

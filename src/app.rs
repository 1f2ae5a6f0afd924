use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/day", post(handlers::save_day_form))
        .route("/export.csv", get(handlers::export_csv))
        .route("/api/records", get(handlers::list_records).post(handlers::save_record))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}

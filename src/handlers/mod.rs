pub mod admin;
pub mod booking;
pub mod guard;
pub mod health;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::models::FieldErrors;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/services", get(booking::list_services))
        .route("/api/booking", post(booking::create_booking))
        .route("/api/booking/slots", get(booking::list_slots))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/admin", get(admin::dashboard))
        .route(
            "/api/admin/content",
            get(admin::get_content).post(admin::update_content),
        )
        .route("/api/admin/bookings", get(admin::list_bookings))
        .route("/api/admin/bookings/:id", get(admin::get_booking))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            guard::require_admission,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) fn decode_body<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.push("body", format!("Malformed request: {e}"));
        AppError::Validation(errors)
    })
}

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::decode_body;
use crate::errors::AppError;
use crate::models::{BookingRequest, Service};
use crate::services::booking;
use crate::state::AppState;

// POST /api/booking
#[derive(Serialize)]
pub struct CreatedResponse {
    success: bool,
    id: String,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CreatedResponse>, AppError> {
    let request: BookingRequest = decode_body(body)?;
    let booking = booking::submit_booking(&state, request).await?;
    Ok(Json(CreatedResponse {
        success: true,
        id: booking.id,
    }))
}

// GET /api/booking/slots?date=
#[derive(Deserialize)]
pub struct SlotsQuery {
    #[serde(default)]
    pub date: String,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    date: String,
    slots: Vec<String>,
}

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Json<SlotsResponse> {
    let slots = state.bookings.available_slots(&query.date);
    Json(SlotsResponse {
        date: query.date,
        slots,
    })
}

// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.content.read().services)
}

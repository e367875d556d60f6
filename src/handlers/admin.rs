use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;

use super::decode_body;
use super::guard::LOGIN_PATH;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, ContentPatch, FieldErrors, SiteContent};
use crate::services::admission;
use crate::state::AppState;

static LOGIN_HTML: &str = include_str!("../web/login.html");
static ADMIN_HTML: &str = include_str!("../web/admin.html");

fn render_login(error: Option<&str>) -> Html<String> {
    let notice = error
        .map(|e| format!(r#"<p class="error">{e}</p>"#))
        .unwrap_or_default();
    Html(LOGIN_HTML.replace("{{error}}", &notice))
}

// GET /admin/login
pub async fn login_page() -> Html<String> {
    render_login(None)
}

// POST /admin/login
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub code: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let expected = &state.config.admin_access_code;
    if !admission::access_code_matches(expected, &form.code) {
        tracing::warn!("rejected admin login");
        return Ok((StatusCode::UNAUTHORIZED, render_login(Some("Invalid access code"))).into_response());
    }

    let token = admission::issue_token(expected, Utc::now())
        .ok_or_else(|| AppError::Config("cannot sign admission token".to_string()))?;
    let cookie = admission::admission_cookie(&token, state.config.secure_cookies);

    tracing::info!("admin logged in");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/admin"),
    )
        .into_response())
}

// POST /admin/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    let cookie = admission::clearing_cookie(state.config.secure_cookies);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

// GET /admin
pub async fn dashboard() -> Html<&'static str> {
    Html(ADMIN_HTML)
}

// GET /api/admin/content
pub async fn get_content(State(state): State<Arc<AppState>>) -> Json<SiteContent> {
    Json(state.content.read())
}

// POST /api/admin/content
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SiteContent>, AppError> {
    let patch: ContentPatch = decode_body(body)?;
    let content = state.content.write(patch)?;
    Ok(Json(content))
}

// GET /api/admin/bookings?status=
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
}

fn status_filter(raw: Option<&str>) -> Result<Option<BookingStatus>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s @ ("pending" | "confirmed" | "cancelled")) => Ok(Some(BookingStatus::parse(s))),
        Some(other) => {
            let mut errors = FieldErrors::new();
            errors.push("status", format!("Unknown status '{other}'"));
            Err(errors.into())
        }
    }
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let status = status_filter(query.status.as_deref())?;
    Ok(Json(state.bookings.list_by_status(status)))
}

// GET /api/admin/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    state
        .bookings
        .get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use crate::errors::AppError;
use crate::services::admission;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";

enum Protection {
    Open,
    Page,
    Api,
}

fn protection(path: &str) -> Protection {
    if path == LOGIN_PATH {
        Protection::Open
    } else if path == "/admin" || path.starts_with("/admin/") {
        Protection::Page
    } else if path == "/api/admin" || path.starts_with("/api/admin/") {
        Protection::Api
    } else {
        Protection::Open
    }
}

pub async fn require_admission(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let kind = protection(request.uri().path());
    if matches!(kind, Protection::Open) {
        return next.run(request).await;
    }

    let admitted = admission::is_admitted(
        request.headers(),
        &state.config.admin_access_code,
        Utc::now(),
    );
    if admitted {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "admin request without admission");
    match kind {
        Protection::Api => AppError::Unauthorized.into_response(),
        _ => Redirect::to(LOGIN_PATH).into_response(),
    }
}

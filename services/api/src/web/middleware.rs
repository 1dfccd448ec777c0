//! services/api/src/web/middleware.rs
//!
//! Session middleware for protecting routes behind the password gate.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::web::state::AppState;

/// Middleware that validates the session cookie against the in-memory store.
///
/// If valid, inserts the session entry into request extensions for handlers
/// to use. If invalid or missing, returns 401 Unauthorized.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract cookie header
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Parse session ID from cookie
    let session_id = cookie_header
        .split(';')
        .find_map(|c| {
            let c = c.trim();
            c.strip_prefix("session=")
        })
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 3. Look the session up in the store
    let entry = state
        .sessions
        .get(session_id)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 4. Insert the session entry into request extensions
    req.extensions_mut().insert(entry);

    // 5. Continue to the handler
    Ok(next.run(req).await)
}

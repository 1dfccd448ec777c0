//! services/api/src/web/auth.rs
//!
//! The shared-password gate. Whoever presents one of the accepted secrets
//! gets a session; there is no notion of identity, lockout, or attempt
//! limit.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub session_id: Uuid,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Check the shared password and open a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted, session cookie set", body = LoginResponse),
        (status = 401, description = "Password incorrect")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // The candidate is compared and then dropped with the request body; it
    // is never written into any session state.
    if !state.config.accepted_passwords.contains(&req.password) {
        return Err((StatusCode::UNAUTHORIZED, "Password incorrect".to_string()));
    }

    let (session_id, _entry) = state.sessions.create();
    info!("Session {} opened.", session_id);

    let cookie = format!("session={}; HttpOnly; SameSite=Lax; Path=/", session_id);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { session_id }),
    ))
}

/// POST /auth/logout - Tear the session down.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session removed"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    let session_id = cookie_header
        .split(';')
        .find_map(|c| {
            let c = c.trim();
            c.strip_prefix("session=")
        })
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    if !state.sessions.remove(session_id) {
        return Err((StatusCode::UNAUTHORIZED, "No session found".to_string()));
    }
    info!("Session {} closed.", session_id);

    // Clear the cookie on the way out.
    let cookie = "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::scripted_app_state;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn wrong_password_is_rejected_and_can_be_retried() {
        let (state, _assistant) = scripted_app_state(vec![], vec![]);

        let err = login_handler(
            State(state.clone()),
            Json(LoginRequest {
                password: "guess".to_string(),
            }),
        )
        .await
        .err()
        .expect("wrong password should be rejected");
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "Password incorrect");

        // A later attempt with an accepted secret still succeeds.
        let response = login_handler(
            State(state),
            Json(LoginRequest {
                password: "open sesame".to_string(),
            }),
        )
        .await
        .expect("correct password should be accepted")
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn logout_removes_the_session() {
        let (state, _assistant) = scripted_app_state(vec![], vec![]);
        let (session_id, _entry) = state.sessions.create();

        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("session={}", session_id).parse().unwrap(),
        );

        logout_handler(State(state.clone()), headers.clone())
            .await
            .expect("logout should succeed");
        assert!(state.sessions.get(session_id).is_none());

        // A second logout with the same cookie finds nothing.
        let err = logout_handler(State(state), headers)
            .await
            .err()
            .expect("stale cookie should be rejected");
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }
}

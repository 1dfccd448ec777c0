//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    auth,
    draft_task::{send_and_await, DraftError, PollPolicy},
    fields::{form_descriptor, FieldSpec, FormDescriptor},
    state::{AppState, SessionEntry, SessionPhase},
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use serde::{Deserialize, Serialize};
use speechwriter_core::domain::RequestFields;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_handler,
        auth::logout_handler,
        get_form_handler,
        submit_speech_handler,
        submit_feedback_handler,
        cancel_handler,
        download_transcript_handler,
        reset_handler,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            SpeechRequest,
            FeedbackRequest,
            DraftResponse,
            ErrorResponse,
            FormDescriptor,
            FieldSpec,
        )
    ),
    tags(
        (name = "SpeechWriter API", description = "API endpoints for the assisted speech-drafting form.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// The submitted request form. The three required fields are validated
/// server-side; the optional ones default to empty.
#[derive(Deserialize, ToSchema)]
pub struct SpeechRequest {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub speech_length: String,
    #[serde(default)]
    pub speech_audience: String,
    #[serde(default)]
    pub project_info: String,
    #[serde(default)]
    pub speaker_background: String,
    #[serde(default)]
    pub tone_style: String,
    #[serde(default)]
    pub quote_reference: String,
}

impl From<SpeechRequest> for RequestFields {
    fn from(req: SpeechRequest) -> Self {
        RequestFields {
            event_name: req.event_name,
            speech_length: req.speech_length,
            speech_audience: req.speech_audience,
            project_info: req.project_info,
            speaker_background: req.speaker_background,
            tone_style: req.tone_style,
            quote_reference: req.quote_reference,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}

/// The latest draft returned by the assistant.
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponse {
    pub draft: String,
}

/// One or more user-visible error banners.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn banner(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            errors: vec![message.into()],
        }),
    )
}

/// Maps a drafting failure onto a response. A non-`completed` run status is
/// surfaced verbatim in place of a draft.
fn draft_failure(err: DraftError) -> HandlerError {
    let status = match &err {
        DraftError::Port(_) | DraftError::RunEnded(_) => StatusCode::BAD_GATEWAY,
        DraftError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
        DraftError::Cancelled => StatusCode::CONFLICT,
    };
    banner(status, err.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Describe the request form (labels, placeholders, inline help).
#[utoipa::path(
    get,
    path = "/form",
    responses(
        (status = 200, description = "The form field catalog", body = FormDescriptor),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_form_handler() -> Json<FormDescriptor> {
    Json(form_descriptor())
}

/// Submit the request form and block until the first draft is ready.
///
/// This is the only place a conversation thread is created: one per session,
/// replaced on the next submission after a reset.
#[utoipa::path(
    post,
    path = "/speech",
    request_body = SpeechRequest,
    responses(
        (status = 200, description = "The first draft", body = DraftResponse),
        (status = 401, description = "Not logged in"),
        (status = 409, description = "Session is already revising a draft", body = ErrorResponse),
        (status = 422, description = "A required field is missing", body = ErrorResponse),
        (status = 502, description = "The assistant run did not complete", body = ErrorResponse)
    )
)]
pub async fn submit_speech_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(entry): Extension<Arc<SessionEntry>>,
    Json(req): Json<SpeechRequest>,
) -> Result<Json<DraftResponse>, HandlerError> {
    let fields: RequestFields = req.into();

    // Every missing required field produces its own banner, and nothing is
    // submitted until all three are present.
    if let Err(missing) = fields.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                errors: missing.iter().map(|m| m.to_string()).collect(),
            }),
        ));
    }

    // The session stays locked for the whole turn; the form cannot be
    // resubmitted while a draft is being produced.
    let mut session = entry.state.lock().await;
    if let SessionPhase::Revising { .. } = session.phase {
        return Err(banner(
            StatusCode::CONFLICT,
            "A draft is already being revised. Reset the session to start over.",
        ));
    }

    let thread_id = app_state.assistant.create_thread().await.map_err(|e| {
        error!("Failed to create a conversation thread: {:?}", e);
        banner(StatusCode::BAD_GATEWAY, e.to_string())
    })?;
    info!("Created thread {} for a new speech request.", thread_id);

    let message = fields.compose_request_message();
    let draft = send_and_await(
        app_state.assistant.as_ref(),
        &thread_id,
        &message,
        PollPolicy::from_config(&app_state.config),
        &entry.begin_call(),
    )
    .await
    .map_err(|e| {
        error!("Drafting on thread {} produced no draft: {}", thread_id, e);
        draft_failure(e)
    })?;

    session.begin_revising(thread_id, &fields, draft.clone());
    Ok(Json(DraftResponse { draft }))
}

/// Submit feedback on the current draft and block until the revision is ready.
#[utoipa::path(
    post,
    path = "/speech/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "The revised draft", body = DraftResponse),
        (status = 401, description = "Not logged in"),
        (status = 409, description = "There is no draft to revise", body = ErrorResponse),
        (status = 422, description = "The feedback text is empty", body = ErrorResponse),
        (status = 502, description = "The assistant run did not complete", body = ErrorResponse)
    )
)]
pub async fn submit_feedback_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(entry): Extension<Arc<SessionEntry>>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<DraftResponse>, HandlerError> {
    if req.feedback.trim().is_empty() {
        return Err(banner(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter the feedback.",
        ));
    }

    let mut session = entry.state.lock().await;
    let thread_id = match &session.phase {
        SessionPhase::Revising { thread_id, .. } => thread_id.clone(),
        SessionPhase::Gathering => {
            return Err(banner(
                StatusCode::CONFLICT,
                "There is no draft to revise yet. Submit the form first.",
            ));
        }
    };

    // On failure the displayed draft and the history are left untouched.
    let draft = send_and_await(
        app_state.assistant.as_ref(),
        &thread_id,
        &req.feedback,
        PollPolicy::from_config(&app_state.config),
        &entry.begin_call(),
    )
    .await
    .map_err(|e| {
        error!("Revision on thread {} produced no draft: {}", thread_id, e);
        draft_failure(e)
    })?;

    session.apply_revision(&req.feedback, draft.clone());
    Ok(Json(DraftResponse { draft }))
}

/// Abort the assistant call currently in flight for this session.
#[utoipa::path(
    post,
    path = "/speech/cancel",
    responses(
        (status = 202, description = "Cancellation requested"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn cancel_handler(
    Extension(entry): Extension<Arc<SessionEntry>>,
) -> StatusCode {
    entry.cancel_call();
    StatusCode::ACCEPTED
}

/// Download the session history as a plain-text transcript.
///
/// A pure read: entries newest first, joined by blank lines, in a file named
/// with the current time.
#[utoipa::path(
    get,
    path = "/speech/transcript",
    responses(
        (status = 200, description = "The transcript as a text attachment"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn download_transcript_handler(
    Extension(entry): Extension<Arc<SessionEntry>>,
) -> impl IntoResponse {
    let session = entry.state.lock().await;
    let body = session.transcript.render();

    let filename = format!("speech_{}.txt", chrono::Local::now().format("%H%M%S"));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

/// Return the session to the gathering screen.
///
/// The conversation thread and the transcript are not deleted here; the next
/// submission starts a brand-new thread and a fresh history.
#[utoipa::path(
    post,
    path = "/speech/reset",
    responses(
        (status = 204, description = "Session back in gathering mode"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn reset_handler(Extension(entry): Extension<Arc<SessionEntry>>) -> StatusCode {
    let mut session = entry.state.lock().await;
    session.reset();
    StatusCode::NO_CONTENT
}

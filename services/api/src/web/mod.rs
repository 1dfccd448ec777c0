pub mod auth;
pub mod draft_task;
pub mod fields;
pub mod middleware;
pub mod rest;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the pieces the binary needs to build the web server router.
pub use middleware::require_session;
pub use rest::{
    cancel_handler, download_transcript_handler, get_form_handler, reset_handler,
    submit_feedback_handler, submit_speech_handler, ApiDoc,
};

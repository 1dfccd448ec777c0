//! crates/speechwriter_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the external assistant provider.

use async_trait::async_trait;

use crate::domain::AssistantRun;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the external assistant API.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The external conversational assistant, reduced to the five remote calls
/// the application needs. Thread and run ids are opaque strings owned by the
/// provider; conversation memory lives entirely on the provider's side, so
/// prior turns are never re-sent.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Creates a new conversation thread and returns its id.
    async fn create_thread(&self) -> PortResult<String>;

    /// Appends a user message to the thread.
    async fn add_user_message(&self, thread_id: &str, text: &str) -> PortResult<()>;

    /// Starts a run on the thread and returns its id and initial phase.
    async fn start_run(&self, thread_id: &str) -> PortResult<AssistantRun>;

    /// Retrieves the current phase of a run.
    async fn poll_run(&self, thread_id: &str, run_id: &str) -> PortResult<AssistantRun>;

    /// Returns the text of the single most recent message on the thread.
    async fn latest_message(&self, thread_id: &str) -> PortResult<String>;
}

//! services/api/src/adapters/assistant.rs
//!
//! This module contains the adapter for the hosted OpenAI Assistants API.
//! It implements the `AssistantService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::assistants::{
        CreateMessageRequestArgs, CreateRunRequestArgs, CreateThreadRequestArgs, MessageContent,
        MessageRole, RunStatus,
    },
    Client,
};
use async_trait::async_trait;
use speechwriter_core::{
    domain::{AssistantRun, RunPhase},
    ports::{AssistantService, PortError, PortResult},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AssistantService` against the OpenAI
/// Assistants API. Which persona drafts the speeches is fixed by the
/// configured assistant id; this adapter never sends instructions of its own.
#[derive(Clone)]
pub struct OpenAiAssistantAdapter {
    client: Client<OpenAIConfig>,
    assistant_id: String,
}

impl OpenAiAssistantAdapter {
    /// Creates a new `OpenAiAssistantAdapter`.
    pub fn new(client: Client<OpenAIConfig>, assistant_id: String) -> Self {
        Self {
            client,
            assistant_id,
        }
    }
}

/// Maps the provider's run status onto the phases the poll loop understands.
/// Anything terminal other than `completed` keeps its wire label so it can be
/// shown to the user verbatim.
fn phase_from_status(status: RunStatus) -> RunPhase {
    match status {
        RunStatus::Queued => RunPhase::Queued,
        RunStatus::InProgress => RunPhase::InProgress,
        RunStatus::Cancelling => RunPhase::Cancelling,
        RunStatus::Completed => RunPhase::Completed,
        RunStatus::RequiresAction => RunPhase::Ended("requires_action".to_string()),
        RunStatus::Cancelled => RunPhase::Ended("cancelled".to_string()),
        RunStatus::Failed => RunPhase::Ended("failed".to_string()),
        RunStatus::Incomplete => RunPhase::Ended("incomplete".to_string()),
        RunStatus::Expired => RunPhase::Ended("expired".to_string()),
    }
}

//=========================================================================================
// `AssistantService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AssistantService for OpenAiAssistantAdapter {
    /// Creates a new, empty conversation thread.
    async fn create_thread(&self) -> PortResult<String> {
        let request = CreateThreadRequestArgs::default()
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let thread = self
            .client
            .threads()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(thread.id)
    }

    /// Appends one user message to the thread.
    async fn add_user_message(&self, thread_id: &str, text: &str) -> PortResult<()> {
        let request = CreateMessageRequestArgs::default()
            .role(MessageRole::User)
            .content(text.to_string())
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        self.client
            .threads()
            .messages(thread_id)
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(())
    }

    /// Starts a run of the configured assistant on the thread.
    async fn start_run(&self, thread_id: &str) -> PortResult<AssistantRun> {
        let request = CreateRunRequestArgs::default()
            .assistant_id(&self.assistant_id)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let run = self
            .client
            .threads()
            .runs(thread_id)
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(AssistantRun {
            id: run.id,
            phase: phase_from_status(run.status),
        })
    }

    /// Retrieves the current status of a run.
    async fn poll_run(&self, thread_id: &str, run_id: &str) -> PortResult<AssistantRun> {
        let run = self
            .client
            .threads()
            .runs(thread_id)
            .retrieve(run_id)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(AssistantRun {
            id: run.id,
            phase: phase_from_status(run.status),
        })
    }

    /// Fetches the single most recent message on the thread and returns its
    /// text content.
    async fn latest_message(&self, thread_id: &str) -> PortResult<String> {
        let response = self
            .client
            .threads()
            .messages(thread_id)
            .list()
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let message = response.data.into_iter().next().ok_or_else(|| {
            PortError::NotFound(format!("thread {} has no messages", thread_id))
        })?;

        // A message can mix content kinds; the draft is the first text part.
        message
            .content
            .into_iter()
            .find_map(|content| match content {
                MessageContent::Text(text) => Some(text.text.value),
                _ => None,
            })
            .ok_or_else(|| {
                PortError::Unexpected(
                    "The most recent thread message contained no text content.".to_string(),
                )
            })
    }
}

//! services/api/src/web/draft_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! one assistant turn: post the message, start a run, poll it to a terminal
//! status, and fetch the resulting draft.

use crate::config::Config;
use speechwriter_core::{
    domain::RunPhase,
    ports::{AssistantService, PortError},
};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How often to poll a pending run, and how long to keep polling before
/// giving up on it.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            timeout: config.poll_timeout,
        }
    }
}

/// Why an assistant turn produced no draft.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// A remote call failed outright.
    #[error("Assistant call failed: {0}")]
    Port(#[from] PortError),

    /// The run reached a terminal status other than `completed`. The label
    /// is the provider's status, surfaced to the user verbatim.
    #[error("{0}")]
    RunEnded(String),

    /// The run stayed pending past the configured deadline.
    #[error("The assistant did not finish within {}s.", .0.as_secs())]
    TimedOut(Duration),

    /// The user aborted the wait.
    #[error("The request was cancelled.")]
    Cancelled,
}

/// Posts `text` onto the thread, starts a run, and blocks until the run
/// reaches a terminal status. On success, returns the text of the single
/// most recent message on the thread (the new draft).
///
/// Pending statuses are re-polled on a fixed interval. The wait is bounded
/// by the policy's timeout and can be aborted through the cancellation
/// token; both outcomes leave the remote run to its fate.
pub async fn send_and_await(
    assistant: &dyn AssistantService,
    thread_id: &str,
    text: &str,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<String, DraftError> {
    assistant.add_user_message(thread_id, text).await?;

    let mut run = assistant.start_run(thread_id).await?;
    info!("Run {} started on thread {}.", run.id, thread_id);

    let deadline = Instant::now() + policy.timeout;
    while run.phase.is_pending() {
        if Instant::now() >= deadline {
            info!("Run {} still {} at deadline.", run.id, run.phase.label());
            return Err(DraftError::TimedOut(policy.timeout));
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(DraftError::Cancelled),
            _ = sleep(policy.interval) => {}
        }
        run = assistant.poll_run(thread_id, &run.id).await?;
        debug!("Run {} is {}.", run.id, run.phase.label());
    }

    match run.phase {
        RunPhase::Completed => {
            let draft = assistant.latest_message(thread_id).await?;
            info!("Run {} completed.", run.id);
            Ok(draft)
        }
        other => {
            info!("Run {} ended with status {}.", run.id, other.label());
            Err(DraftError::RunEnded(other.label().to_string()))
        }
    }
}

//! services/api/src/web/testing.rs
//!
//! A scripted, in-memory `AssistantService` double for exercising the poll
//! loop and the handlers without the real provider.

use crate::config::Config;
use crate::web::state::{AppState, Sessions};
use async_trait::async_trait;
use speechwriter_core::{
    domain::{AssistantRun, RunPhase},
    ports::{AssistantService, PortError, PortResult},
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;

/// Builds an `AppState` around a scripted assistant. The concrete double is
/// returned alongside so tests can read its counters.
pub fn scripted_app_state(
    phases: Vec<RunPhase>,
    drafts: Vec<&str>,
) -> (Arc<AppState>, Arc<ScriptedAssistant>) {
    let assistant = Arc::new(ScriptedAssistant::new(phases, drafts));
    let config = Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: Level::INFO,
        accepted_passwords: ["open sesame".to_string()].into_iter().collect(),
        openai_api_key: "test-key".to_string(),
        assistant_id: "asst_test".to_string(),
        poll_interval: Duration::from_secs(2),
        poll_timeout: Duration::from_secs(300),
    };
    let state = Arc::new(AppState {
        assistant: assistant.clone(),
        config: Arc::new(config),
        sessions: Sessions::new(),
    });
    (state, assistant)
}

/// Plays back a fixed sequence of run phases and drafts, and counts every
/// remote call so tests can assert on thread creation and poll cadence.
pub struct ScriptedAssistant {
    phases: Mutex<VecDeque<RunPhase>>,
    drafts: Mutex<VecDeque<String>>,
    threads_created: AtomicUsize,
    polls: AtomicUsize,
    latest_message_calls: AtomicUsize,
    messages: Mutex<Vec<(String, String)>>,
}

impl ScriptedAssistant {
    /// `phases` are consumed one per status request (the run start takes the
    /// first); once exhausted, further runs complete immediately. `drafts`
    /// are returned by `latest_message`, one per completed turn.
    pub fn new(phases: Vec<RunPhase>, drafts: Vec<&str>) -> Self {
        Self {
            phases: Mutex::new(phases.into_iter().collect()),
            drafts: Mutex::new(drafts.into_iter().map(str::to_string).collect()),
            threads_created: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
            latest_message_calls: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// An assistant whose runs report `phase` `repeats` times in a row, for
    /// timeout and cancellation tests.
    pub fn stuck_in(phase: RunPhase, repeats: usize) -> Self {
        Self::new(vec![phase; repeats], vec![])
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn latest_message_calls(&self) -> usize {
        self.latest_message_calls.load(Ordering::SeqCst)
    }

    /// Every message posted to the given thread, in order.
    pub fn messages_on(&self, thread_id: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(thread, _)| thread == thread_id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn next_phase(&self) -> RunPhase {
        self.phases
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunPhase::Completed)
    }
}

#[async_trait]
impl AssistantService for ScriptedAssistant {
    async fn create_thread(&self) -> PortResult<String> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("thread-{}", n))
    }

    async fn add_user_message(&self, thread_id: &str, text: &str) -> PortResult<()> {
        self.messages
            .lock()
            .unwrap()
            .push((thread_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn start_run(&self, _thread_id: &str) -> PortResult<AssistantRun> {
        Ok(AssistantRun {
            id: "run-1".to_string(),
            phase: self.next_phase(),
        })
    }

    async fn poll_run(&self, _thread_id: &str, run_id: &str) -> PortResult<AssistantRun> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(AssistantRun {
            id: run_id.to_string(),
            phase: self.next_phase(),
        })
    }

    async fn latest_message(&self, thread_id: &str) -> PortResult<String> {
        self.latest_message_calls.fetch_add(1, Ordering::SeqCst);
        self.drafts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PortError::NotFound(format!("thread {} has no messages", thread_id)))
    }
}

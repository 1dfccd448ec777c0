//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use speechwriter_core::{
    domain::RequestFields, ports::AssistantService, transcript::Transcript,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<dyn AssistantService>,
    pub config: Arc<Config>,
    pub sessions: Sessions,
}

//=========================================================================================
// Sessions (In-Memory Session Store)
//=========================================================================================

/// All live sessions, keyed by the id carried in the session cookie.
///
/// Sessions exist only in memory; they are created on login and destroyed on
/// logout or process exit. Each one owns its own thread id and history, so
/// there is no cross-session state to protect beyond this map.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<Mutex<HashMap<Uuid, Arc<SessionEntry>>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id and entry.
    pub fn create(&self) -> (Uuid, Arc<SessionEntry>) {
        let id = Uuid::new_v4();
        let entry = Arc::new(SessionEntry::new());
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .insert(id, entry.clone());
        (id, entry)
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<SessionEntry>> {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Removes a session; returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .remove(&id)
            .is_some()
    }
}

//=========================================================================================
// SessionEntry (One Logged-In Session)
//=========================================================================================

/// One logged-in session: its mutable state plus the cancellation handle for
/// whatever assistant call is currently in flight.
///
/// The token lives outside the state mutex so a cancel request can reach a
/// poll loop that is holding the session state locked.
pub struct SessionEntry {
    pub state: tokio::sync::Mutex<SessionState>,
    current_call: Mutex<CancellationToken>,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: tokio::sync::Mutex::new(SessionState::new()),
            current_call: Mutex::new(CancellationToken::new()),
        }
    }

    /// Arms a fresh cancellation token for the next assistant call and
    /// returns it. Any token from a previous call is abandoned.
    pub fn begin_call(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self
            .current_call
            .lock()
            .expect("cancellation lock poisoned") = token.clone();
        token
    }

    /// Cancels the assistant call currently in flight, if any.
    pub fn cancel_call(&self) {
        self.current_call
            .lock()
            .expect("cancellation lock poisoned")
            .cancel();
    }
}

//=========================================================================================
// SessionState (The Two-Screen State Machine)
//=========================================================================================

/// The mode of a session. `Revising` carries the conversation thread and the
/// current draft, so a revision without a thread id cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Gathering,
    Revising { thread_id: String, draft: String },
}

/// The state of a single logged-in session.
pub struct SessionState {
    pub phase: SessionPhase,
    pub transcript: Transcript,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Gathering,
            transcript: Transcript::new(),
        }
    }

    /// Switches from Gathering to Revising after the first draft arrives.
    ///
    /// The transcript is replaced, not appended to: any history from before
    /// a reset stops being downloadable once a new submission succeeds.
    pub fn begin_revising(&mut self, thread_id: String, fields: &RequestFields, draft: String) {
        let mut transcript = Transcript::new();
        transcript.record_request(fields, &draft);
        self.transcript = transcript;
        self.phase = SessionPhase::Revising { thread_id, draft };
    }

    /// Records one feedback round and replaces the displayed draft.
    /// Does nothing unless the session is in the Revising phase.
    pub fn apply_revision(&mut self, feedback: &str, new_draft: String) {
        if let SessionPhase::Revising { draft, .. } = &mut self.phase {
            self.transcript.record_revision(feedback, &new_draft);
            *draft = new_draft;
        }
    }

    /// Returns to the Gathering phase. The thread and transcript are left in
    /// place until the next submission replaces them.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Gathering;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> RequestFields {
        RequestFields {
            event_name: "Launch".to_string(),
            speech_length: "5 minutes".to_string(),
            speech_audience: "Staff".to_string(),
            ..RequestFields::default()
        }
    }

    #[test]
    fn begin_revising_switches_phase_and_seeds_transcript() {
        let mut state = SessionState::new();
        assert_eq!(state.phase, SessionPhase::Gathering);

        state.begin_revising("thread-1".to_string(), &fields(), "Draft A".to_string());
        assert_eq!(
            state.phase,
            SessionPhase::Revising {
                thread_id: "thread-1".to_string(),
                draft: "Draft A".to_string(),
            }
        );
        assert!(state.transcript.render().contains("Draft A"));
    }

    #[test]
    fn apply_revision_updates_draft_and_history() {
        let mut state = SessionState::new();
        state.begin_revising("thread-1".to_string(), &fields(), "Draft A".to_string());
        state.apply_revision("shorten it", "Draft B".to_string());

        match &state.phase {
            SessionPhase::Revising { draft, thread_id } => {
                assert_eq!(draft, "Draft B");
                assert_eq!(thread_id, "thread-1");
            }
            other => panic!("expected Revising, got {:?}", other),
        }
        assert!(state.transcript.render().contains("feedback: shorten it"));
    }

    #[test]
    fn reset_returns_to_gathering_and_next_submission_replaces_history() {
        let mut state = SessionState::new();
        state.begin_revising("thread-1".to_string(), &fields(), "Draft A".to_string());
        state.reset();
        assert_eq!(state.phase, SessionPhase::Gathering);
        // The old transcript stays downloadable until a new submission.
        assert!(state.transcript.render().contains("Draft A"));

        state.begin_revising("thread-2".to_string(), &fields(), "Draft X".to_string());
        let rendered = state.transcript.render();
        assert!(rendered.contains("Draft X"));
        assert!(!rendered.contains("Draft A"));
    }

    #[test]
    fn cancel_call_trips_only_the_armed_token() {
        let entry = SessionEntry::new();
        let first = entry.begin_call();
        let second = entry.begin_call();
        entry.cancel_call();
        assert!(!first.is_cancelled());
        assert!(second.is_cancelled());
    }
}

//! crates/speechwriter_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any web framework or serialization format.

/// The structured inputs describing one speech-writing request.
///
/// The first three fields are required; the rest may be left empty.
/// A value is immutable once submitted and only re-collected after a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFields {
    pub event_name: String,
    pub speech_length: String,
    pub speech_audience: String,
    pub project_info: String,
    pub speaker_background: String,
    pub tone_style: String,
    pub quote_reference: String,
}

/// A validation error for a single missing required field.
///
/// Each variant carries its own user-visible message so the form can show
/// one distinct error per missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingField {
    #[error("Please enter the event name.")]
    EventName,
    #[error("Please enter the speech length.")]
    SpeechLength,
    #[error("Please enter a Purpose and Audience description.")]
    SpeechAudience,
}

impl RequestFields {
    /// Checks that the three required fields are non-empty after trimming.
    ///
    /// Returns every missing field at once, so the caller can display all
    /// errors in a single round trip. Optional fields are never checked.
    pub fn validate(&self) -> Result<(), Vec<MissingField>> {
        let mut missing = Vec::new();
        if self.event_name.trim().is_empty() {
            missing.push(MissingField::EventName);
        }
        if self.speech_length.trim().is_empty() {
            missing.push(MissingField::SpeechLength);
        }
        if self.speech_audience.trim().is_empty() {
            missing.push(MissingField::SpeechAudience);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// All seven fields paired with their labels, in submission order.
    pub fn labeled(&self) -> [(&'static str, &str); 7] {
        [
            ("event_name", self.event_name.as_str()),
            ("speech_length", self.speech_length.as_str()),
            ("speech_audience", self.speech_audience.as_str()),
            ("project_info", self.project_info.as_str()),
            ("speaker_background", self.speaker_background.as_str()),
            ("tone_style", self.tone_style.as_str()),
            ("quote_reference", self.quote_reference.as_str()),
        ]
    }

    /// Builds the single prompt message sent as the first turn of a thread:
    /// an instruction line followed by one `#label#: value` line per field.
    /// Empty optional fields are included as empty values.
    pub fn compose_request_message(&self) -> String {
        let mut message =
            String::from("Help me write a speech based on the following parameters:\n");
        for (label, value) in self.labeled() {
            message.push_str(&format!("#{}#: {}\n", label, value));
        }
        message
    }
}

/// The polled status of one assistant run, as the rest of the system sees it.
///
/// The three pending phases keep the poll loop going; `Completed` means a
/// draft is ready; any other terminal status is carried verbatim in `Ended`
/// so it can be surfaced to the user instead of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Queued,
    InProgress,
    Cancelling,
    Completed,
    /// A terminal status other than `completed` (e.g. "failed", "expired").
    Ended(String),
}

impl RunPhase {
    /// Whether the run is still in flight and should be polled again.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunPhase::Queued | RunPhase::InProgress | RunPhase::Cancelling
        )
    }

    /// The wire-level status label for this phase.
    pub fn label(&self) -> &str {
        match self {
            RunPhase::Queued => "queued",
            RunPhase::InProgress => "in_progress",
            RunPhase::Cancelling => "cancelling",
            RunPhase::Completed => "completed",
            RunPhase::Ended(label) => label.as_str(),
        }
    }
}

/// One asynchronous unit of assistant work, identified by an opaque run id.
#[derive(Debug, Clone)]
pub struct AssistantRun {
    pub id: String,
    pub phase: RunPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_only() -> RequestFields {
        RequestFields {
            event_name: "Ribbon Cutting Ceremony".to_string(),
            speech_length: "10 minutes".to_string(),
            speech_audience: "Residents and policymakers".to_string(),
            ..RequestFields::default()
        }
    }

    #[test]
    fn validate_accepts_required_fields_with_optional_ones_empty() {
        assert!(required_only().validate().is_ok());
    }

    #[test]
    fn validate_reports_each_missing_required_field_distinctly() {
        let fields = RequestFields {
            speech_length: "  ".to_string(),
            ..required_only()
        };
        assert_eq!(fields.validate(), Err(vec![MissingField::SpeechLength]));

        let errors = RequestFields::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                MissingField::EventName,
                MissingField::SpeechLength,
                MissingField::SpeechAudience,
            ]
        );
        assert_eq!(errors[0].to_string(), "Please enter the event name.");
    }

    #[test]
    fn compose_request_message_lists_every_field_once() {
        let message = required_only().compose_request_message();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(
            lines[0],
            "Help me write a speech based on the following parameters:"
        );
        assert_eq!(lines[1], "#event_name#: Ribbon Cutting Ceremony");
        // Empty optional fields still appear, with an empty value.
        assert_eq!(lines[4], "#project_info#: ");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn run_phase_pending_and_labels() {
        assert!(RunPhase::Queued.is_pending());
        assert!(RunPhase::InProgress.is_pending());
        assert!(RunPhase::Cancelling.is_pending());
        assert!(!RunPhase::Completed.is_pending());
        assert!(!RunPhase::Ended("failed".to_string()).is_pending());
        assert_eq!(RunPhase::Ended("expired".to_string()).label(), "expired");
    }
}

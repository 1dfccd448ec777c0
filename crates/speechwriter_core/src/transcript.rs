//! crates/speechwriter_core/src/transcript.rs
//!
//! The locally maintained history log of one drafting session: the field
//! dump, every draft, and every round of feedback, in the order they
//! happened. The log only exists to build the downloadable transcript.

use crate::domain::RequestFields;

/// The fixed line bounding each speech/feedback round in the transcript.
pub const ROUND_SEPARATOR: &str = "-----------------------------";

/// An append-only, ordered log of transcript entries.
///
/// Entries are appended in chronological order but rendered most recent
/// first, so the newest draft is at the top of the downloaded file.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records the initial submission: one `label: value` line per field,
    /// then the first draft, bounded by separators.
    pub fn record_request(&mut self, fields: &RequestFields, draft: &str) {
        for (label, value) in fields.labeled() {
            self.entries.push(format!("{}: {}", label, value));
        }
        self.entries.push(ROUND_SEPARATOR.to_string());
        self.entries.push(draft.to_string());
        self.entries.push(ROUND_SEPARATOR.to_string());
    }

    /// Records one revision round: the feedback text and the draft it
    /// produced, bounded by separators.
    pub fn record_revision(&mut self, feedback: &str, draft: &str) {
        self.entries.push(format!("feedback: {}", feedback));
        self.entries.push(ROUND_SEPARATOR.to_string());
        self.entries.push(draft.to_string());
        self.entries.push(ROUND_SEPARATOR.to_string());
    }

    /// Renders the downloadable transcript: entries in reverse-chronological
    /// order, joined by blank lines.
    pub fn render(&self) -> String {
        let mut reversed: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        reversed.reverse();
        reversed.join("\n\n")
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
    fn starts_empty() {
        assert!(Transcript::new().is_empty());
    }

    #[test]
    fn renders_two_revision_rounds_newest_first() {
        let mut transcript = Transcript::new();
        transcript.record_request(&fields(), "Draft A");
        transcript.record_revision("shorten it", "Draft B");
        transcript.record_revision("add a joke", "Draft C");

        let rendered = transcript.render();
        let blocks: Vec<&str> = rendered.split("\n\n").collect();

        // Newest round first: separator, Draft C, separator, its feedback,
        // then the previous round, then the first draft, then the field dump.
        assert_eq!(blocks[0], ROUND_SEPARATOR);
        assert_eq!(blocks[1], "Draft C");
        assert_eq!(blocks[2], ROUND_SEPARATOR);
        assert_eq!(blocks[3], "feedback: add a joke");
        assert_eq!(blocks[4], ROUND_SEPARATOR);
        assert_eq!(blocks[5], "Draft B");
        assert_eq!(blocks[6], ROUND_SEPARATOR);
        assert_eq!(blocks[7], "feedback: shorten it");
        assert_eq!(blocks[8], ROUND_SEPARATOR);
        assert_eq!(blocks[9], "Draft A");
        assert_eq!(blocks[10], ROUND_SEPARATOR);

        // The original field dump closes the file, in reverse field order.
        assert_eq!(blocks[blocks.len() - 1], "event_name: Launch");
        assert!(rendered.find("Draft C").unwrap() < rendered.find("Draft A").unwrap());
    }
}

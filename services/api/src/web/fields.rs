//! services/api/src/web/fields.rs
//!
//! The user-facing form surface: the catalog of labeled input fields (with
//! placeholders and inline help) that the gathering screen renders, plus the
//! feedback field for the revision screen.

use serde::Serialize;
use utoipa::ToSchema;

/// One labeled input field of the request form.
#[derive(Serialize, ToSchema, Clone, Copy)]
pub struct FieldSpec {
    /// The key used for this field when submitting the form.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Inline help shown next to the field.
    pub help: &'static str,
    pub required: bool,
    /// Whether the field renders as a multi-line text area.
    pub multiline: bool,
}

/// Everything a client needs to render the gathering and revision screens.
#[derive(Serialize, ToSchema)]
pub struct FormDescriptor {
    pub title: &'static str,
    pub intro: &'static str,
    pub fields: Vec<FieldSpec>,
    pub feedback: FieldSpec,
}

/// The fixed form definition. Three required fields, four optional ones.
pub fn form_descriptor() -> FormDescriptor {
    FormDescriptor {
        title: "Speech Writer",
        intro: "Hello! I'm an AI agent trained to help you draft a speech. I hope I am useful \
                for you, but I must admit that I'm not perfect and I make mistakes. So please \
                check the draft I wrote before you use it for any purpose. Please fill out some \
                information below. Include as much detail as possible.",
        fields: vec![
            FieldSpec {
                name: "event_name",
                label: "Name of event:",
                placeholder: "e.g. Ribbon Cutting Ceremony of MetroLink Expansion Initiative",
                help: "Enter the name or title of the event in which the speech will be \
                       delivered.",
                required: true,
                multiline: false,
            },
            FieldSpec {
                name: "speech_length",
                label: "Length of Speech:",
                placeholder: "e.g. 10 minutes long; not more 250 words; 30 minutes long with \
                              5 minutes Q&A at 15 minutes mark",
                help: "Determine the desired length of the speech and any time constraints that \
                       need to be adhered to. This will help you structure the speech \
                       effectively and ensure that it fits within the allotted time.",
                required: true,
                multiline: false,
            },
            FieldSpec {
                name: "speech_audience",
                label: "Purpose and audience:",
                placeholder: "e.g. The transit event celebrates the launch of a new public \
                              transportation initiative, focusing on improving accessibility \
                              and sustainability within our city. Attendees include residents, \
                              business owners, policymakers, transportation advocates, and \
                              media representatives.",
                help: "Understand the purpose of the speech and who the intended audience is. \
                       What message does the speaker want to convey, and what action or \
                       response do they hope to elicit from the audience?",
                required: true,
                multiline: true,
            },
            FieldSpec {
                name: "project_info",
                label: "Project Information (Optional):",
                placeholder: "e.g. MetroLink Expansion Initiative in Arcadia City is a \
                              comprehensive transit project set to revolutionize urban \
                              mobility. With an estimated cost of $1.5 billion, this \
                              initiative encompasses the construction of new subway lines, \
                              additional bus routes, modernized ticketing systems, and \
                              bike-sharing programs.",
                help: "If this is for a specific project, please enter the project information \
                       here. Be sure to include scope, cost, benefit, etc. information.",
                required: false,
                multiline: true,
            },
            FieldSpec {
                name: "speaker_background",
                label: "Speaker's background (Optional):",
                placeholder: "e.g. Mark Stevens is the visionary Team Lead orchestrating the \
                              groundbreaking Nexus Transit Project. Armed with a master's \
                              degree in Civil Engineering, Mark's career spans two decades of \
                              innovation in transit infrastructure development.",
                help: "Gather information about the speaker's background, expertise, and \
                       experiences relevant to the topic of the speech. This includes their \
                       education, career, achievements, and any personal anecdotes or stories \
                       they may want to share.",
                required: false,
                multiline: true,
            },
            FieldSpec {
                name: "tone_style",
                label: "Tone and style (Optional):",
                placeholder: "e.g. The tone of the speech should be authoritative yet \
                              approachable, conveying confidence and expertise while remaining \
                              accessible to a diverse audience.",
                help: "Determine the tone and style that the speaker prefers. Are they aiming \
                       for a formal, professional tone, or do they prefer a more conversational \
                       and approachable style? Understanding their preferences will help tailor \
                       the speech accordingly.",
                required: false,
                multiline: true,
            },
            FieldSpec {
                name: "quote_reference",
                label: "Quotes and references (Optional):",
                placeholder: "e.g. \"Investment in public transportation creates jobs, helps \
                              businesses grow, and provides people with access to \
                              opportunity.\" - Anthony Foxx, Former United States Secretary of \
                              Transportation",
                help: "Enter here any specific quotes, references, or sources that the speaker \
                       wants to incorporate into the speech. These could be from influential \
                       figures, research studies, or other sources that support their message.",
                required: false,
                multiline: true,
            },
        ],
        feedback: FieldSpec {
            name: "feedback",
            label: "Feedback:",
            placeholder: "e.g. Give me another version. The speech is too long. Make it \
                          shorter. Remove the 3rd paragraph. Combine and condense the last two \
                          paragraph. Use a lighter tone. Finish with a joke in the last \
                          sentence of 4th paragraph.",
            help: "Please provide your feedback. I will use your feedback to revise the draft.",
            required: true,
            multiline: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_required_and_four_optional_fields() {
        let form = form_descriptor();
        let required = form.fields.iter().filter(|f| f.required).count();
        assert_eq!(required, 3);
        assert_eq!(form.fields.len() - required, 4);
        assert_eq!(form.fields[0].name, "event_name");
        assert!(form.feedback.required);
    }
}

pub mod domain;
pub mod ports;
pub mod transcript;

pub use domain::{AssistantRun, MissingField, RequestFields, RunPhase};
pub use ports::{AssistantService, PortError, PortResult};
pub use transcript::{Transcript, ROUND_SEPARATOR};

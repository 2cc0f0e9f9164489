pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod state;
pub mod task;
pub mod trial;

pub use config::{ConfigError, SessionConfig, SourceFormat, load_trials, parse_trials};
pub use error::{ProtocolViolation, SubmitError};
pub use event::{ResponseRecord, SessionEvent};
pub use log::{MemoryLogger, ResponseLogger, TsvLogger};
pub use state::{AlternationController, SessionPhase, SessionSummary, TaskStats};
pub use task::{Progress, TaskState};
pub use trial::TrialSequence;

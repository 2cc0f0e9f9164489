pub mod condition;
pub mod error;
pub mod response;
pub mod reveal;
pub mod trial;

pub use condition::{Condition, TaskKind};
pub use error::{IndexOutOfBounds, ValidationError};
pub use response::{Evaluation, ResponseEvent, evaluate};
pub use reveal::{MASK, Reveal, reveal};
pub use trial::{SYMBOL_COUNT, SubtractionTrial, TaskContent, TrialPair, TypingTrial};

/// Trial content that violates the fixed-width rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("wrong length for word '{word}': {len} (expected {expected})")]
    WordLength {
        word: String,
        len: usize,
        expected: usize,
    },

    #[error("word '{0}' may only contain the letters A-Z")]
    NonLetterWord(String),

    #[error("wrong width for number '{value}': {width} (expected {expected})")]
    NumberWidth {
        value: String,
        width: usize,
        expected: usize,
    },

    #[error("number '{0}' is not a decimal digit string")]
    NotDecimal(String),

    #[error("subtraction {minuend} - {subtrahend} has a negative result")]
    NegativeDifference { minuend: String, subtrahend: String },

    #[error("unknown condition '{0}' (expected 'easy' or 'hard')")]
    UnknownCondition(String),
}

/// Progress index used past the end of a task's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} out of bounds for content of length {len}")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

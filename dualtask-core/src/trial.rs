use std::fmt;

use crate::condition::{Condition, TaskKind};
use crate::error::ValidationError;

/// Fixed number of symbols in every word, operand and solution
pub const SYMBOL_COUNT: usize = 10;

/// A typing task trial: one word to copy letter by letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingTrial {
    condition: Condition,
    word: String,
}

impl TypingTrial {
    /// Trims and uppercases `word`, which must then be exactly
    /// [`SYMBOL_COUNT`] ASCII letters: the typing keyboard has no other keys.
    pub fn new(condition: Condition, word: &str) -> Result<Self, ValidationError> {
        let trimmed = word.trim();
        if !trimmed.chars().all(|c| TaskKind::Typing.accepts(c)) {
            return Err(ValidationError::NonLetterWord(trimmed.to_string()));
        }

        let word = trimmed.to_ascii_uppercase();
        let len = word.chars().count();
        if len != SYMBOL_COUNT {
            return Err(ValidationError::WordLength {
                word,
                len,
                expected: SYMBOL_COUNT,
            });
        }

        Ok(Self { condition, word })
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

impl fmt::Display for TypingTrial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<word: '{}' ({})>", self.word, self.condition)
    }
}

/// A subtraction task trial: two ten-digit operands and their difference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtractionTrial {
    condition: Condition,
    minuend: String,
    subtrahend: String,
    solution: String,
}

impl SubtractionTrial {
    /// Builds a trial from operand digit strings. Each operand is trimmed and
    /// must already be [`SYMBOL_COUNT`] decimal digits wide.
    pub fn new(
        condition: Condition,
        minuend: &str,
        subtrahend: &str,
    ) -> Result<Self, ValidationError> {
        let minuend = canonical_digits(minuend)?;
        let subtrahend = canonical_digits(subtrahend)?;
        Self::from_canonical(condition, minuend, subtrahend)
    }

    /// Builds a trial from numeric operands, zero-padded to [`SYMBOL_COUNT`].
    pub fn from_numbers(
        condition: Condition,
        minuend: u64,
        subtrahend: u64,
    ) -> Result<Self, ValidationError> {
        let minuend = pad_number(minuend)?;
        let subtrahend = pad_number(subtrahend)?;
        Self::from_canonical(condition, minuend, subtrahend)
    }

    fn from_canonical(
        condition: Condition,
        minuend: String,
        subtrahend: String,
    ) -> Result<Self, ValidationError> {
        let m = parse_digits(&minuend)?;
        let s = parse_digits(&subtrahend)?;
        // Negative differences cannot be written in ten digits without a sign
        let difference = m
            .checked_sub(s)
            .ok_or_else(|| ValidationError::NegativeDifference {
                minuend: minuend.clone(),
                subtrahend: subtrahend.clone(),
            })?;
        let solution = pad_number(difference)?;

        Ok(Self {
            condition,
            minuend,
            subtrahend,
            solution,
        })
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn minuend(&self) -> &str {
        &self.minuend
    }

    pub fn subtrahend(&self) -> &str {
        &self.subtrahend
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }
}

impl fmt::Display for SubtractionTrial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<subtraction: {} - {} ({})>",
            self.minuend, self.subtrahend, self.condition
        )
    }
}

/// One configured trial: the typing and subtraction content shown together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialPair {
    pub typing: TypingTrial,
    pub subtraction: SubtractionTrial,
}

impl TrialPair {
    pub fn new(typing: TypingTrial, subtraction: SubtractionTrial) -> Self {
        Self {
            typing,
            subtraction,
        }
    }
}

/// The content a single task panel works through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskContent {
    Typing(TypingTrial),
    Subtraction(SubtractionTrial),
}

impl TaskContent {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskContent::Typing(_) => TaskKind::Typing,
            TaskContent::Subtraction(_) => TaskKind::Subtraction,
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            TaskContent::Typing(t) => t.condition(),
            TaskContent::Subtraction(s) => s.condition(),
        }
    }

    /// The symbols the subject is expected to enter, in order
    pub fn target(&self) -> &str {
        match self {
            TaskContent::Typing(t) => t.word(),
            TaskContent::Subtraction(s) => s.solution(),
        }
    }

    pub fn len(&self) -> usize {
        self.target().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<TypingTrial> for TaskContent {
    fn from(trial: TypingTrial) -> Self {
        TaskContent::Typing(trial)
    }
}

impl From<SubtractionTrial> for TaskContent {
    fn from(trial: SubtractionTrial) -> Self {
        TaskContent::Subtraction(trial)
    }
}

fn canonical_digits(raw: &str) -> Result<String, ValidationError> {
    let digits = raw.trim();
    if !digits.chars().all(|c| c.is_ascii_digit()) || digits.is_empty() {
        return Err(ValidationError::NotDecimal(digits.to_string()));
    }
    if digits.len() != SYMBOL_COUNT {
        return Err(ValidationError::NumberWidth {
            value: digits.to_string(),
            width: digits.len(),
            expected: SYMBOL_COUNT,
        });
    }
    Ok(digits.to_string())
}

fn pad_number(n: u64) -> Result<String, ValidationError> {
    let padded = format!("{:0width$}", n, width = SYMBOL_COUNT);
    if padded.len() != SYMBOL_COUNT {
        return Err(ValidationError::NumberWidth {
            width: padded.len(),
            value: padded,
            expected: SYMBOL_COUNT,
        });
    }
    Ok(padded)
}

fn parse_digits(digits: &str) -> Result<u64, ValidationError> {
    digits
        .parse()
        .map_err(|_| ValidationError::NotDecimal(digits.to_string()))
}

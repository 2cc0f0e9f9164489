use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Disclosure condition of a trial
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Condition {
    /// One symbol revealed at a time
    #[default]
    Easy,
    /// Full answer shown once, then hidden
    Hard,
}

impl Condition {
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Easy => "easy",
            Condition::Hard => "hard",
        }
    }

    pub fn is_easy(&self) -> bool {
        matches!(self, Condition::Easy)
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, Condition::Hard)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Condition::Easy),
            "hard" => Ok(Condition::Hard),
            _ => Err(ValidationError::UnknownCondition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Condition {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.name().to_string()
    }
}

/// The two interleaved activities of a dual-task trial
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Typing,
    Subtraction,
}

impl TaskKind {
    pub const ALL: [TaskKind; 2] = [TaskKind::Typing, TaskKind::Subtraction];

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Typing => "typing",
            TaskKind::Subtraction => "subtraction",
        }
    }

    /// The task the subject alternates to
    pub fn other(&self) -> TaskKind {
        match self {
            TaskKind::Typing => TaskKind::Subtraction,
            TaskKind::Subtraction => TaskKind::Typing,
        }
    }

    /// Whether `symbol` belongs to this task's keyboard.
    pub fn accepts(&self, symbol: char) -> bool {
        match self {
            TaskKind::Typing => symbol.is_ascii_alphabetic(),
            TaskKind::Subtraction => symbol.is_ascii_digit(),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Session configuration and the trial-source loader.
//!
//! The trial source is a list of records, each carrying a `typing` and a
//! `subtraction` sub-record. YAML and JSON are accepted, chosen by the file
//! extension. The whole file is validated up front: any malformed record is a
//! [`ConfigError`] and no session starts.

use std::fs;
use std::path::{Path, PathBuf};

use dualtask_core::{Condition, SYMBOL_COUNT, SubtractionTrial, TrialPair, TypingTrial, ValidationError};
use serde::Deserialize;
use tracing::debug;

use crate::trial::TrialSequence;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub trials_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trials_path: PathBuf::from("trials.yaml"),
            log_path: PathBuf::from("responses.tsv"),
        }
    }
}

impl SessionConfig {
    pub fn new(trials_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            trials_path: trials_path.into(),
            log_path: log_path.into(),
        }
    }

    pub fn load_trials(&self) -> Result<TrialSequence, ConfigError> {
        load_trials(&self.trials_path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read trial source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported trial source format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("incorrect JSON format for trials: {0}")]
    Json(#[from] serde_json::Error),

    #[error("incorrect YAML format for trials: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("trial {trial} has no '{field}' record")]
    MissingSubRecord { trial: usize, field: &'static str },

    #[error("trial {trial} is invalid: {source}")]
    InvalidTrial {
        trial: usize,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(SourceFormat::Json),
            Some("yaml") | Some("yml") => Ok(SourceFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrialRecord {
    typing: Option<TypingRecord>,
    subtraction: Option<SubtractionRecord>,
}

#[derive(Debug, Deserialize)]
struct TypingRecord {
    condition: String,
    word: String,
}

#[derive(Debug, Deserialize)]
struct SubtractionRecord {
    condition: String,
    #[serde(alias = "number1")]
    minuend: Scalar,
    #[serde(alias = "number2")]
    subtrahend: Scalar,
}

/// Operands may be written as numbers or as digit strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(u64),
    Text(String),
}

impl Scalar {
    fn as_operand(&self) -> String {
        match self {
            Scalar::Number(n) => format!("{:0width$}", n, width = SYMBOL_COUNT),
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// Reads and validates the trial source at `path`.
pub fn load_trials(path: &Path) -> Result<TrialSequence, ConfigError> {
    let format = SourceFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trials = parse_trials(&text, format)?;
    debug!("Loaded {} trials from {}", trials.len(), path.display());
    Ok(trials)
}

/// Parses and validates trial records from `text`.
pub fn parse_trials(text: &str, format: SourceFormat) -> Result<TrialSequence, ConfigError> {
    if text.trim().is_empty() {
        return Ok(TrialSequence::default());
    }

    let records: Vec<TrialRecord> = match format {
        SourceFormat::Json => serde_json::from_str(text)?,
        SourceFormat::Yaml => serde_yaml::from_str(text)?,
    };

    let pairs = records
        .into_iter()
        .enumerate()
        .map(|(trial, record)| build_pair(trial, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrialSequence::new(pairs))
}

fn build_pair(trial: usize, record: TrialRecord) -> Result<TrialPair, ConfigError> {
    let typing = record.typing.ok_or(ConfigError::MissingSubRecord {
        trial,
        field: "typing",
    })?;
    let subtraction = record.subtraction.ok_or(ConfigError::MissingSubRecord {
        trial,
        field: "subtraction",
    })?;

    let invalid = |source| ConfigError::InvalidTrial { trial, source };

    let typing_condition: Condition = typing.condition.parse().map_err(invalid)?;
    let typing = TypingTrial::new(typing_condition, &typing.word).map_err(invalid)?;

    let subtraction_condition: Condition = subtraction.condition.parse().map_err(invalid)?;
    let subtraction = SubtractionTrial::new(
        subtraction_condition,
        &subtraction.minuend.as_operand(),
        &subtraction.subtrahend.as_operand(),
    )
    .map_err(invalid)?;

    Ok(TrialPair::new(typing, subtraction))
}

use dualtask_core::{Condition, ResponseEvent, TaskKind};

/// What a single response caused, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ResponseAccepted(ResponseEvent),
    TaskFinished(TaskKind),
    /// A new trial pair was loaded (0-based position in the sequence)
    TrialStarted { trial: usize },
    Activated(TaskKind),
    SessionEnded,
}

/// Flat row handed to the response logger, one per accepted response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub task: TaskKind,
    pub condition: Condition,
    pub symbol: char,
    pub correct: bool,
    /// Unix seconds
    pub timestamp: f64,
    /// Seconds since the task was activated
    pub reaction_time: f64,
}

impl ResponseRecord {
    /// Tab-separated row in the fixed column order, without the newline.
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{:.6}\t{:.6}",
            self.task.name(),
            self.condition.name(),
            self.symbol,
            if self.correct { "True" } else { "False" },
            self.timestamp,
            self.reaction_time,
        )
    }
}

use dualtask_core::{
    Condition, IndexOutOfBounds, ResponseEvent, Reveal, TaskContent, TaskKind, evaluate, reveal,
};

use crate::error::{ProtocolViolation, SubmitError};

/// Progress of one task panel through its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Uninitialized,
    Ready { index: usize },
    Finished,
}

/// Per-panel state machine: `Uninitialized -> Ready(0) -> .. -> Ready(N-1) -> Finished`.
///
/// Activation is orthogonal to progress and only the controller changes it.
/// A finished task stays finished; the next trial builds a fresh state.
#[derive(Debug, Clone)]
pub struct TaskState {
    kind: TaskKind,
    content: Option<TaskContent>,
    progress: Progress,
    active: bool,
}

impl TaskState {
    pub fn uninitialized(kind: TaskKind) -> Self {
        Self {
            kind,
            content: None,
            progress: Progress::Uninitialized,
            active: false,
        }
    }

    /// Fresh, inactive state at `Ready(0)` for `content`.
    pub fn new(content: impl Into<TaskContent>) -> Self {
        let content = content.into();
        let progress = if content.is_empty() {
            Progress::Finished
        } else {
            Progress::Ready { index: 0 }
        };
        Self {
            kind: content.kind(),
            content: Some(content),
            progress,
            active: false,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn content(&self) -> Option<&TaskContent> {
        self.content.as_ref()
    }

    pub fn condition(&self) -> Option<Condition> {
        self.content.as_ref().map(TaskContent::condition)
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// `None` while uninitialized; the content length once finished.
    pub fn index(&self) -> Option<usize> {
        match self.progress {
            Progress::Uninitialized => None,
            Progress::Ready { index } => Some(index),
            Progress::Finished => Some(self.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, TaskContent::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_finished(&self) -> bool {
        self.progress == Progress::Finished
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        debug_assert!(
            !(active && self.is_finished()),
            "finished {} task reactivated",
            self.kind
        );
        self.active = active;
    }

    /// What the subject sees right now; `None` unless the task is `Ready`.
    pub fn reveal(&self) -> Result<Option<Reveal>, IndexOutOfBounds> {
        match (&self.content, self.progress) {
            (Some(content), Progress::Ready { index }) => reveal(content, index).map(Some),
            _ => Ok(None),
        }
    }

    /// Scores `symbol` against the current position without moving.
    ///
    /// The returned response takes effect only once passed to [`commit`](Self::commit).
    pub(crate) fn score(
        &self,
        symbol: char,
        timestamp_ns: u64,
    ) -> Result<PendingResponse, SubmitError> {
        let index = match self.progress {
            Progress::Uninitialized => {
                return Err(ProtocolViolation::UninitializedTask(self.kind).into());
            }
            Progress::Finished => return Err(ProtocolViolation::FinishedTask(self.kind).into()),
            Progress::Ready { .. } if !self.active => {
                return Err(ProtocolViolation::InactiveTask(self.kind).into());
            }
            Progress::Ready { index } => index,
        };

        let len = self.len();
        let target = self
            .content
            .as_ref()
            .map(TaskContent::target)
            .ok_or(IndexOutOfBounds { index, len })?;
        let evaluation = evaluate(target, index, symbol)?;

        // Right or wrong, the response moves the task one step forward
        let next = if evaluation.next_index >= len {
            Progress::Finished
        } else {
            Progress::Ready {
                index: evaluation.next_index,
            }
        };

        Ok(PendingResponse {
            event: ResponseEvent {
                source: self.kind,
                symbol: symbol.to_ascii_uppercase(),
                expected: evaluation.expected,
                correct: evaluation.correct,
                index,
                timestamp_ns,
            },
            next,
        })
    }

    /// Applies a response scored by [`score`](Self::score) on this state.
    pub(crate) fn commit(&mut self, pending: PendingResponse) -> ResponseEvent {
        debug_assert_eq!(
            self.progress,
            Progress::Ready {
                index: pending.event.index
            },
            "stale {} response committed",
            self.kind
        );
        self.progress = pending.next;
        pending.event
    }
}

/// A scored response that has not yet moved its task forward
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingResponse {
    pub(crate) event: ResponseEvent,
    next: Progress,
}

use dualtask_core::{IndexOutOfBounds, TaskKind};

/// A response that the engine refuses to accept. State is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("response for inactive {0} task")]
    InactiveTask(TaskKind),

    #[error("response for finished {0} task")]
    FinishedTask(TaskKind),

    #[error("response for {0} task before any trial was loaded")]
    UninitializedTask(TaskKind),

    #[error("response after the session ended")]
    SessionEnded,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Recoverable: the response was ignored
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// A progress index escaped its content; the controller is broken
    #[error("internal progress error: {0}")]
    Index(#[from] IndexOutOfBounds),

    #[error("cannot write response log: {0}")]
    Log(#[from] std::io::Error),
}

impl SubmitError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SubmitError::Protocol(_))
    }
}

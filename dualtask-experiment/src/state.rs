use std::time::Duration;

use dualtask_core::{IndexOutOfBounds, ResponseEvent, Reveal, TaskKind, TrialPair};
use dualtask_timing::Timer;
use tracing::{debug, info, warn};

use crate::error::{ProtocolViolation, SubmitError};
use crate::event::{ResponseRecord, SessionEvent};
use crate::log::ResponseLogger;
use crate::task::TaskState;
use crate::trial::TrialSequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Ended,
}

/// Running totals for one task kind
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskStats {
    pub responses: usize,
    pub correct: usize,
    pub total_reaction: Duration,
}

impl TaskStats {
    /// Fraction of correct responses in `[0, 1]`
    pub fn accuracy(&self) -> Option<f64> {
        (self.responses > 0).then(|| self.correct as f64 / self.responses as f64)
    }

    pub fn mean_reaction_ms(&self) -> Option<f64> {
        (self.responses > 0)
            .then(|| self.total_reaction.as_secs_f64() * 1e3 / self.responses as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub trials_completed: usize,
    pub typing: TaskStats,
    pub subtraction: TaskStats,
}

impl SessionSummary {
    pub fn task(&self, kind: TaskKind) -> &TaskStats {
        match kind {
            TaskKind::Typing => &self.typing,
            TaskKind::Subtraction => &self.subtraction,
        }
    }

    fn task_mut(&mut self, kind: TaskKind) -> &mut TaskStats {
        match kind {
            TaskKind::Typing => &mut self.typing,
            TaskKind::Subtraction => &mut self.subtraction,
        }
    }
}

/// Owns both task panels and the trial cursor, and decides whose turn it is.
///
/// Exactly one task is active while the session runs. Subtraction starts each
/// session; after every response the turn passes to the other task unless that
/// task has already finished its trial. When both are finished the next trial
/// pair is loaded, or the session ends if there is none.
pub struct AlternationController<T, L>
where
    T: Timer<Timestamp = u64>,
    L: ResponseLogger,
{
    timer: T,
    logger: L,
    trials: TrialSequence,
    typing: TaskState,
    subtraction: TaskState,
    typing_onset: u64,
    subtraction_onset: u64,
    phase: SessionPhase,
    trial_number: usize,
    summary: SessionSummary,
}

impl<T, L> AlternationController<T, L>
where
    T: Timer<Timestamp = u64>,
    L: ResponseLogger,
{
    /// Loads the first trial pair, or ends the session at once if there is none.
    pub fn new(trials: TrialSequence, timer: T, logger: L) -> Self {
        let mut controller = Self {
            timer,
            logger,
            trials,
            typing: TaskState::uninitialized(TaskKind::Typing),
            subtraction: TaskState::uninitialized(TaskKind::Subtraction),
            typing_onset: 0,
            subtraction_onset: 0,
            phase: SessionPhase::Running,
            trial_number: 0,
            summary: SessionSummary::default(),
        };

        // Nobody is listening yet; the front end draws the initial state itself
        let startup = &mut Vec::new();
        match controller.trials.next_pair() {
            Some(pair) => controller.load_pair(pair, TaskKind::Subtraction, startup),
            None => controller.end_session(startup),
        }
        controller
    }

    /// Accepts one key-press for `task`.
    ///
    /// Responses for an inactive or finished task, or after the session has
    /// ended, are rejected with a [`ProtocolViolation`] and change nothing.
    /// The task only moves forward once its log row is written, so a failed
    /// write also leaves the session as it was.
    pub fn submit(
        &mut self,
        task: TaskKind,
        symbol: char,
    ) -> Result<Vec<SessionEvent>, SubmitError> {
        if self.phase == SessionPhase::Ended {
            warn!("Ignoring {} response '{}' after session end", task, symbol);
            return Err(ProtocolViolation::SessionEnded.into());
        }

        let now = self.timer.now();
        let pending = match self.state(task).score(symbol, now) {
            Ok(pending) => pending,
            Err(SubmitError::Protocol(violation)) => {
                warn!("Ignoring response '{}': {}", symbol, violation);
                return Err(violation.into());
            }
            Err(e) => return Err(e),
        };

        self.record(&pending.event)?;
        let event = self.state_mut(task).commit(pending);

        let mut events = vec![SessionEvent::ResponseAccepted(event)];
        self.process_response(task, &mut events);
        Ok(events)
    }

    fn record(&mut self, event: &ResponseEvent) -> Result<(), SubmitError> {
        let state = self.state(event.source);
        let condition = state.condition().ok_or(IndexOutOfBounds {
            index: event.index,
            len: state.len(),
        })?;
        let reaction = self
            .timer
            .between(self.onset(event.source), event.timestamp_ns);

        let record = ResponseRecord {
            task: event.source,
            condition,
            symbol: event.symbol,
            correct: event.correct,
            timestamp: self.timer.unix_seconds(event.timestamp_ns),
            reaction_time: reaction.as_secs_f64(),
        };
        self.logger.log(&record)?;

        let stats = self.summary.task_mut(event.source);
        stats.responses += 1;
        stats.correct += usize::from(event.correct);
        stats.total_reaction += reaction;
        Ok(())
    }

    fn process_response(&mut self, source: TaskKind, events: &mut Vec<SessionEvent>) {
        if self.state(source).is_finished() {
            self.state_mut(source).set_active(false);
            debug!("Task {} finished", source);
            events.push(SessionEvent::TaskFinished(source));
        }

        if self.typing.is_finished() && self.subtraction.is_finished() {
            self.summary.trials_completed += 1;
            info!("Trial {} complete", self.trial_number + 1);
            match self.trials.next_pair() {
                Some(pair) => self.load_pair(pair, source.other(), events),
                None => self.end_session(events),
            }
            return;
        }

        let other = source.other();
        if self.state(other).is_finished() {
            // The other task is idle until the next trial; keep this one going
            self.activate(source, events);
        } else {
            self.state_mut(source).set_active(false);
            self.activate(other, events);
        }
    }

    fn load_pair(&mut self, pair: TrialPair, first: TaskKind, events: &mut Vec<SessionEvent>) {
        self.trial_number = self.trials.position().saturating_sub(1);
        info!(
            "Trial {} started: {} | {}",
            self.trial_number + 1,
            pair.typing,
            pair.subtraction
        );

        self.typing = TaskState::new(pair.typing);
        self.subtraction = TaskState::new(pair.subtraction);
        events.push(SessionEvent::TrialStarted {
            trial: self.trial_number,
        });
        self.activate(first, events);
    }

    fn activate(&mut self, task: TaskKind, events: &mut Vec<SessionEvent>) {
        let now = self.timer.now();
        self.state_mut(task).set_active(true);
        *self.onset_mut(task) = now;
        debug!("Task {} active", task);
        events.push(SessionEvent::Activated(task));
    }

    fn end_session(&mut self, events: &mut Vec<SessionEvent>) {
        self.typing.set_active(false);
        self.subtraction.set_active(false);
        self.phase = SessionPhase::Ended;
        info!(
            "Session ended after {} trials",
            self.summary.trials_completed
        );
        events.push(SessionEvent::SessionEnded);
    }

    fn state(&self, task: TaskKind) -> &TaskState {
        match task {
            TaskKind::Typing => &self.typing,
            TaskKind::Subtraction => &self.subtraction,
        }
    }

    fn state_mut(&mut self, task: TaskKind) -> &mut TaskState {
        match task {
            TaskKind::Typing => &mut self.typing,
            TaskKind::Subtraction => &mut self.subtraction,
        }
    }

    fn onset(&self, task: TaskKind) -> u64 {
        match task {
            TaskKind::Typing => self.typing_onset,
            TaskKind::Subtraction => self.subtraction_onset,
        }
    }

    fn onset_mut(&mut self, task: TaskKind) -> &mut u64 {
        match task {
            TaskKind::Typing => &mut self.typing_onset,
            TaskKind::Subtraction => &mut self.subtraction_onset,
        }
    }

    pub fn task(&self, task: TaskKind) -> &TaskState {
        self.state(task)
    }

    /// The task currently awaiting a response, if any
    pub fn active_task(&self) -> Option<TaskKind> {
        TaskKind::ALL
            .into_iter()
            .find(|&kind| self.state(kind).is_active())
    }

    pub fn reveal(&self, task: TaskKind) -> Result<Option<Reveal>, IndexOutOfBounds> {
        self.state(task).reveal()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Current trial (1-based) and total number of trials
    pub fn trial_progress(&self) -> Option<(usize, usize)> {
        match self.phase {
            SessionPhase::Running => Some((self.trial_number + 1, self.trials.len())),
            SessionPhase::Ended => None,
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }
}

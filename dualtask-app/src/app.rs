use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use dualtask_core::TaskKind;
use dualtask_experiment::{
    AlternationController, ResponseLogger, SessionConfig, SessionEvent, SessionSummary, TsvLogger,
};
use dualtask_timing::{HighPrecisionTimer, Timer};
use tracing::{info, warn};

use crate::render::TextRenderer;

const QUIT_COMMAND: &str = "/quit";

/// Terminal front end: forwards key-presses to the engine and redraws
pub struct App<T, L>
where
    T: Timer<Timestamp = u64>,
    L: ResponseLogger,
{
    experiment: AlternationController<T, L>,
    renderer: TextRenderer,
    should_exit: bool,
}

impl App<HighPrecisionTimer, TsvLogger<BufWriter<File>>> {
    /// Loads every trial before anything is shown; a bad trial source aborts here.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let trials = config.load_trials().with_context(|| {
            format!(
                "failed to load trials from {}",
                config.trials_path.display()
            )
        })?;
        let logger = TsvLogger::create(&config.log_path).with_context(|| {
            format!(
                "failed to create response log {}",
                config.log_path.display()
            )
        })?;
        info!(
            "Loaded {} trials, logging responses to {}",
            trials.len(),
            config.log_path.display()
        );

        let experiment = AlternationController::new(trials, HighPrecisionTimer::new(), logger);
        Ok(Self::from_controller(experiment))
    }
}

impl<T, L> App<T, L>
where
    T: Timer<Timestamp = u64>,
    L: ResponseLogger,
{
    pub fn from_controller(experiment: AlternationController<T, L>) -> Self {
        Self {
            experiment,
            renderer: TextRenderer::new(),
            should_exit: false,
        }
    }

    /// Reads key-presses line by line until the session ends, `/quit` is
    /// entered or input runs out.
    pub fn run<I: BufRead, O: Write>(mut self, input: I, out: &mut O) -> Result<SessionSummary> {
        writeln!(out, "=== DUAL TASK EXPERIMENT ===")?;
        writeln!(
            out,
            "Type letters for the typing task and digits for the subtraction task."
        )?;
        writeln!(out, "Press Enter to submit, {} to stop.\n", QUIT_COMMAND)?;

        if self.experiment.is_ended() {
            writeln!(out, "No trials configured.")?;
            self.should_exit = true;
        } else {
            self.redraw(out)?;
        }

        let mut lines = input.lines();
        while !self.should_exit {
            let Some(line) = lines.next() else {
                info!("Input closed before the session ended");
                break;
            };
            self.handle_line(&line?, out)?;
        }

        self.cleanup_and_exit(out)
    }

    fn handle_line<O: Write>(&mut self, line: &str, out: &mut O) -> Result<()> {
        if line.trim() == QUIT_COMMAND {
            info!("Session stopped by the experimenter");
            self.should_exit = true;
            return Ok(());
        }

        for key in line.chars().filter(|c| !c.is_whitespace()) {
            if self.should_exit {
                break;
            }
            self.handle_key(key, out)?;
        }
        Ok(())
    }

    fn handle_key<O: Write>(&mut self, key: char, out: &mut O) -> Result<()> {
        let task = if TaskKind::Typing.accepts(key) {
            TaskKind::Typing
        } else if TaskKind::Subtraction.accepts(key) {
            TaskKind::Subtraction
        } else {
            warn!("Ignoring key '{}': not on any keyboard", key);
            return Ok(());
        };

        match self.experiment.submit(task, key) {
            Ok(events) => {
                if events.contains(&SessionEvent::SessionEnded) {
                    self.should_exit = true;
                } else {
                    self.redraw(out)?;
                }
                Ok(())
            }
            // Already reported by the controller; the subject just keeps going
            Err(e) if e.is_recoverable() => Ok(()),
            Err(e) => Err(e).context("response could not be processed"),
        }
    }

    fn redraw<O: Write>(&self, out: &mut O) -> Result<()> {
        let frame = self
            .renderer
            .render_frame(&self.experiment)
            .context("failed to render task panels")?;
        write!(out, "\n{}", frame)?;
        out.flush()?;
        Ok(())
    }

    fn cleanup_and_exit<O: Write>(self, out: &mut O) -> Result<SessionSummary> {
        let summary = self.experiment.summary().clone();
        writeln!(out, "\nExperiment completed.")?;
        write!(out, "{}", self.renderer.render_summary(&summary))?;
        writeln!(out, "Thank you!")?;
        out.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualtask_core::{Condition, SubtractionTrial, TrialPair, TypingTrial};
    use dualtask_experiment::{MemoryLogger, TrialSequence};
    use dualtask_timing::ManualTimer;

    fn app(pairs: Vec<TrialPair>) -> App<ManualTimer, MemoryLogger> {
        App::from_controller(AlternationController::new(
            TrialSequence::new(pairs),
            ManualTimer::new(),
            MemoryLogger::new(),
        ))
    }

    fn pair() -> TrialPair {
        TrialPair::new(
            TypingTrial::new(Condition::Easy, "abcdefghij").unwrap(),
            SubtractionTrial::from_numbers(Condition::Easy, 9, 4).unwrap(),
        )
    }

    #[test]
    fn test_full_session_from_lines() {
        // Alternating key-presses, typed on one line each
        let input = "0 a 0 b 0 c 0 d 0 e\n0 f 0 g 0 h 0 i 5 j\n";
        let mut out = Vec::new();
        let summary = app(vec![pair()]).run(input.as_bytes(), &mut out).unwrap();
        assert_eq!(summary.trials_completed, 1);
        assert_eq!(summary.typing.correct, 10);
        assert_eq!(summary.subtraction.correct, 10);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Experiment completed."));
    }

    #[test]
    fn test_keys_for_inactive_task_are_ignored() {
        let input = "a a a 0\n/quit\n";
        let mut out = Vec::new();
        let summary = app(vec![pair()]).run(input.as_bytes(), &mut out).unwrap();
        assert_eq!(summary.typing.responses, 0);
        assert_eq!(summary.subtraction.responses, 1);
        assert_eq!(summary.trials_completed, 0);
    }

    #[test]
    fn test_empty_session_exits_without_input() {
        let mut out = Vec::new();
        let summary = app(Vec::new()).run("0\n".as_bytes(), &mut out).unwrap();
        assert_eq!(summary.subtraction.responses, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No trials configured."));
    }

    #[test]
    fn test_new_fails_on_bad_trial_source() {
        let dir = tempfile::tempdir().unwrap();
        let trials = dir.path().join("trials.yaml");
        std::fs::write(&trials, "- typing: { condition: easy, word: short }\n").unwrap();
        let config = SessionConfig::new(&trials, dir.path().join("log.tsv"));
        assert!(App::new(&config).is_err());
        assert!(!dir.path().join("log.tsv").exists());
    }

    #[test]
    fn test_new_writes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let trials = dir.path().join("trials.json");
        std::fs::write(
            &trials,
            r#"[{"typing": {"condition": "easy", "word": "abcdefghij"},
                "subtraction": {"condition": "easy", "minuend": 9, "subtrahend": 4}}]"#,
        )
        .unwrap();
        let log = dir.path().join("log.tsv");
        let config = SessionConfig::new(&trials, &log);

        let mut out = Vec::new();
        App::new(&config)
            .unwrap()
            .run("0 a\n".as_bytes(), &mut out)
            .unwrap();
        let text = std::fs::read_to_string(&log).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("subtraction\teasy\t0\tTrue\t"));
        assert!(rows[1].starts_with("typing\teasy\tA\tTrue\t"));
    }
}

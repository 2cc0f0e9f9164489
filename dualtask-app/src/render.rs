use dualtask_core::{IndexOutOfBounds, Reveal, TaskKind};
use dualtask_experiment::{AlternationController, ResponseLogger, SessionSummary, TaskState};
use dualtask_timing::Timer;

/// Points shown above the panels; the count never changes during a session
pub const STARTING_POINTS: u32 = 200;

/// Draws both task panels as plain text
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Symbol shown for every position of an inactive panel
    pub hidden: char,
    pub points: u32,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            hidden: '*',
            points: STARTING_POINTS,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_frame<T, L>(
        &self,
        experiment: &AlternationController<T, L>,
    ) -> Result<String, IndexOutOfBounds>
    where
        T: Timer<Timestamp = u64>,
        L: ResponseLogger,
    {
        let mut frame = String::new();
        if let Some((current, total)) = experiment.trial_progress() {
            frame.push_str(&format!("---- Trial {}/{} ----\n", current, total));
        }
        frame.push_str(&format!("Points: {}\n", self.points));

        frame.push_str(&self.render_typing(experiment.task(TaskKind::Typing))?);
        frame.push_str(&self.render_subtraction(experiment.task(TaskKind::Subtraction))?);

        match experiment.active_task() {
            Some(TaskKind::Typing) => frame.push_str("Your turn: typing (letters)\n"),
            Some(TaskKind::Subtraction) => frame.push_str("Your turn: subtraction (digits)\n"),
            None => {}
        }
        Ok(frame)
    }

    fn render_typing(&self, task: &TaskState) -> Result<String, IndexOutOfBounds> {
        let word = match task.reveal()? {
            Some(Reveal::Typing { word }) if task.is_active() => word,
            _ => self.hidden_symbols(task.len()),
        };
        Ok(format!("{} {}\n", header(task), word))
    }

    fn render_subtraction(&self, task: &TaskState) -> Result<String, IndexOutOfBounds> {
        let (minuend, subtrahend, entry) = match task.reveal()? {
            Some(Reveal::Subtraction {
                minuend,
                subtrahend,
                entry,
            }) if task.is_active() => (minuend, subtrahend, entry),
            _ => (
                self.hidden_symbols(task.len()),
                self.hidden_symbols(task.len()),
                String::new(),
            ),
        };

        let label = header(task);
        let pad = " ".repeat(label.chars().count());
        Ok(format!(
            "{label}   {minuend}\n{pad} - {subtrahend}\n{pad} = {entry}\n"
        ))
    }

    fn hidden_symbols(&self, n: usize) -> String {
        std::iter::repeat_n(self.hidden, n).collect()
    }

    pub fn render_summary(&self, summary: &SessionSummary) -> String {
        let mut out = format!("Trials completed: {}\n", summary.trials_completed);
        for kind in TaskKind::ALL {
            let stats = summary.task(kind);
            let line = match (stats.accuracy(), stats.mean_reaction_ms()) {
                (Some(accuracy), Some(mean_rt)) => format!(
                    "{:<12} responses: {}, accuracy: {:.1}%, mean RT: {:.1} ms\n",
                    kind.name(),
                    stats.responses,
                    accuracy * 100.0,
                    mean_rt
                ),
                _ => format!("{:<12} responses: 0\n", kind.name()),
            };
            out.push_str(&line);
        }
        out
    }
}

fn header(task: &TaskState) -> String {
    let marker = if task.is_active() { '>' } else { ' ' };
    let condition = task.condition().map_or("-", |c| c.name());
    format!(
        "{} {:<12} [{}]",
        marker,
        task.kind().name().to_uppercase(),
        condition
    )
}

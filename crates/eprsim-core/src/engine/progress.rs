/// Events emitted while spectra are synthesized or an ensemble is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A named phase of work begins.
    PhaseStart { name: &'static str },
    /// The most recently started phase is done.
    PhaseFinish,

    /// Work on `total_steps` units: radicals of one synthesis, or draws of an ensemble.
    TaskStart { total_steps: u64 },
    /// One unit of the current task completed.
    TaskIncrement,
    /// The current task is done.
    TaskFinish,

    /// Free-form status text.
    Message(String),
}

/// The sink a [`ProgressReporter`] forwards events to.
pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// With the `parallel` feature the callback is invoked from rayon workers, so
/// `TaskIncrement` events of one task may arrive from several threads.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that discards every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that forwards every event to `callback`.
    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Returns `true` if events are discarded.
    pub fn is_silent(&self) -> bool {
        self.callback.is_none()
    }

    /// Sends `event` to the callback, if there is one.
    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Brackets `work` with `PhaseStart`/`PhaseFinish`. The finish event is sent even
    /// when `work` returns an error.
    pub fn phase<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = work();
        self.report(Progress::PhaseFinish);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn label(event: Progress) -> String {
        match event {
            Progress::PhaseStart { name } => name.to_string(),
            Progress::PhaseFinish => "phase-finish".to_string(),
            Progress::TaskStart { total_steps } => format!("start:{total_steps}"),
            Progress::TaskIncrement => "inc".to_string(),
            Progress::TaskFinish => "finish".to_string(),
            Progress::Message(msg) => msg,
        }
    }

    #[test]
    fn silent_reporter_accepts_events() {
        let reporter = ProgressReporter::new();
        assert!(reporter.is_silent());
        reporter.report(Progress::TaskStart { total_steps: 3 });
        reporter.report(Progress::TaskIncrement);
    }

    #[test]
    fn phase_brackets_the_work_and_returns_its_result() {
        let seen = Mutex::new(Vec::new());
        let reporter =
            ProgressReporter::with_callback(Box::new(|event| seen.lock().unwrap().push(label(event))));

        let result: Result<u32, &str> = reporter.phase("Synthesis", || {
            reporter.report(Progress::TaskStart { total_steps: 1 });
            reporter.report(Progress::TaskIncrement);
            reporter.report(Progress::TaskFinish);
            Err("failed")
        });
        reporter.report(Progress::Message("done".into()));
        drop(reporter);

        assert_eq!(result, Err("failed"));
        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["Synthesis", "start:1", "inc", "finish", "phase-finish", "done"]
        );
    }
}

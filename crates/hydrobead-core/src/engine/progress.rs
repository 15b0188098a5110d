/// Events emitted while a workflow runs.
///
/// A phase brackets one or more tasks; a task advances by `TaskIncrement`
/// once per ensemble member or per batch, depending on the phase.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback. Without one every
/// report is a no-op, so library callers can pass `ProgressReporter::new()`.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` as a named phase holding a single task of `total_steps`.
    ///
    /// Closing events are only sent when `work` succeeds; a failed phase is
    /// left open for the caller's error path to tear down.
    pub fn phase<T, E>(
        &self,
        name: &'static str,
        total_steps: u64,
        work: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.report(Progress::PhaseStart { name });
        self.report(Progress::TaskStart { total_steps });
        let value = work()?;
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
        Ok(value)
    }
}

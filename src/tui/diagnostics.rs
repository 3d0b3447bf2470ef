//! Render and mutation timings shown in the status bar.

use std::time::{Duration, Instant};

/// Wall-clock timings for the initial render and the last list mutation.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    started: Instant,
    initial_render: Option<Duration>,
    last_operation: Option<Duration>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Starts the initial-render clock now.
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Starts the initial-render clock at `started`.
    pub fn started_at(started: Instant) -> Self {
        Self {
            started,
            initial_render: None,
            last_operation: None,
        }
    }

    /// Records the end of the first frame. Later calls are ignored.
    pub fn record_first_render(&mut self) {
        if self.initial_render.is_none() {
            let elapsed = self.started.elapsed();
            log::debug!("initial render took {}", format_millis(Some(elapsed)));
            self.initial_render = Some(elapsed);
        }
    }

    /// Runs `op`, storing its elapsed time as the last operation time.
    pub fn measure<T>(&mut self, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = op();
        self.last_operation = Some(start.elapsed());
        result
    }

    /// Time from construction to the end of the first frame, once known.
    pub fn initial_render(&self) -> Option<Duration> {
        self.initial_render
    }

    /// Elapsed time of the most recent measured operation.
    pub fn last_operation(&self) -> Option<Duration> {
        self.last_operation
    }
}

/// Formats a duration as milliseconds with three decimals, or `-` when unknown.
pub fn format_millis(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("{:.3}ms", d.as_secs_f64() * 1000.0),
        None => "-".to_string(),
    }
}

//! Progress observers for the worker pool.

use crate::check::Check;
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

/// Notified by the pool as checks complete.
///
/// Purely observational: nothing an observer does affects scheduling.
/// Executors call `completed` concurrently, so implementations must be
/// thread-safe.
pub trait ProgressObserver: Send + Sync {
    /// Called once before any check is dispatched.
    fn started(&self, _total: usize) {}

    /// Called once per finished check, successful or not.
    fn completed(&self, done: usize, total: usize, check: &Check);

    /// Called once after every executor has finished.
    fn finished(&self, _total: usize) {}
}

/// Observer used when progress display is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn completed(&self, _done: usize, _total: usize, _check: &Check) {}
}

const BAR_WIDTH: usize = 40;

/// Single-line progress counter on stderr.
///
/// Renders `Task (done/total)` with elapsed time and a bar, redrawn in place.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    started_at: Mutex<Option<Instant>>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn elapsed_seconds(&self) -> f64 {
        let started = match self.started_at.lock() {
            Ok(guard) => *guard,
            Err(_) => None,
        };
        started.map_or(0.0, |t| t.elapsed().as_secs_f64())
    }

    fn draw(&self, done: usize, total: usize) {
        let line = render_line(done, total, self.elapsed_seconds());
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}", line);
        let _ = stderr.flush();
    }
}

impl ProgressObserver for TerminalProgress {
    fn started(&self, total: usize) {
        if let Ok(mut guard) = self.started_at.lock() {
            *guard = Some(Instant::now());
        }
        self.draw(0, total);
    }

    fn completed(&self, done: usize, total: usize, _check: &Check) {
        self.draw(done, total);
    }

    fn finished(&self, _total: usize) {
        let _ = writeln!(std::io::stderr());
    }
}

/// `  1.2s Task (3/10) [############----------------------------]  30%`
pub fn render_line(done: usize, total: usize, elapsed_seconds: f64) -> String {
    let ratio = if total == 0 {
        1.0
    } else {
        (done.min(total) as f64) / (total as f64)
    };
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;

    format!(
        "{:>5.1}s Task ({}/{}) [{}{}] {:>3}%",
        elapsed_seconds,
        done,
        total,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (ratio * 100.0).round() as u32
    )
}

//! Rotating status phrase ticker
//!
//! A periodic task owned by whoever shows the loading state. Dropping the
//! ticker aborts the task.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Phrases shown while a generation is in flight
pub const STATUS_PHRASES: [&str; 3] = [
    "🧠 Pensando como un redactor profesional...",
    "📣 Eligiendo el tono justo...",
    "✍️ Escribiendo con claridad institucional...",
];

/// Rotation period of the status phrases
pub const PHRASE_INTERVAL: Duration = Duration::from_secs(2);

/// Phrase shown after `ticks` elapsed periods
pub fn phrase_at<'a>(phrases: &[&'a str], ticks: usize) -> Option<&'a str> {
    if phrases.is_empty() {
        None
    } else {
        Some(phrases[ticks % phrases.len()])
    }
}

/// Cancellable periodic task counting elapsed periods
#[derive(Debug)]
pub struct PhraseTicker {
    handle: JoinHandle<()>,
}

impl PhraseTicker {
    /// Spawn the ticker; `on_tick` receives the running tick count, the
    /// first call happening one full period after start
    ///
    /// Must be called within a tokio runtime.
    pub fn start<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn(usize) + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut ticks = 0usize;
            loop {
                interval.tick().await;
                ticks = ticks.wrapping_add(1);
                on_tick(ticks);
            }
        });

        Self { handle }
    }

    /// Whether the task is still scheduled
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PhraseTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_at_wraps() {
        assert_eq!(phrase_at(&STATUS_PHRASES, 0), Some(STATUS_PHRASES[0]));
        assert_eq!(phrase_at(&STATUS_PHRASES, 4), Some(STATUS_PHRASES[1]));
        assert_eq!(phrase_at(&[], 4), None);
    }
}

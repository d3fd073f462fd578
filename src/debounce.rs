//! Quiescence-window debounce for search input.

use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Replace any pending value and restart the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Yield the pending value once `window` has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(due) if now >= due => self.flush(),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_after_quiet_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(250));
        d.push("m", start);
        d.push("mi", start + Duration::from_millis(100));
        assert_eq!(d.poll(start + Duration::from_millis(300)), None);
        assert_eq!(d.poll(start + Duration::from_millis(350)), Some("mi"));
        assert_eq!(d.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn flush_drains_pending_value() {
        let mut d = Debouncer::default();
        assert!(!d.is_pending());
        d.push(String::from("milk"), Instant::now());
        assert!(d.is_pending());
        assert_eq!(d.flush().as_deref(), Some("milk"));
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn deadline_tracks_last_push() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(50));
        d.push(1, start);
        d.push(2, start + Duration::from_millis(10));
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(60)));
    }
}

use std::time::{Duration, Instant};

pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(250);

/// Tap toggles, hold enables temporarily.
///
/// The action fires on every begin. It fires a second time on end only when
/// the contact was held longer than the threshold, which undoes the flip once
/// the hold is released. One contact per control at a time.
pub struct DualEdgeTrigger<T> {
    action: fn(&mut T),
    threshold: Duration,
    started: Option<Instant>,
}

impl<T> DualEdgeTrigger<T> {
    pub fn new(action: fn(&mut T), threshold: Duration) -> Self {
        Self {
            action,
            threshold,
            started: None,
        }
    }

    pub fn on_begin(&mut self, target: &mut T, now: Instant) {
        self.started = Some(now);
        (self.action)(target);
    }

    // returns true when the hold was long enough to fire again
    pub fn on_end(&mut self, target: &mut T, now: Instant) -> bool {
        let Some(started) = self.started.take() else {
            return false;
        };
        if now.saturating_duration_since(started) > self.threshold {
            (self.action)(target);
            return true;
        }
        false
    }
}

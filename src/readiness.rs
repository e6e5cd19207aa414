use std::time::{Duration, Instant};

// Gate in front of the board: keeps trying to open the audio devices until it
// works, at most once per interval. Nothing else runs until it hands back a value.
pub struct Readiness {
    interval: Duration,
    last_attempt: Option<Instant>,
    last_error: Option<String>,
    attempts: u32,
}

impl Readiness {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_attempt: None,
            last_error: None,
            attempts: 0,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn poll<T>(
        &mut self,
        now: Instant,
        open: impl FnOnce() -> anyhow::Result<T>,
    ) -> Option<T> {
        if let Some(last) = self.last_attempt {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_attempt = Some(now);
        self.attempts += 1;
        match open() {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(e) => {
                log::warn!("audio not ready (attempt {}): {e:#}", self.attempts);
                self.last_error = Some(format!("{e:#}"));
                None
            }
        }
    }
}

use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

/// Monotonic deadline, stored as an absolute point in time rather than a
/// duration-at-rest — tolerates scheduler jitter and missed ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after_secs(secs: f64) -> Self {
        Self(Instant::now() + std::time::Duration::from_secs_f64(secs.max(0.0)))
    }

    /// `max(0, deadline - now)` in seconds.
    pub fn time_left_secs(&self) -> f64 {
        let now = Instant::now();
        if self.0 <= now {
            0.0
        } else {
            (self.0 - now).as_secs_f64()
        }
    }

    pub fn is_expired(&self) -> bool {
        self.time_left_secs() <= 0.0
    }

    pub fn into_instant(self) -> Instant {
        self.0
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch, used only
/// for commitment timestamps and client-facing metadata — never for
/// deadline arithmetic (that uses the monotonic `Deadline` type above).
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

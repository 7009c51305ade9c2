use chrono::{DateTime, Utc};

/// Time source for window arithmetic and history timestamps.
///
/// All wall-clock reads go through this trait so tests can inject synthetic
/// time instead of sleeping through a real one-hour window.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

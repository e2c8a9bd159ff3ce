use chrono::{DateTime, Utc};

///
/// An overridable clock - used for tests.
///
/// Lockout windows, session idle timeouts and password expiry are all measured against
/// this clock, so tests can pin it to a fixed instant and time-travel.
///
#[derive(Debug)]
pub struct TimeProvider {
    fixed: Option<DateTime<Utc>>
}

impl Default for TimeProvider {
    fn default() -> Self {
        TimeProvider { fixed: None }
    }
}

impl TimeProvider {
    pub fn now(&self) -> DateTime<Utc> {
        match self.fixed {
            Some(fixed) => fixed,
            None => Utc::now()
        }
    }

    pub fn fix(&mut self, fixed: Option<DateTime<Utc>>) {
        self.fixed = fixed;
    }
}

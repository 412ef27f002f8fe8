use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;
use chrono::Utc;
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_second(seconds: i64) -> Self {
        Self(Utc.timestamp_opt(seconds, 0).unwrap())
    }

    /// Current wall-clock time truncated to whole seconds.
    pub fn now() -> Self {
        Self::at_second(Utc::now().timestamp())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing the current date to reports. Lets tests pin
/// "now" instead of racing the wall clock.
pub trait Clock {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock stuck at a single moment.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}

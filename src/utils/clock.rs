use chrono::{Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. This allows "today"
/// to be pinned in tests.
pub trait Clock: Sync + Send + 'static {
    /// Current calendar date in the user's local timezone.
    fn today(&self) -> NaiveDate;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

//! Reference clock for "now".
//!
//! Services read the current date through [`Clock`] so tests can pin any
//! instant. Only [`SystemClock`] reads wall-clock time.

use chrono::{DateTime, NaiveDate, Utc};

/// Supplies the current time to the services.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
///
/// # Example
///
/// ```
/// use hr_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Pins the clock to `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Pins the clock to midnight UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            instant: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

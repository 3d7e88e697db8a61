use crate::{CalendarDate, ParseError};
use chrono::Local;

/// Source of "today" for a submission.
pub trait Clock {
    /// The current local calendar date.
    ///
    /// # Errors
    /// Returns `ParseError` if the date cannot be represented as a [`CalendarDate`].
    fn today(&self) -> Result<CalendarDate, ParseError>;
}

/// Reads the host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<CalendarDate, ParseError> {
        CalendarDate::try_from(Local::now().date_naive())
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(CalendarDate);

impl FixedClock {
    pub const fn new(today: CalendarDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Result<CalendarDate, ParseError> {
        Ok(self.0)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Result<CalendarDate, ParseError> {
        (**self).today()
    }
}

//! Shared fixtures for unit tests.

use crate::{BirthDateInput, CalendarDate, FixedClock};

/// Builds a date that the test knows to be valid.
pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day)
        .unwrap_or_else(|e| panic!("test fixture {year}-{month:02}-{day:02} is not a real date: {e}"))
}

/// Form values in the order the form lays them out: day, month, year.
pub fn input(day: &str, month: &str, year: &str) -> BirthDateInput {
    BirthDateInput::new(day, month, year)
}

/// The reference "today" used across validator and calculator tests.
pub fn today() -> CalendarDate {
    date(2024, 6, 15)
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(today())
}

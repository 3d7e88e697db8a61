//! Elapsed calendar units between a birth date and a reference day.
//!
//! The decomposition borrows the way people count birthdays: a missing month
//! borrows a year, and missing days borrow the month just before `today`'s,
//! using that month's real length (28 to 31 days, leap years included).

use crate::CalendarDate;
use crate::consts::MONTHS_PER_YEAR;
use crate::prelude::*;
use crate::types::{days_in_month, previous_month};
use serde::{Deserialize, Serialize};

/// Years, months and days elapsed since a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[display(
    fmt = "{} year{}, {} month{}, {} day{}",
    years,
    "plural(*years)",
    months,
    "plural(*months)",
    days,
    "plural(*days)"
)]
pub struct AgeResult {
    pub years:  u32,
    /// Always in `0..=11`
    pub months: u32,
    /// Always shorter than the month borrowed from, so at most 30
    pub days:   u32,
}

const fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Computes the age of someone born on `birth` as of `today`.
///
/// `birth` must not be after `today`; the validator guarantees this. With a
/// later `birth` the result is meaningless (negative components saturate to 0).
pub fn age_of(birth: CalendarDate, today: CalendarDate) -> AgeResult {
    let mut years = i32::from(today.year()) - i32::from(birth.year());
    let mut months = i32::from(today.month()) - i32::from(birth.month());
    let mut days = i32::from(today.day()) - i32::from(birth.day());

    // Birthday not reached yet this year
    if months < 0 || (months == 0 && days < 0) {
        years -= 1;
        months += MONTHS_PER_YEAR;
    }

    if days < 0 {
        months -= 1;
        let (prev_year, prev_month) = previous_month(today.year(), today.month());
        let borrowed = days_in_month(prev_year, prev_month);
        // A birth day past the end of the borrowed month counts from its last day.
        let anchor = birth.day().min(borrowed);
        days = i32::from(borrowed - anchor) + i32::from(today.day());
    }

    AgeResult {
        years:  non_negative(years),
        months: non_negative(months),
        days:   non_negative(days),
    }
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use chrono::{Days, Months, NaiveDate};
    use proptest::prelude::*;

    fn age(years: u32, months: u32, days: u32) -> AgeResult {
        AgeResult { years, months, days }
    }

    #[test]
    fn test_same_day_is_zero() {
        let d = date(1991, 8, 15);
        assert_eq!(age_of(d, d), age(0, 0, 0));
    }

    #[test]
    fn test_age_cases() {
        struct TestCase {
            birth:       (u16, u8, u8),
            today:       (u16, u8, u8),
            expected:    AgeResult,
            description: &'static str,
        }

        let cases = [
            TestCase {
                birth:       (1990, 6, 15),
                today:       (2024, 6, 15),
                expected:    age(34, 0, 0),
                description: "exact birthday",
            },
            TestCase {
                birth:       (1990, 6, 16),
                today:       (2024, 6, 15),
                expected:    age(33, 11, 30),
                description: "day before birthday borrows May's 31 days",
            },
            TestCase {
                birth:       (1990, 9, 1),
                today:       (2024, 6, 15),
                expected:    age(33, 9, 14),
                description: "birthday month still ahead",
            },
            TestCase {
                birth:       (2000, 2, 29),
                today:       (2001, 2, 28),
                expected:    age(0, 11, 30),
                description: "leap day birth, no leap day reached; January is borrowed",
            },
            TestCase {
                birth:       (2000, 2, 29),
                today:       (2024, 2, 28),
                expected:    age(23, 11, 30),
                description: "leap day birth, day before the next leap day",
            },
            TestCase {
                birth:       (2000, 2, 29),
                today:       (2024, 2, 29),
                expected:    age(24, 0, 0),
                description: "leap day birthday on a leap year",
            },
            TestCase {
                birth:       (2023, 1, 31),
                today:       (2023, 3, 1),
                expected:    age(0, 1, 1),
                description: "31st borrows from a 28-day February",
            },
            TestCase {
                birth:       (2024, 1, 31),
                today:       (2024, 3, 1),
                expected:    age(0, 1, 1),
                description: "31st borrows from a 29-day February",
            },
            TestCase {
                birth:       (2023, 1, 15),
                today:       (2023, 3, 10),
                expected:    age(0, 1, 23),
                description: "mid-month borrow uses February's 28 days",
            },
            TestCase {
                birth:       (2023, 12, 20),
                today:       (2024, 1, 5),
                expected:    age(0, 0, 16),
                description: "January today borrows December of the previous year",
            },
            TestCase {
                birth:       (2023, 1, 31),
                today:       (2023, 4, 30),
                expected:    age(0, 2, 30),
                description: "month ends of different lengths",
            },
            TestCase {
                birth:       (2023, 5, 31),
                today:       (2023, 6, 30),
                expected:    age(0, 0, 30),
                description: "end of May to end of June",
            },
        ];

        for case in &cases {
            let birth = date(case.birth.0, case.birth.1, case.birth.2);
            let today = date(case.today.0, case.today.1, case.today.2);
            assert_eq!(age_of(birth, today), case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(age(1, 0, 1).to_string(), "1 year, 0 months, 1 day");
        assert_eq!(age(34, 2, 12).to_string(), "34 years, 2 months, 12 days");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&age(34, 2, 12)).expect("serialize age");
        assert_eq!(json, r#"{"years":34,"months":2,"days":12}"#);
    }

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        (1u16..=9999, 1u8..=12, 1u8..=31).prop_filter_map("not a real date", |(y, m, d)| {
            CalendarDate::new(y, m, d).ok()
        })
    }

    fn ordered_pair() -> impl Strategy<Value = (CalendarDate, CalendarDate)> {
        (any_date(), any_date()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
    }

    fn to_naive(d: CalendarDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(d.year().into(), d.month().into(), d.day().into())
            .unwrap_or_else(|| panic!("{d} has no chrono equivalent"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn components_stay_in_bounds((birth, today) in ordered_pair()) {
            let result = age_of(birth, today);
            prop_assert!(result.months <= 11, "months {} for {birth} -> {today}", result.months);
            prop_assert!(result.days <= 30, "days {} for {birth} -> {today}", result.days);
            prop_assert!(result.years <= u32::from(today.year() - birth.year()));
        }

        #[test]
        fn same_inputs_same_output((birth, today) in ordered_pair()) {
            prop_assert_eq!(age_of(birth, today), age_of(birth, today));
        }

        #[test]
        fn adding_age_back_reaches_today((birth, today) in ordered_pair()) {
            let result = age_of(birth, today);
            let reached = to_naive(birth)
                .checked_add_months(Months::new(result.years * 12 + result.months))
                .and_then(|d| d.checked_add_days(Days::new(result.days.into())));
            prop_assert_eq!(reached, Some(to_naive(today)));
        }
    }
}

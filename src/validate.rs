//! Checks raw day/month/year form values and turns them into a [`CalendarDate`].
//!
//! Validation runs in two stages. [`FieldValue::parse`] classifies each raw
//! value on its own; the semantic stage then applies range checks, the
//! future-year rule and finally calendar validity of the combined date.
//! Every field is checked, so a submission reports all of its problems at once.

use crate::CalendarDate;
use crate::consts::{MAX_DAY, MAX_MONTH, MIN_DAY, MIN_YEAR};
use crate::prelude::*;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// The three inputs of the birth date form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// A problem with one form field. `Display` is the message shown under it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("{field} must be a number")]
    NotANumber { field: Field },
    #[error("{field} must be an integer")]
    NotAnInteger { field: Field },
    #[error("{field} must be greater than or equal to {min}")]
    BelowMinimum { field: Field, min: i64 },
    #[error("{field} must be less than or equal to {max}")]
    AboveMaximum { field: Field, max: i64 },
    #[error("Year cannot be in the future")]
    FutureYear,
    #[error("Must be in the past")]
    FutureDate,
    #[error("Must be a valid date")]
    InvalidDate,
}

/// Errors keyed by field, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid birth date: {}", summarize(.0))]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

fn summarize(errors: &BTreeMap<Field, ValidationError>) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("{field}: {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldErrors {
    /// Records `error` for `field` unless the field already has one.
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in form order: day, month, year.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            map.serialize_entry(field, &error.to_string())?;
        }
        map.end()
    }
}

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid(CalendarDate),
    Invalid(FieldErrors),
}

impl ValidationOutcome {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub const fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    pub const fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// # Errors
    /// Returns the field errors when the submission was rejected.
    pub fn into_result(self) -> Result<CalendarDate, FieldErrors> {
        match self {
            Self::Valid(date) => Ok(date),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

impl From<ValidationOutcome> for Result<CalendarDate, FieldErrors> {
    fn from(outcome: ValidationOutcome) -> Self {
        outcome.into_result()
    }
}

/// Raw form values exactly as entered.
///
/// Deserializes from strings, numbers or `null` per field, the shapes a
/// numeric form input can submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDateInput {
    #[serde(default, deserialize_with = "raw_field")]
    pub day:   String,
    #[serde(default, deserialize_with = "raw_field")]
    pub month: String,
    #[serde(default, deserialize_with = "raw_field")]
    pub year:  String,
}

impl BirthDateInput {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day:   day.into(),
            month: month.into(),
            year:  year.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Day => &self.day,
            Field::Month => &self.month,
            Field::Year => &self.year,
        }
    }
}

fn raw_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct RawFieldVisitor;

    impl serde::de::Visitor<'_> for RawFieldVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, a number or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(RawFieldVisitor)
}

/// A raw field value after the parse stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Empty, whitespace, or zero
    Missing,
    Integer(i64),
    Fractional(f64),
    NotANumber,
}

impl FieldValue {
    /// Classifies a raw value. Zero counts as missing, as a numeric form
    /// input holding 0 has nothing meaningful entered.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return if n == 0 { Self::Missing } else { Self::Integer(n) };
        }
        match trimmed.parse::<f64>() {
            Ok(x) if !x.is_finite() => Self::NotANumber,
            Ok(x) if x == 0.0 => Self::Missing,
            // Saturating cast: anything this large fails the range checks anyway.
            #[allow(clippy::cast_possible_truncation)]
            Ok(x) if x.fract() == 0.0 => Self::Integer(x as i64),
            Ok(x) => Self::Fractional(x),
            Err(_) => Self::NotANumber,
        }
    }

    /// The integer, or the error describing why there isn't one.
    fn integer(self, field: Field) -> Result<i64, ValidationError> {
        match self {
            Self::Integer(n) => Ok(n),
            Self::Missing => Err(ValidationError::Required),
            Self::Fractional(_) => Err(ValidationError::NotAnInteger { field }),
            Self::NotANumber => Err(ValidationError::NotANumber { field }),
        }
    }
}

fn in_range(field: Field, value: FieldValue, min: u8, max: u8) -> Result<u8, ValidationError> {
    let n = value.integer(field)?;
    if n < i64::from(min) {
        return Err(ValidationError::BelowMinimum {
            field,
            min: min.into(),
        });
    }
    u8::try_from(n)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(ValidationError::AboveMaximum {
            field,
            max: max.into(),
        })
}

fn not_future_year(value: FieldValue, today: CalendarDate) -> Result<u16, ValidationError> {
    let n = value.integer(Field::Year)?;
    if n < i64::from(MIN_YEAR) {
        return Err(ValidationError::BelowMinimum {
            field: Field::Year,
            min:   MIN_YEAR.into(),
        });
    }
    u16::try_from(n)
        .ok()
        .filter(|y| *y <= today.year())
        .ok_or(ValidationError::FutureYear)
}

fn record<T>(errors: &mut FieldErrors, field: Field, checked: Result<T, ValidationError>) -> Option<T> {
    checked.map_err(|error| errors.insert(field, error)).ok()
}

/// Validates a submission against `today`.
///
/// Never fails: rejected input comes back as [`ValidationOutcome::Invalid`]
/// carrying one message per offending field.
pub fn validate(input: &BirthDateInput, today: CalendarDate) -> ValidationOutcome {
    let mut errors = FieldErrors::default();

    let day = record(
        &mut errors,
        Field::Day,
        in_range(Field::Day, FieldValue::parse(&input.day), MIN_DAY, MAX_DAY),
    );
    let month = record(
        &mut errors,
        Field::Month,
        in_range(Field::Month, FieldValue::parse(&input.month), 1, MAX_MONTH),
    );
    let year = record(
        &mut errors,
        Field::Year,
        not_future_year(FieldValue::parse(&input.year), today),
    );

    let (Some(day), Some(month), Some(year)) = (day, month, year) else {
        trace!(%errors, "field checks failed");
        return ValidationOutcome::Invalid(errors);
    };

    let Ok(date) = CalendarDate::new(year, month, day) else {
        errors.insert(Field::Day, ValidationError::InvalidDate);
        trace!(year, month, day, "not a calendar date");
        return ValidationOutcome::Invalid(errors);
    };

    if date > today {
        let field = if month > today.month() { Field::Month } else { Field::Day };
        errors.insert(field, ValidationError::FutureDate);
        trace!(%date, %today, "date is after today");
        return ValidationOutcome::Invalid(errors);
    }

    ValidationOutcome::Valid(date)
}

use crate::{
    AgeResult, BirthDateInput, Clock, FieldErrors, ParseError, SystemClock, ValidationOutcome,
    age_of, validate,
};
use tracing::debug;

/// Error type for a form submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// One or more fields were rejected.
    #[error(transparent)]
    Invalid(#[from] FieldErrors),

    /// The clock could not produce today's date.
    #[error("Cannot read today's date: {0}")]
    Clock(#[from] ParseError),
}

impl SubmitError {
    /// Field errors to show on the form, if the submission was rejected.
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Clock(_) => None,
        }
    }
}

/// Validates a birth date submission and computes the age as of the clock's today.
#[derive(Debug, Clone, Default)]
pub struct AgeCalculator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> AgeCalculator<C> {
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs only the validation step against today's date.
    ///
    /// # Errors
    /// Returns `ParseError` if the clock fails.
    pub fn validate(&self, input: &BirthDateInput) -> Result<ValidationOutcome, ParseError> {
        let today = self.clock.today()?;
        Ok(validate(input, today))
    }

    /// Validates `input` and, if every field passes, computes the age.
    ///
    /// Today is read once, so validation and calculation agree on it.
    ///
    /// # Errors
    /// Returns `SubmitError::Invalid` with every field error when the input is
    /// rejected, or `SubmitError::Clock` if today's date is unavailable.
    pub fn submit(&self, input: &BirthDateInput) -> Result<AgeResult, SubmitError> {
        let today = self.clock.today()?;
        let birth = validate(input, today).into_result().inspect_err(|errors| {
            debug!(%errors, "submission rejected");
        })?;

        let age = age_of(birth, today);
        debug!(%birth, %today, %age, "age calculated");
        Ok(age)
    }
}

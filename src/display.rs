//! What the result panel shows.
//!
//! The panel starts with a placeholder for every unit. After a successful
//! submission the years figure counts up from 0 to its final value while
//! months and days appear immediately. Elapsed time comes from the host's
//! render loop; nothing here reads a clock.

use crate::consts::{DEFAULT_COUNT_UP_MS, PLACEHOLDER};
use crate::{AgeResult, SubmitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Length of the years count-up in milliseconds. 0 disables it.
    pub count_up_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            count_up_ms: DEFAULT_COUNT_UP_MS,
        }
    }
}

impl DisplayConfig {
    pub const fn count_up_duration(&self) -> Duration {
        Duration::from_millis(self.count_up_ms)
    }
}

/// A linear ramp from 0 to `target` over `duration`, floored to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    target:   u32,
    duration: Duration,
}

impl CountUp {
    pub const fn new(target: u32, duration: Duration) -> Self {
        Self { target, duration }
    }

    pub const fn target(&self) -> u32 {
        self.target
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// The figure to draw `elapsed` after the ramp started.
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        if self.is_finished(elapsed) {
            return self.target;
        }
        let reached = u128::from(self.target) * elapsed.as_nanos() / self.duration.as_nanos();
        u32::try_from(reached).unwrap_or(self.target)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Values sampled every `step`, always ending on the target.
    pub fn frames(&self, step: Duration) -> impl Iterator<Item = u32> + '_ {
        let mut elapsed = Some(Duration::ZERO);
        std::iter::from_fn(move || {
            let now = elapsed?;
            elapsed = if self.is_finished(now) || step.is_zero() {
                None
            } else {
                Some(now.saturating_add(step).min(self.duration))
            };
            Some(if step.is_zero() { self.target } else { self.value_at(now) })
        })
    }
}

/// The result panel: placeholders until the first successful submission.
#[derive(Debug, Clone, Default)]
pub struct AgeDisplay {
    config: DisplayConfig,
    shown:  Option<(AgeResult, CountUp)>,
}

impl AgeDisplay {
    pub const fn new(config: DisplayConfig) -> Self {
        Self { config, shown: None }
    }

    /// Shows `age` and returns the years count-up to drive.
    pub fn show(&mut self, age: AgeResult) -> CountUp {
        let count_up = CountUp::new(age.years, self.config.count_up_duration());
        trace!(%age, ?count_up, "showing age");
        self.shown = Some((age, count_up));
        count_up
    }

    /// Applies a submission result. A rejected submission keeps whatever was
    /// shown before; the form shows the field errors instead.
    pub fn apply(&mut self, result: &Result<AgeResult, SubmitError>) -> Option<CountUp> {
        match result {
            Ok(age) => Some(self.show(*age)),
            Err(_) => None,
        }
    }

    pub fn result(&self) -> Option<AgeResult> {
        self.shown.map(|(age, _)| age)
    }

    /// Years figure `elapsed` after the last successful submission.
    pub fn years_at(&self, elapsed: Duration) -> String {
        self.shown.map_or_else(
            || PLACEHOLDER.to_owned(),
            |(_, count_up)| count_up.value_at(elapsed).to_string(),
        )
    }

    pub fn months(&self) -> String {
        self.unit(|age| age.months)
    }

    pub fn days(&self) -> String {
        self.unit(|age| age.days)
    }

    fn unit(&self, pick: impl Fn(&AgeResult) -> u32) -> String {
        self.shown
            .map_or_else(|| PLACEHOLDER.to_owned(), |(age, _)| pick(&age).to_string())
    }
}

/// The settled panel, one unit per line.
impl fmt::Display for AgeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = self.result().map_or_else(|| PLACEHOLDER.to_owned(), |age| age.years.to_string());
        writeln!(f, "{years} years")?;
        writeln!(f, "{} months", self.months())?;
        write!(f, "{} days", self.days())
    }
}

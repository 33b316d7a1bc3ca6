//! Calendar-based periods: a number of years, months and days plus an
//! hours, minutes, seconds and nanoseconds remainder, each stored as an
//! independent signed integer.
//!
//! [`DateTimePeriod`] carries all seven components. [`DatePeriod`] carries
//! only the calendar ones and statically guarantees the clock components are
//! zero. Both parse from and print to ISO 8601 duration strings:
//!
//! ```
//! use datetime_period::{DatePeriod, DateTimePeriod, Period};
//!
//! let period: DateTimePeriod = "P1Y2M3DT4H".parse()?;
//! assert_eq!(period.hours(), 4);
//! assert_eq!(period.to_string(), "P1Y2M3DT4H");
//!
//! let weeks: DatePeriod = "P2W1D".parse()?;
//! assert_eq!(weeks, DatePeriod::new(0, 0, 15));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! With serde, both types are (de)serialized as their ISO 8601 string by
//! default; [`codec`] has helpers for a field-per-component record instead.

#[macro_use]
mod logging;

pub mod codec;
mod consts;
mod date_period;
mod error;
mod format;
mod parse;
mod prelude;
mod types;

pub use consts::*;
pub use date_period::DatePeriod;
pub use error::{ParseError, ParseErrorKind, PeriodError};
pub use types::{Field, PeriodComponents};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::Duration;

/// Read access to the seven components of a period.
///
/// Implemented by both [`DateTimePeriod`] and [`DatePeriod`]; the latter
/// always reports zero for the clock components.
pub trait Period {
    /// Returns the years component
    fn years(&self) -> i32;
    /// Returns the months component
    fn months(&self) -> i32;
    /// Returns the days component, with any weeks already folded in
    fn days(&self) -> i32;
    /// Returns the hours component
    fn hours(&self) -> i32;
    /// Returns the minutes component
    fn minutes(&self) -> i32;
    /// Returns the seconds component
    fn seconds(&self) -> i64;
    /// Returns the nanoseconds component
    fn nanoseconds(&self) -> i64;

    /// All seven components as plain data
    fn components(&self) -> PeriodComponents {
        PeriodComponents {
            years: self.years(),
            months: self.months(),
            days: self.days(),
            hours: self.hours(),
            minutes: self.minutes(),
            seconds: self.seconds(),
            nanoseconds: self.nanoseconds(),
        }
    }

    fn is_zero(&self) -> bool {
        self.components().is_zero()
    }

    /// True iff every component is `<= 0` and at least one is nonzero.
    fn is_negative(&self) -> bool {
        self.components().is_negative()
    }
}

/// A period with date and clock components.
///
/// Construction picks the representation: a period whose clock components
/// are all zero is stored exactly like a [`DatePeriod`] and can be narrowed
/// back into one with [`DatePeriod::try_from`].
#[derive(Clone, Copy)]
pub struct DateTimePeriod {
    repr: Repr,
}

#[derive(Clone, Copy)]
enum Repr {
    Date(DatePeriod),
    DateTime(PeriodComponents),
}

impl DateTimePeriod {
    /// The zero period, printed as `P0D`
    pub const ZERO: Self = Self {
        repr: Repr::Date(DatePeriod::ZERO),
    };

    /// Creates a period from raw components. No range validation is done:
    /// `minutes` may be 90 and signs may differ between components.
    pub const fn new(
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: i64,
        nanoseconds: i64,
    ) -> Self {
        Self::from_components(PeriodComponents {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            nanoseconds,
        })
    }

    /// Creates a period from raw components, storing it date-only when the
    /// clock components are all zero.
    pub const fn from_components(c: PeriodComponents) -> Self {
        let repr = if c.has_clock() {
            Repr::DateTime(c)
        } else {
            Repr::Date(DatePeriod::new(c.years, c.months, c.days))
        };
        Self { repr }
    }

    /// Parses an ISO 8601 period such as `P1Y2M3DT4H5M6.5S`.
    ///
    /// # Errors
    /// Returns `ParseError` with the offending position if the input is not
    /// a valid period.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse::parse_components(s).map(Self::from_components)
    }

    /// Returns the date-only view if this period has no clock components.
    pub const fn as_date_period(&self) -> Option<DatePeriod> {
        match self.repr {
            Repr::Date(date) => Some(date),
            Repr::DateTime(_) => None,
        }
    }

    /// Returns the years, months and days, dropping any clock components.
    pub fn date_part(&self) -> DatePeriod {
        DatePeriod::new(self.years(), self.months(), self.days())
    }

    /// Component-wise checked addition.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` naming the first field that overflows.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PeriodError> {
        self.components()
            .checked_zip(rhs.components(), i32::checked_add, i64::checked_add)
            .map(Self::from_components)
    }

    /// Component-wise checked subtraction.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` naming the first field that overflows.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, PeriodError> {
        self.components()
            .checked_zip(rhs.components(), i32::checked_sub, i64::checked_sub)
            .map(Self::from_components)
    }

    /// Negates every component.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` if a component is its type's minimum.
    pub fn checked_neg(self) -> Result<Self, PeriodError> {
        self.components().checked_neg().map(Self::from_components)
    }
}

impl Period for DateTimePeriod {
    fn years(&self) -> i32 {
        match &self.repr {
            Repr::Date(date) => date.years(),
            Repr::DateTime(c) => c.years,
        }
    }

    fn months(&self) -> i32 {
        match &self.repr {
            Repr::Date(date) => date.months(),
            Repr::DateTime(c) => c.months,
        }
    }

    fn days(&self) -> i32 {
        match &self.repr {
            Repr::Date(date) => date.days(),
            Repr::DateTime(c) => c.days,
        }
    }

    fn hours(&self) -> i32 {
        match &self.repr {
            Repr::Date(_) => 0,
            Repr::DateTime(c) => c.hours,
        }
    }

    fn minutes(&self) -> i32 {
        match &self.repr {
            Repr::Date(_) => 0,
            Repr::DateTime(c) => c.minutes,
        }
    }

    fn seconds(&self) -> i64 {
        match &self.repr {
            Repr::Date(_) => 0,
            Repr::DateTime(c) => c.seconds,
        }
    }

    fn nanoseconds(&self) -> i64 {
        match &self.repr {
            Repr::Date(_) => 0,
            Repr::DateTime(c) => c.nanoseconds,
        }
    }
}

impl Default for DateTimePeriod {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for DateTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.components();
        f.debug_struct("DateTimePeriod")
            .field("years", &c.years)
            .field("months", &c.months)
            .field("days", &c.days)
            .field("hours", &c.hours)
            .field("minutes", &c.minutes)
            .field("seconds", &c.seconds)
            .field("nanoseconds", &c.nanoseconds)
            .finish()
    }
}

impl PartialEq for DateTimePeriod {
    fn eq(&self, other: &Self) -> bool {
        self.components() == other.components()
    }
}

impl Eq for DateTimePeriod {}

impl PartialEq<DatePeriod> for DateTimePeriod {
    fn eq(&self, other: &DatePeriod) -> bool {
        self.components() == other.components()
    }
}

impl Hash for DateTimePeriod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components().hash(state);
    }
}

impl From<PeriodComponents> for DateTimePeriod {
    fn from(components: PeriodComponents) -> Self {
        Self::from_components(components)
    }
}

impl From<DatePeriod> for DateTimePeriod {
    fn from(date: DatePeriod) -> Self {
        Self {
            repr: Repr::Date(date),
        }
    }
}

impl TryFrom<Duration> for DateTimePeriod {
    type Error = PeriodError;

    /// Splits a duration into whole hours, minutes, seconds and sub-second
    /// nanoseconds. The date components are always zero.
    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        let total = duration.as_secs();
        let too_long = PeriodError::DurationTooLong { seconds: total };
        let hours = i32::try_from(total / SECONDS_PER_HOUR).map_err(|_| too_long.clone())?;
        let minutes = i32::try_from(total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE)
            .map_err(|_| too_long.clone())?;
        let seconds = i64::try_from(total % SECONDS_PER_MINUTE).map_err(|_| too_long)?;
        Ok(Self::new(
            0,
            0,
            0,
            hours,
            minutes,
            seconds,
            i64::from(duration.subsec_nanos()),
        ))
    }
}

impl Add for DateTimePeriod {
    type Output = Result<Self, PeriodError>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for DateTimePeriod {
    type Output = Result<Self, PeriodError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl FromStr for DateTimePeriod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateTimePeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateTimePeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

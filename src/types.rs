use std::fmt;

use crate::PeriodError;

/// One of the seven components of a period, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
    Nanoseconds,
}

impl Field {
    /// Every field, in record order
    pub const ALL: [Self; 7] = [
        Self::Years,
        Self::Months,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Nanoseconds,
    ];

    /// The fields a `DatePeriod` can never carry
    pub const CLOCK: [Self; 4] = [Self::Hours, Self::Minutes, Self::Seconds, Self::Nanoseconds];

    /// Field name as used in structural records
    pub const fn name(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Nanoseconds => "nanoseconds",
        }
    }

    /// 0-based position of the field in the record
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks a field up by its record position.
    pub const fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::Years),
            1 => Some(Self::Months),
            2 => Some(Self::Days),
            3 => Some(Self::Hours),
            4 => Some(Self::Minutes),
            5 => Some(Self::Seconds),
            6 => Some(Self::Nanoseconds),
            _ => None,
        }
    }

    /// Looks a field up by its record name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw components of a period, all defaulting to zero.
///
/// This is the plain-data view used to build a [`DateTimePeriod`](crate::DateTimePeriod)
/// with only some components set:
///
/// ```
/// use datetime_period::{DateTimePeriod, PeriodComponents};
///
/// let period = DateTimePeriod::from(PeriodComponents { hours: 2, ..Default::default() });
/// assert_eq!(period.to_string(), "PT2H");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PeriodComponents {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl PeriodComponents {
    /// Returns the value of a single field, widened to `i64`.
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::Years => i64::from(self.years),
            Field::Months => i64::from(self.months),
            Field::Days => i64::from(self.days),
            Field::Hours => i64::from(self.hours),
            Field::Minutes => i64::from(self.minutes),
            Field::Seconds => self.seconds,
            Field::Nanoseconds => self.nanoseconds,
        }
    }

    /// True if any of hours, minutes, seconds or nanoseconds is nonzero
    pub const fn has_clock(&self) -> bool {
        self.hours != 0 || self.minutes != 0 || self.seconds != 0 || self.nanoseconds != 0
    }

    pub fn is_zero(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.get(field) == 0)
    }

    /// True iff every component is `<= 0` and at least one is nonzero.
    /// Mixed-sign components are never negative as a whole.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && Field::ALL.into_iter().all(|field| self.get(field) <= 0)
    }

    /// The first clock field that is nonzero, with its value.
    pub fn first_nonzero_clock(&self) -> Option<(Field, i64)> {
        Field::CLOCK
            .into_iter()
            .map(|field| (field, self.get(field)))
            .find(|&(_, value)| value != 0)
    }

    /// Combines two component sets field by field, failing on the first
    /// field whose operation overflows.
    pub(crate) fn checked_zip(
        self,
        rhs: Self,
        narrow: fn(i32, i32) -> Option<i32>,
        wide: fn(i64, i64) -> Option<i64>,
    ) -> Result<Self, PeriodError> {
        let lift32 = |a, b, field| narrow(a, b).ok_or(PeriodError::Overflow { field });
        let lift64 = |a, b, field| wide(a, b).ok_or(PeriodError::Overflow { field });
        Ok(Self {
            years: lift32(self.years, rhs.years, Field::Years)?,
            months: lift32(self.months, rhs.months, Field::Months)?,
            days: lift32(self.days, rhs.days, Field::Days)?,
            hours: lift32(self.hours, rhs.hours, Field::Hours)?,
            minutes: lift32(self.minutes, rhs.minutes, Field::Minutes)?,
            seconds: lift64(self.seconds, rhs.seconds, Field::Seconds)?,
            nanoseconds: lift64(self.nanoseconds, rhs.nanoseconds, Field::Nanoseconds)?,
        })
    }

    /// Negates every component, failing on a `MIN` value.
    pub(crate) fn checked_neg(self) -> Result<Self, PeriodError> {
        let neg32 = |value: i32, field| value.checked_neg().ok_or(PeriodError::Overflow { field });
        let neg64 = |value: i64, field| value.checked_neg().ok_or(PeriodError::Overflow { field });
        Ok(Self {
            years: neg32(self.years, Field::Years)?,
            months: neg32(self.months, Field::Months)?,
            days: neg32(self.days, Field::Days)?,
            hours: neg32(self.hours, Field::Hours)?,
            minutes: neg32(self.minutes, Field::Minutes)?,
            seconds: neg64(self.seconds, Field::Seconds)?,
            nanoseconds: neg64(self.nanoseconds, Field::Nanoseconds)?,
        })
    }
}

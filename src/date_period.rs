use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DateTimePeriod, Period, PeriodError};

/// A period of whole years, months and days.
///
/// The clock components of a `DatePeriod` are always zero, so call sites
/// that must not deal with hours or seconds can require this type instead
/// of [`DateTimePeriod`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatePeriod {
    years:  i32,
    months: i32,
    days:   i32,
}

impl DatePeriod {
    /// The zero period, printed as `P0D`
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new date period. Components are stored as given.
    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Parses an ISO 8601 period that has no clock components.
    ///
    /// Weeks are accepted and folded into days. A time part is accepted only
    /// if every time component in it is zero.
    ///
    /// # Errors
    /// Returns `PeriodError::Parse` for malformed input and
    /// `PeriodError::NonZeroClockField` if the period has a nonzero clock
    /// component.
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        Self::try_from(DateTimePeriod::parse(s)?)
    }

    /// Component-wise checked addition.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` naming the first field that overflows.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PeriodError> {
        self.components()
            .checked_zip(rhs.components(), i32::checked_add, i64::checked_add)
            .map(|c| Self::new(c.years, c.months, c.days))
    }

    /// Component-wise checked subtraction.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` naming the first field that overflows.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, PeriodError> {
        self.components()
            .checked_zip(rhs.components(), i32::checked_sub, i64::checked_sub)
            .map(|c| Self::new(c.years, c.months, c.days))
    }

    /// Negates every component.
    ///
    /// # Errors
    /// Returns `PeriodError::Overflow` if a component is `i32::MIN`.
    pub fn checked_neg(self) -> Result<Self, PeriodError> {
        self.components()
            .checked_neg()
            .map(|c| Self::new(c.years, c.months, c.days))
    }
}

impl Period for DatePeriod {
    fn years(&self) -> i32 {
        self.years
    }

    fn months(&self) -> i32 {
        self.months
    }

    fn days(&self) -> i32 {
        self.days
    }

    fn hours(&self) -> i32 {
        0
    }

    fn minutes(&self) -> i32 {
        0
    }

    fn seconds(&self) -> i64 {
        0
    }

    fn nanoseconds(&self) -> i64 {
        0
    }
}

// Hashes like the equal `DateTimePeriod` does.
impl Hash for DatePeriod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components().hash(state);
    }
}

impl PartialEq<DateTimePeriod> for DatePeriod {
    fn eq(&self, other: &DateTimePeriod) -> bool {
        self.components() == other.components()
    }
}

impl TryFrom<DateTimePeriod> for DatePeriod {
    type Error = PeriodError;

    fn try_from(period: DateTimePeriod) -> Result<Self, Self::Error> {
        if let Some(date) = period.as_date_period() {
            return Ok(date);
        }
        match period.components().first_nonzero_clock() {
            Some((field, value)) => {
                debug!("period {period} has nonzero {field}, not a date period");
                Err(PeriodError::NonZeroClockField { field, value })
            }
            None => Ok(period.date_part()),
        }
    }
}

impl Add for DatePeriod {
    type Output = Result<Self, PeriodError>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for DatePeriod {
    type Output = Result<Self, PeriodError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl FromStr for DatePeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DatePeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DatePeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, ParseErrorKind};
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_clock_components_are_zero() {
        let period = DatePeriod::new(1, 2, 3);
        assert_eq!(period.years(), 1);
        assert_eq!(period.months(), 2);
        assert_eq!(period.days(), 3);
        assert_eq!(period.hours(), 0);
        assert_eq!(period.minutes(), 0);
        assert_eq!(period.seconds(), 0);
        assert_eq!(period.nanoseconds(), 0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(DatePeriod::parse("P1Y2M3D").unwrap(), DatePeriod::new(1, 2, 3));
        assert_eq!("P1W".parse::<DatePeriod>().unwrap(), DatePeriod::new(0, 0, 7));
        assert_eq!("P1W3D".parse::<DatePeriod>().unwrap(), DatePeriod::new(0, 0, 10));
        // A time part of zeros is still a date period.
        assert_eq!(DatePeriod::parse("P1DT0H").unwrap(), DatePeriod::new(0, 0, 1));
    }

    #[test]
    fn test_parse_rejects_clock_components() {
        let result = DatePeriod::parse("P1DT1H");
        assert_eq!(
            result,
            Err(PeriodError::NonZeroClockField {
                field: Field::Hours,
                value: 1
            })
        );

        let result = DatePeriod::parse("PT0.5S");
        assert!(matches!(
            result,
            Err(PeriodError::NonZeroClockField {
                field: Field::Nanoseconds,
                value: 500_000_000
            })
        ));
    }

    #[test]
    fn test_parse_errors_pass_through() {
        let result = DatePeriod::parse("1Y");
        match result {
            Err(PeriodError::Parse(err)) => assert_eq!(err.position(), 0),
            other => panic!("expected parse error, got {other:?}"),
        }

        let result = DatePeriod::parse("P1M1Y");
        assert!(matches!(
            result,
            Err(PeriodError::Parse(err)) if err.kind() == ParseErrorKind::WrongComponentOrder
        ));
    }

    #[test]
    fn test_try_from_date_time_period() {
        let wide = DateTimePeriod::new(1, 2, 3, 0, 0, 0, 0);
        assert_eq!(DatePeriod::try_from(wide).unwrap(), DatePeriod::new(1, 2, 3));

        let wide = DateTimePeriod::new(1, 2, 3, 0, 4, 0, 0);
        assert_eq!(
            DatePeriod::try_from(wide),
            Err(PeriodError::NonZeroClockField {
                field: Field::Minutes,
                value: 4
            })
        );
    }

    #[test]
    fn test_widening_is_lossless() {
        let period = DatePeriod::new(-3, 0, 9);
        let wide = DateTimePeriod::from(period);
        assert_eq!(wide, period);
        assert_eq!(period, wide);
        assert_eq!(DatePeriod::try_from(wide).unwrap(), period);
        assert_eq!(hash_of(&period), hash_of(&wide));
    }

    #[test]
    fn test_addition() {
        let sum = (DatePeriod::new(1, 0, 0) + DatePeriod::new(0, 1, 0)).unwrap();
        assert_eq!(sum, DatePeriod::new(1, 1, 0));

        let result = DatePeriod::new(i32::MAX, 0, 0) + DatePeriod::new(1, 0, 0);
        assert_eq!(result, Err(PeriodError::Overflow { field: Field::Years }));

        let result = DatePeriod::new(0, 0, i32::MIN) - DatePeriod::new(0, 0, 1);
        assert_eq!(result, Err(PeriodError::Overflow { field: Field::Days }));
    }

    #[test]
    fn test_negation() {
        assert_eq!(
            DatePeriod::new(1, -2, 0).checked_neg().unwrap(),
            DatePeriod::new(-1, 2, 0)
        );
        assert!(DatePeriod::new(0, 0, i32::MIN).checked_neg().is_err());
    }

    #[test]
    fn test_round_trip() {
        let periods = [
            DatePeriod::ZERO,
            DatePeriod::new(1, 2, 3),
            DatePeriod::new(-1, -2, -3),
            DatePeriod::new(1, 0, -1),
            DatePeriod::new(i32::MIN, i32::MAX, 0),
        ];
        for period in periods {
            let printed = period.to_string();
            assert_eq!(DatePeriod::parse(&printed).unwrap(), period, "{printed}");
        }
        assert_eq!(DatePeriod::new(1, 0, -1).to_string(), "P1Y-1D");
    }

    #[test]
    fn test_serde_string_format() {
        let period = DatePeriod::new(2, 0, 5);
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#""P2Y5D""#);
        let parsed: DatePeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_serde_rejects_clock_components() {
        let result: Result<DatePeriod, _> = serde_json::from_str(r#""P1DT2M""#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("expected field 'minutes' to be zero, but was 2"));

        // The same string is a perfectly good DateTimePeriod.
        let wide: DateTimePeriod = serde_json::from_str(r#""P1DT2M""#).unwrap();
        assert_eq!(wide.minutes(), 2);
    }
}

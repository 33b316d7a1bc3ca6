use std::fmt::{self, Write};

use crate::consts::{
    DAYS_DESIGNATOR, DURATION_DESIGNATOR, FRACTION_DIGITS, HOURS_DESIGNATOR,
    MONTHS_OR_MINUTES_DESIGNATOR, SECONDS_DESIGNATOR, TIME_DESIGNATOR, YEARS_DESIGNATOR,
    ZERO_PERIOD_BODY,
};
use crate::{DatePeriod, DateTimePeriod, Period, PeriodComponents};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Writes the canonical ISO 8601 form of a period.
///
/// A period whose nonzero components are all negative is printed with one
/// leading `-` and positive components; any other period prints each
/// component with its own sign. Values are widened before negation so
/// `MIN` components print correctly. The seconds and nanoseconds are
/// printed as a single decimal number of seconds.
fn write_period<W: Write>(out: &mut W, c: &PeriodComponents) -> fmt::Result {
    let negative = c.is_negative();
    let sign: i128 = if negative { -1 } else { 1 };
    if negative {
        out.write_char('-')?;
    }
    out.write_char(char::from(DURATION_DESIGNATOR))?;

    let mut written = false;
    let mut component = |out: &mut W, value: i64, designator: u8| -> fmt::Result {
        if value == 0 {
            return Ok(());
        }
        written = true;
        let printed = sign * i128::from(value);
        let designator = char::from(designator);
        write!(out, "{printed}{designator}")
    };
    component(out, c.years.into(), YEARS_DESIGNATOR)?;
    component(out, c.months.into(), MONTHS_OR_MINUTES_DESIGNATOR)?;
    component(out, c.days.into(), DAYS_DESIGNATOR)?;

    if c.has_clock() {
        out.write_char(char::from(TIME_DESIGNATOR))?;
        component(out, c.hours.into(), HOURS_DESIGNATOR)?;
        component(out, c.minutes.into(), MONTHS_OR_MINUTES_DESIGNATOR)?;
        // Whole seconds carry out of the nanoseconds; "-0" keeps the sign
        // of a sub-second remainder.
        let total = sign * (i128::from(c.seconds) * NANOS_PER_SECOND + i128::from(c.nanoseconds));
        if total != 0 || (c.hours == 0 && c.minutes == 0) {
            if total < 0 {
                out.write_char('-')?;
            }
            let whole = (total / NANOS_PER_SECOND).unsigned_abs();
            let fraction = (total % NANOS_PER_SECOND).unsigned_abs();
            write!(out, "{whole}")?;
            if fraction != 0 {
                write!(out, ".{fraction:0FRACTION_DIGITS$}")?;
            }
            out.write_char(char::from(SECONDS_DESIGNATOR))?;
        }
        written = true;
    }

    if !written {
        out.write_str(ZERO_PERIOD_BODY)?;
    }
    Ok(())
}

impl fmt::Display for DateTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_period(f, &self.components())
    }
}

impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_period(f, &self.components())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(components: PeriodComponents) -> String {
        DateTimePeriod::from(components).to_string()
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(DateTimePeriod::ZERO.to_string(), "P0D");
        assert_eq!(DatePeriod::ZERO.to_string(), "P0D");
    }

    #[test]
    fn test_format_date_components() {
        assert_eq!(DatePeriod::new(1, 2, 3).to_string(), "P1Y2M3D");
        assert_eq!(DatePeriod::new(0, 14, 0).to_string(), "P14M");
        assert_eq!(DatePeriod::new(5, 0, 40).to_string(), "P5Y40D");
    }

    #[test]
    fn test_format_time_components() {
        assert_eq!(
            format(PeriodComponents {
                hours: 1,
                minutes: 90,
                ..Default::default()
            }),
            "PT1H90M"
        );
        assert_eq!(
            format(PeriodComponents {
                days: 1,
                seconds: 30,
                ..Default::default()
            }),
            "P1DT30S"
        );
    }

    #[test]
    fn test_format_fraction_is_nine_digits() {
        assert_eq!(
            format(PeriodComponents {
                seconds: 1,
                nanoseconds: 500_000_000,
                ..Default::default()
            }),
            "PT1.500000000S"
        );
        assert_eq!(
            format(PeriodComponents {
                nanoseconds: 1,
                ..Default::default()
            }),
            "PT0.000000001S"
        );
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(
            format(PeriodComponents {
                years: -1,
                months: -2,
                ..Default::default()
            }),
            "-P1Y2M"
        );
        assert_eq!(
            format(PeriodComponents {
                hours: -1,
                seconds: -2,
                nanoseconds: -5,
                ..Default::default()
            }),
            "-PT1H2.000000005S"
        );
        assert_eq!(
            format(PeriodComponents {
                nanoseconds: -250_000_000,
                ..Default::default()
            }),
            "-PT0.250000000S"
        );
    }

    #[test]
    fn test_format_mixed_signs() {
        assert_eq!(
            format(PeriodComponents {
                years: 1,
                days: -1,
                ..Default::default()
            }),
            "P1Y-1D"
        );
        assert_eq!(
            format(PeriodComponents {
                years: 1,
                seconds: -3,
                nanoseconds: -100_000_000,
                ..Default::default()
            }),
            "P1YT-3.100000000S"
        );
        assert_eq!(
            format(PeriodComponents {
                months: 1,
                nanoseconds: -1,
                ..Default::default()
            }),
            "P1MT-0.000000001S"
        );
    }

    #[test]
    fn test_format_extremes() {
        assert_eq!(
            format(PeriodComponents {
                years: i32::MIN,
                ..Default::default()
            }),
            "-P2147483648Y"
        );
        assert_eq!(
            format(PeriodComponents {
                seconds: i64::MIN,
                ..Default::default()
            }),
            "-PT9223372036854775808S"
        );
        assert_eq!(
            format(PeriodComponents {
                years: i32::MAX,
                months: i32::MIN,
                ..Default::default()
            }),
            "P2147483647Y-2147483648M"
        );
    }

    #[test]
    fn test_format_carries_nanoseconds_into_seconds() {
        let cases = [
            (0, 2_000_000_000, "PT2S"),
            (0, 2_500_000_001, "PT2.500000001S"),
            (1, -1, "PT0.999999999S"),
            (-1, 1, "PT-0.999999999S"),
            (-3, 1_500_000_000, "PT-1.500000000S"),
            (1, -1_000_000_000, "PT0S"),
        ];
        for (seconds, nanoseconds, expected) in cases {
            let period = format(PeriodComponents {
                seconds,
                nanoseconds,
                ..Default::default()
            });
            assert_eq!(period, expected, "{seconds}s {nanoseconds}ns");

            let parsed = DateTimePeriod::parse(&period).unwrap();
            assert_eq!(
                i128::from(parsed.seconds()) * NANOS_PER_SECOND + i128::from(parsed.nanoseconds()),
                i128::from(seconds) * NANOS_PER_SECOND + i128::from(nanoseconds),
                "{period}"
            );
        }
    }

    #[test]
    fn test_format_cancelled_seconds_keep_other_time_components() {
        assert_eq!(
            format(PeriodComponents {
                hours: 1,
                seconds: 1,
                nanoseconds: -1_000_000_000,
                ..Default::default()
            }),
            "PT1H"
        );
        assert_eq!(
            format(PeriodComponents {
                years: 1,
                seconds: -2,
                nanoseconds: 2_000_000_000,
                ..Default::default()
            }),
            "P1YT0S"
        );
    }

    #[test]
    fn test_format_into_string_buffer() {
        let mut out = String::new();
        write_period(&mut out, &DatePeriod::new(0, 0, 7).components()).unwrap();
        assert_eq!(out, "P7D");
    }
}

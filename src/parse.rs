//! Single-pass ISO 8601 period parser.
//!
//! The grammar is a superset of strict ISO 8601 durations:
//!
//! ```text
//! period    ::= sign? 'P' date-part? ('T' time-part)?
//! date-part ::= (int 'Y')? (int 'M')? (int 'W')? (int 'D')?
//! time-part ::= (int 'H')? (int 'M')? (int (('.' | ',') digit+)? 'S')?
//! int       ::= sign? digit+
//! ```
//!
//! with the extra rules that at least one component must follow `P`, and at
//! least one must follow `T`. The input is scanned left to right exactly once;
//! the only state is how far along the designator sequence we are, which is
//! also what decides whether `M` means months or minutes.

use crate::PeriodComponents;
use crate::consts::{
    DAYS_DESIGNATOR, DAYS_PER_WEEK, DURATION_DESIGNATOR, FRACTION_DIGITS, HOURS_DESIGNATOR,
    MONTHS_OR_MINUTES_DESIGNATOR, SECONDS_DESIGNATOR, TIME_DESIGNATOR, WEEKS_DESIGNATOR,
    YEARS_DESIGNATOR,
};
use crate::error::{ParseError, ParseErrorKind};

/// Position in the designator sequence. The derived ordering is the
/// order components must appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    Start,
    AfterP,
    AfterYears,
    AfterMonths,
    AfterWeeks,
    AfterDays,
    AfterT,
    AfterHours,
    AfterMinutes,
    AfterSeconds,
}

impl State {
    /// Whether a component moving the parser into `self` may follow `current`.
    fn may_follow(self, current: Self) -> bool {
        if current >= self {
            return false;
        }
        // Time components need the 'T' first.
        self <= Self::AfterT || current >= Self::AfterT
    }
}

/// A signed number read in front of a designator.
struct Number {
    /// Offset of the component's sign or first digit
    start: usize,
    value: i64,
    negative: bool,
}

/// Parses an ISO 8601 period into its raw components, with weeks already
/// folded into days.
pub(crate) fn parse_components(input: &str) -> Result<PeriodComponents, ParseError> {
    Parser::new(input).run().map_err(|err| {
        trace!("rejected period {input:?}: {err}");
        err
    })
}

struct Parser<'i> {
    text: &'i str,
    bytes: &'i [u8],
    pos: usize,
    state: State,
    negative: bool,
    weeks: i32,
    components: PeriodComponents,
}

impl<'i> Parser<'i> {
    fn new(text: &'i str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            state: State::Start,
            negative: false,
            weeks: 0,
            components: PeriodComponents::default(),
        }
    }

    fn run(mut self) -> Result<PeriodComponents, ParseError> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            if self.state == State::Start {
                self.parse_prefix(byte)?;
            } else {
                self.parse_component(byte)?;
            }
        }
        self.finish()
    }

    /// Optional overall sign followed by the mandatory `P`.
    fn parse_prefix(&mut self, byte: u8) -> Result<(), ParseError> {
        match byte {
            b'+' | b'-' => {
                self.negative = byte == b'-';
                self.pos += 1;
                match self.bytes.get(self.pos) {
                    Some(&DURATION_DESIGNATOR) => self.pos += 1,
                    Some(_) => {
                        let found = self.char_at(self.pos);
                        return Err(self.error(ParseErrorKind::ExpectedDurationDesignator { found }));
                    }
                    None => return Err(self.error(ParseErrorKind::MissingDurationDesignator)),
                }
            }
            DURATION_DESIGNATOR => self.pos += 1,
            _ => {
                let found = self.char_at(self.pos);
                return Err(self.error(ParseErrorKind::ExpectedSignOrDurationDesignator { found }));
            }
        }
        self.state = State::AfterP;
        Ok(())
    }

    /// Either the `T` marker, or a number and its designator.
    fn parse_component(&mut self, byte: u8) -> Result<(), ParseError> {
        if byte == TIME_DESIGNATOR {
            if self.state >= State::AfterT {
                return Err(self.error(ParseErrorKind::RepeatedTimeDesignator));
            }
            self.state = State::AfterT;
            self.pos += 1;
            return Ok(());
        }

        let number = self.parse_number(byte)?;
        let Some(&designator) = self.bytes.get(self.pos) else {
            return Err(self.error(ParseErrorKind::MissingDesignator));
        };
        match designator {
            YEARS_DESIGNATOR => {
                self.enter(State::AfterYears)?;
                self.components.years = narrow(&number, YEARS_DESIGNATOR)?;
            }
            MONTHS_OR_MINUTES_DESIGNATOR if self.state >= State::AfterT => {
                self.enter(State::AfterMinutes)?;
                self.components.minutes = narrow(&number, MONTHS_OR_MINUTES_DESIGNATOR)?;
            }
            MONTHS_OR_MINUTES_DESIGNATOR => {
                self.enter(State::AfterMonths)?;
                self.components.months = narrow(&number, MONTHS_OR_MINUTES_DESIGNATOR)?;
            }
            WEEKS_DESIGNATOR => {
                self.enter(State::AfterWeeks)?;
                self.weeks = narrow(&number, WEEKS_DESIGNATOR)?;
            }
            DAYS_DESIGNATOR => {
                self.enter(State::AfterDays)?;
                self.components.days = narrow(&number, DAYS_DESIGNATOR)?;
            }
            HOURS_DESIGNATOR => {
                self.enter(State::AfterHours)?;
                self.components.hours = narrow(&number, HOURS_DESIGNATOR)?;
            }
            SECONDS_DESIGNATOR => {
                self.enter(State::AfterSeconds)?;
                self.components.seconds = number.value;
            }
            b'.' | b',' => {
                let nanoseconds = self.parse_fraction(&number)?;
                self.enter(State::AfterSeconds)?;
                self.components.seconds = number.value;
                self.components.nanoseconds = nanoseconds;
            }
            _ => {
                let found = self.char_at(self.pos);
                return Err(self.error(ParseErrorKind::UnknownDesignator { found }));
            }
        }
        // Step over the designator.
        self.pos += 1;
        Ok(())
    }

    /// Reads an optionally signed run of digits, leaving the cursor on the
    /// byte after the last digit.
    fn parse_number(&mut self, byte: u8) -> Result<Number, ParseError> {
        let start = self.pos;
        let mut negative = self.negative;
        match byte {
            b'+' | b'-' => {
                if byte == b'-' {
                    negative = !negative;
                }
                self.pos += 1;
                if !self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
                    let sign = char::from(byte);
                    return Err(self.error(ParseErrorKind::ExpectedDigitAfterSign { sign }));
                }
            }
            b'0'..=b'9' => {}
            _ => {
                let found = self.char_at(self.pos);
                return Err(self.error(ParseErrorKind::ExpectedNumber { found }));
            }
        }

        let too_large = ParseError::new(start, ParseErrorKind::NumberTooLarge);
        let mut magnitude: u64 = 0;
        while let Some(&digit) = self.bytes.get(self.pos).filter(|b| b.is_ascii_digit()) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(digit - b'0')))
                .ok_or(too_large)?;
            self.pos += 1;
        }
        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        }
        .ok_or(too_large)?;

        Ok(Number {
            start,
            value,
            negative,
        })
    }

    /// Reads the fractional seconds after a `.` or `,` under the cursor and
    /// returns them as signed nanoseconds. Leaves the cursor on the `S`.
    fn parse_fraction(&mut self, number: &Number) -> Result<i64, ParseError> {
        let separator = char::from(self.bytes[self.pos]);
        self.pos += 1;
        let digits_start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let digits = &self.bytes[digits_start..self.pos];
        if digits.is_empty() {
            return Err(self.error(ParseErrorKind::MissingFraction { separator }));
        }
        if self.bytes.get(self.pos) != Some(&SECONDS_DESIGNATOR) {
            return Err(self.error(ParseErrorKind::MissingSecondsDesignator));
        }

        // Right-pad with zeros or truncate to exactly nanosecond precision.
        let nanoseconds = (0..FRACTION_DIGITS).fold(0i64, |acc, i| {
            let digit = digits.get(i).map_or(0, |d| i64::from(d - b'0'));
            acc * 10 + digit
        });
        Ok(if number.negative {
            -nanoseconds
        } else {
            nanoseconds
        })
    }

    /// Moves to `next`, failing if the designator is out of order or repeated.
    /// Errors point at the designator under the cursor.
    fn enter(&mut self, next: State) -> Result<(), ParseError> {
        if !next.may_follow(self.state) {
            return Err(self.error(ParseErrorKind::WrongComponentOrder));
        }
        self.state = next;
        Ok(())
    }

    fn finish(self) -> Result<PeriodComponents, ParseError> {
        match self.state {
            State::Start => return Err(self.error(ParseErrorKind::MissingDurationDesignator)),
            State::AfterP => return Err(self.error(ParseErrorKind::MissingComponents)),
            State::AfterT => return Err(self.error(ParseErrorKind::MissingTimeComponents)),
            _ => {}
        }
        let days = i64::from(self.components.days) + i64::from(self.weeks) * DAYS_PER_WEEK;
        let days = i32::try_from(days)
            .map_err(|_| ParseError::new(0, ParseErrorKind::TotalDaysOutOfRange))?;
        Ok(PeriodComponents {
            days,
            ..self.components
        })
    }

    fn char_at(&self, pos: usize) -> char {
        self.text
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.pos, kind)
    }
}

/// Checks that a component read into a 32-bit field fits, blaming the
/// start of the number if it does not.
fn narrow(number: &Number, designator: u8) -> Result<i32, ParseError> {
    i32::try_from(number.value).map_err(|_| {
        ParseError::new(
            number.start,
            ParseErrorKind::ComponentOutOfRange {
                designator: char::from(designator),
                value: number.value,
            },
        )
    })
}

use crate::prelude::*;
use crate::types::Field;

/// Why an ISO 8601 period string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseErrorKind {
    #[display(fmt = "unexpected end of input, the 'P' designator is required")]
    MissingDurationDesignator,
    #[display(fmt = "expected '+', '-' or 'P', found {found:?}")]
    ExpectedSignOrDurationDesignator { found: char },
    #[display(fmt = "expected 'P' after the sign, found {found:?}")]
    ExpectedDurationDesignator { found: char },
    #[display(fmt = "unexpected end of input, at least one component is required after 'P'")]
    MissingComponents,
    #[display(fmt = "unexpected end of input, at least one time component is required after 'T'")]
    MissingTimeComponents,
    #[display(fmt = "only one 'T' designator is allowed")]
    RepeatedTimeDesignator,
    #[display(fmt = "expected a sign, a digit or 'T', found {found:?}")]
    ExpectedNumber { found: char },
    #[display(fmt = "expected a digit after {sign:?}")]
    ExpectedDigitAfterSign { sign: char },
    #[display(fmt = "number too large")]
    NumberTooLarge,
    #[display(fmt = "unexpected end of input, expected a designator after the number")]
    MissingDesignator,
    #[display(fmt = "expected a designator after the number, found {found:?}")]
    UnknownDesignator { found: char },
    #[display(
        fmt = "wrong component order: expected 'Y', 'M', 'W', 'D', then 'T', then 'H', 'M', 'S', each at most once"
    )]
    WrongComponentOrder,
    #[display(fmt = "expected at least one digit after {separator:?}")]
    MissingFraction { separator: char },
    #[display(fmt = "expected the 'S' designator after the fraction")]
    MissingSecondsDesignator,
    #[display(fmt = "value {value} of component '{designator}' must fit into a 32-bit signed integer")]
    ComponentOutOfRange { designator: char, value: i64 },
    #[display(fmt = "total days must fit into a 32-bit signed integer")]
    TotalDaysOutOfRange,
}

/// A rejected ISO 8601 period string: the 0-based offset of the offending
/// character and the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "Parse error at position {position}: {kind}")]
pub struct ParseError {
    position: usize,
    kind: ParseErrorKind,
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub(crate) const fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// 0-based offset into the input where parsing failed
    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Error type for period construction, conversion and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// The input was not a valid ISO 8601 period.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A clock field was nonzero where only a date period is allowed.
    #[error("expected field '{field}' to be zero, but was {value}")]
    NonZeroClockField { field: Field, value: i64 },

    /// Checked arithmetic overflowed the width of a field.
    #[error("overflow in field '{field}'")]
    Overflow { field: Field },

    /// A `std::time::Duration` has more hours than fit into the hours field.
    #[error("duration of {seconds} seconds does not fit into a period")]
    DurationTooLong { seconds: u64 },
}

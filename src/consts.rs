/// Designator that starts every period (`P`)
pub const DURATION_DESIGNATOR: u8 = b'P';
/// Designator separating the date part from the time part (`T`)
pub const TIME_DESIGNATOR: u8 = b'T';

/// Years designator, date part only
pub const YEARS_DESIGNATOR: u8 = b'Y';
/// Months designator before `T`, minutes designator after it
pub const MONTHS_OR_MINUTES_DESIGNATOR: u8 = b'M';
/// Weeks designator, folded into days when parsed
pub const WEEKS_DESIGNATOR: u8 = b'W';
/// Days designator, date part only
pub const DAYS_DESIGNATOR: u8 = b'D';
/// Hours designator, time part only
pub const HOURS_DESIGNATOR: u8 = b'H';
/// Seconds designator, time part only
pub const SECONDS_DESIGNATOR: u8 = b'S';

/// Printed in place of any component for the zero period, so it is never a bare `P`
pub const ZERO_PERIOD_BODY: &str = "0D";

/// Number of fractional digits a second is split into
pub const FRACTION_DIGITS: usize = 9;

/// Days in one week, used to fold `W` into days
pub const DAYS_PER_WEEK: i64 = 7;

/// Seconds in one minute
pub(crate) const SECONDS_PER_MINUTE: u64 = 60;
/// Seconds in one hour
pub(crate) const SECONDS_PER_HOUR: u64 = 3600;

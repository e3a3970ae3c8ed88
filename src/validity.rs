//! Trust checks applied before a device time may reach the host clock.

use crate::calendar::CalendarTime;
use crate::registers::RegisterFields;

/// First year the two-digit year plus century flag can express.
pub const MIN_YEAR: u16 = 1900;
/// Last representable year.
pub const MAX_YEAR: u16 = 2099;

/// True when the voltage-low flag reports a stopped oscillator.
///
/// The flag is sticky: hardware sets it on power loss and only a full
/// register write clears it, so elapsed time stays unknown until then.
#[must_use]
pub fn clock_halted(fields: &RegisterFields) -> bool {
    fields.voltage_low
}

/// True when every field is in calendar range and an epoch timestamp can
/// be derived. Month lengths and leap years are checked by chrono.
#[must_use]
pub fn calendar_in_range(time: &CalendarTime) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&time.year) && time.timestamp().is_some()
}

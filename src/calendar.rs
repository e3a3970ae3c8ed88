//! Absolute calendar time derived from, or destined for, the device
//! registers.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::registers::RegisterFields;

/// A UTC calendar timestamp.
///
/// `year` carries the full four-digit year. The device itself can only
/// represent 1900 through 2099: a two-digit year plus the century flag.
/// Values are constructed fresh for every read or write and never
/// persisted.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalendarTime {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    /// Day of week, 0 = Sunday.
    pub weekday: u8,
    pub day_of_month: u8,
    pub month: u8,
    pub year: u16,
}

impl CalendarTime {
    /// Expand decoded registers into a full calendar time.
    ///
    /// The two-digit year is widened with the century flag:
    /// `1900 + 100*century + tens*10 + units`.
    #[must_use]
    pub fn from_fields(fields: &RegisterFields) -> Self {
        CalendarTime {
            second: fields.second(),
            minute: fields.minute(),
            hour: fields.hour(),
            weekday: fields.weekday,
            day_of_month: fields.day_of_month(),
            month: fields.month(),
            year: 1900 + 100 * u16::from(fields.century) + u16::from(fields.two_digit_year()),
        }
    }

    /// Capture a host timestamp for writing to the device.
    #[must_use]
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        CalendarTime {
            second: dt.second() as u8,
            minute: dt.minute() as u8,
            hour: dt.hour() as u8,
            weekday: dt.weekday().num_days_from_sunday() as u8,
            day_of_month: dt.day() as u8,
            month: dt.month() as u8,
            year: dt.year() as u16,
        }
    }

    /// Split back into register digit pairs.
    ///
    /// The voltage-low flag comes out cleared: writing a full time block
    /// asserts the clock is running again. The year keeps the hardware's
    /// truncating behavior; values outside 1900-2099 alias into the wrong
    /// century rather than failing.
    #[must_use]
    pub fn to_fields(&self) -> RegisterFields {
        RegisterFields {
            second_units: self.second % 10,
            second_tens: self.second / 10,
            voltage_low: false,
            minute_units: self.minute % 10,
            minute_tens: self.minute / 10,
            hour_units: self.hour % 10,
            hour_tens: self.hour / 10,
            weekday: self.weekday,
            day_units: self.day_of_month % 10,
            day_tens: self.day_of_month / 10,
            month_units: self.month % 10,
            month_tens: self.month / 10,
            century: self.year >= 2000,
            year_units: (self.year % 2000 % 10) as u8,
            year_tens: (self.year % 2000 / 10 % 10) as u8,
        }
    }

    /// Seconds since the Unix epoch, or `None` when the fields do not
    /// form a real UTC date. The weekday field plays no part; any
    /// consumer of the timestamp recomputes it from the date.
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        let dt = NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day_of_month),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )?;
        Some(dt.and_utc().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;

    #[test]
    fn from_sample_registers() {
        let raw = [0x45, 0x30, 0x12, 0x03, 0x15, 0x89, 0x23];
        let time = CalendarTime::from_fields(&RegisterFields::decode(&raw).unwrap());
        assert_eq!(time.year, 2023);
        assert_eq!(time.month, 9);
        assert_eq!(time.day_of_month, 15);
        assert_eq!(time.hour, 12);
        assert_eq!(time.minute, 30);
        assert_eq!(time.second, 45);
        assert_eq!(time.weekday, 3);

        let expected = Utc
            .with_ymd_and_hms(2023, 9, 15, 12, 30, 45)
            .unwrap()
            .timestamp();
        assert_eq!(time.timestamp(), Some(expected));
    }

    #[test_case(1999, false, 9, 9)]
    #[test_case(2000, true, 0, 0)]
    #[test_case(2023, true, 2, 3)]
    #[test_case(2099, true, 9, 9)]
    #[test_case(1900, false, 0, 0)]
    fn century_split(year: u16, century: bool, tens: u8, units: u8) {
        let time = CalendarTime {
            second: 0,
            minute: 0,
            hour: 0,
            weekday: 0,
            day_of_month: 1,
            month: 1,
            year,
        };
        let fields = time.to_fields();
        assert_eq!(fields.century, century);
        assert_eq!(fields.year_tens, tens);
        assert_eq!(fields.year_units, units);
    }

    #[test_case(1999)]
    #[test_case(2000)]
    #[test_case(2023)]
    #[test_case(2099)]
    fn century_roundtrip(year: u16) {
        let time = CalendarTime {
            second: 59,
            minute: 59,
            hour: 23,
            weekday: 2,
            day_of_month: 31,
            month: 12,
            year,
        };
        assert_eq!(CalendarTime::from_fields(&time.to_fields()), time);
    }

    #[test]
    fn weekday_origin_is_sunday() {
        // 2023-09-15 was a Friday
        let dt = Utc.with_ymd_and_hms(2023, 9, 15, 12, 30, 45).unwrap();
        assert_eq!(CalendarTime::from_datetime(&dt).weekday, 5);

        let sunday = Utc.with_ymd_and_hms(2023, 9, 17, 0, 0, 0).unwrap();
        assert_eq!(CalendarTime::from_datetime(&sunday).weekday, 0);
    }

    #[test]
    fn write_image_clears_voltage_low() {
        let dt = Utc.with_ymd_and_hms(2024, 2, 29, 6, 7, 8).unwrap();
        let fields = CalendarTime::from_datetime(&dt).to_fields();
        assert!(!fields.voltage_low);
        assert_eq!(fields.day_of_month(), 29);
        assert_eq!(fields.month(), 2);
    }

    #[test]
    fn bad_fields_have_no_timestamp() {
        let time = CalendarTime {
            second: 0,
            minute: 0,
            hour: 0,
            weekday: 0,
            day_of_month: 30,
            month: 2,
            year: 2023,
        };
        assert_eq!(time.timestamp(), None);
    }
}

//! BM8563 time register block codec.
//!
//! The chip keeps seconds through years in seven consecutive registers
//! starting at address 0x02, each calendar field stored as packed BCD
//! digits. Bit layout (MSB to LSB, offsets relative to 0x02):
//!
//! | Byte | Bits 7..0                          |
//! |------|------------------------------------|
//! | 0    | VL, SEC_TEN[2:0], SEC[3:0]         |
//! | 1    | -, MIN_TEN[2:0], MIN[3:0]          |
//! | 2    | -, -, HOUR_TEN[1:0], HOUR[3:0]     |
//! | 3    | -, -, -, -, -, WEEKDAY[2:0]        |
//! | 4    | -, -, DAY_TEN[1:0], DAY[3:0]       |
//! | 5    | CENTURY, -, MONTH_TEN, MONTH[3:0]  |
//! | 6    | YEAR_TEN[3:0], YEAR[3:0]           |

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// First register of the time block.
pub const TIME_REGISTER: u8 = 0x02;

/// Decoded view of the seven time registers.
///
/// Digits are held exactly as the hardware stores them: one field per BCD
/// digit, plus the two flag bits that share bytes with digits. Decoding
/// performs no range validation; see [`crate::validity`] for that.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RegisterFields {
    pub second_units: u8,
    pub second_tens: u8,
    /// Voltage-low flag, set by hardware when the oscillator lost power.
    pub voltage_low: bool,
    pub minute_units: u8,
    pub minute_tens: u8,
    pub hour_units: u8,
    pub hour_tens: u8,
    /// Free-running weekly counter, 0 = Sunday.
    pub weekday: u8,
    pub day_units: u8,
    pub day_tens: u8,
    pub month_units: u8,
    pub month_tens: u8,
    /// Century flag: clear selects the 1900s, set the 2000s.
    pub century: bool,
    pub year_units: u8,
    pub year_tens: u8,
}

impl RegisterFields {
    /// Size of the register block in bytes.
    pub const LEN: usize = 7;

    /// Decode from raw register bytes. Returns `None` if there are not
    /// enough bytes for the full block.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::LEN {
            return None;
        }
        Some(RegisterFields {
            second_units: buf[0] & 0xf,
            second_tens: buf[0] >> 4 & 0x7,
            voltage_low: buf[0] >> 7 & 0x1 == 1,
            minute_units: buf[1] & 0xf,
            minute_tens: buf[1] >> 4 & 0x7,
            hour_units: buf[2] & 0xf,
            hour_tens: buf[2] >> 4 & 0x3,
            weekday: buf[3] & 0x7,
            day_units: buf[4] & 0xf,
            day_tens: buf[4] >> 4 & 0x3,
            month_units: buf[5] & 0xf,
            month_tens: buf[5] >> 4 & 0x1,
            century: buf[5] >> 7 & 0x1 == 1,
            year_units: buf[6] & 0xf,
            year_tens: buf[6] >> 4 & 0xf,
        })
    }

    /// Pack back into raw register bytes.
    ///
    /// Every digit is masked to its hardware bit width first; the tens
    /// fields are narrower than a full decimal digit (hour tens is only
    /// 2 bits) and an oversized value would otherwise bleed into
    /// neighboring bits.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::LEN] {
        [
            u8::from(self.voltage_low) << 7 | (self.second_tens & 0x7) << 4 | self.second_units & 0xf,
            (self.minute_tens & 0x7) << 4 | self.minute_units & 0xf,
            (self.hour_tens & 0x3) << 4 | self.hour_units & 0xf,
            self.weekday & 0x7,
            (self.day_tens & 0x3) << 4 | self.day_units & 0xf,
            u8::from(self.century) << 7 | (self.month_tens & 0x1) << 4 | self.month_units & 0xf,
            (self.year_tens & 0xf) << 4 | self.year_units & 0xf,
        ]
    }

    // Combined decimal values. BCD means digit-wise arithmetic, not a
    // straight binary reinterpretation of the byte.
    #[must_use]
    pub fn second(&self) -> u8 {
        self.second_tens * 10 + self.second_units
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute_tens * 10 + self.minute_units
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour_tens * 10 + self.hour_units
    }

    #[must_use]
    pub fn day_of_month(&self) -> u8 {
        self.day_tens * 10 + self.day_units
    }

    #[must_use]
    pub fn month(&self) -> u8 {
        self.month_tens * 10 + self.month_units
    }

    /// Year within the century, 0-99 for in-range digit values.
    #[must_use]
    pub fn two_digit_year(&self) -> u8 {
        self.year_tens * 10 + self.year_units
    }
}

impl Display for RegisterFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}:{}{}:{}{} {}{}{}-{}{}-{}{} VL:{}",
            self.hour_tens,
            self.hour_units,
            self.minute_tens,
            self.minute_units,
            self.second_tens,
            self.second_units,
            if self.century { 20 } else { 19 },
            self.year_tens,
            self.year_units,
            self.month_tens,
            self.month_units,
            self.day_tens,
            self.day_units,
            if self.voltage_low { "on" } else { "off" },
        )
    }
}

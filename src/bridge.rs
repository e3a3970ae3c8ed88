//! Bidirectional synchronization between the device and the host clock.

use std::io;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::calendar::CalendarTime;
use crate::registers::{RegisterFields, TIME_REGISTER};
use crate::validity;
use crate::{Error, Result};

/// Control/status register pair zeroed during [`ClockBridge::initialize`].
const CONTROL_REGISTER: u8 = 0x00;

/// Raw byte transport to the device, one blocking bus transaction per
/// call. A short transfer is a failure; implementations should move the
/// full requested length or return an error.
pub trait Transport {
    /// Read `len` bytes starting at `register`.
    fn read(&mut self, register: u8, len: usize) -> io::Result<Vec<u8>>;
    /// Write `buf` starting at `register`.
    fn write(&mut self, register: u8, buf: &[u8]) -> io::Result<()>;
}

/// Host clock subsystem the device time is synchronized against.
pub trait HostClock {
    /// Current UTC time, or `None` while the host has no established
    /// time yet.
    fn now_utc(&self) -> Option<DateTime<Utc>>;
    /// Accept `epoch_seconds` as the new authoritative time.
    fn synchronize(&mut self, epoch_seconds: i64);
}

/// Moves time between a BM8563 and the host clock.
///
/// Stateless between calls; every method is one complete, independent
/// transaction, and the only persistent state is the register block
/// inside the chip. Exclusive bus access is expressed through `&mut
/// self`; callers sharing one device must serialize on the bridge
/// instance.
pub struct ClockBridge<T, H> {
    transport: T,
    host: H,
}

impl<T, H> ClockBridge<T, H>
where
    T: Transport,
    H: HostClock,
{
    pub fn new(transport: T, host: H) -> Self {
        ClockBridge { transport, host }
    }

    /// Give back the transport and host clock.
    pub fn release(self) -> (T, H) {
        (self.transport, self.host)
    }

    /// Zero the control/status registers, then probe the time block.
    ///
    /// An error from this very first exchange means the device is not
    /// answering at all; callers should treat that as device-unavailable
    /// and stop scheduling syncs, unlike a transient per-tick failure.
    ///
    /// # Errors
    /// [`Error::Transport`] or [`Error::ShortTransfer`] on a failed
    /// exchange.
    pub fn initialize(&mut self) -> Result<()> {
        self.transport.write(CONTROL_REGISTER, &[0, 0])?;
        self.read_registers()?;
        Ok(())
    }

    /// Read the device time and push it to the host clock as the new
    /// authoritative time.
    ///
    /// Only the epoch timestamp is pushed; the host recomputes weekday
    /// and day-of-year from it, so the chip's weekday register never
    /// influences the result.
    ///
    /// # Errors
    /// [`Error::Transport`] or [`Error::ShortTransfer`] on a failed read,
    /// [`Error::ClockHalted`] when the voltage-low flag is set, and
    /// [`Error::InvalidCalendar`] when the decoded fields do not form a
    /// real date. None of these are fatal; the owning scheduler is
    /// expected to retry on its next tick.
    pub fn read_and_sync(&mut self) -> Result<()> {
        let fields = self.read_registers()?;
        if validity::clock_halted(&fields) {
            warn!("clock halted, not syncing to host clock");
            return Err(Error::ClockHalted);
        }
        let time = CalendarTime::from_fields(&fields);
        if !validity::calendar_in_range(&time) {
            error!("invalid device time, not syncing to host clock");
            return Err(Error::InvalidCalendar);
        }
        // in-range guarantees the timestamp exists
        let timestamp = time.timestamp().ok_or(Error::InvalidCalendar)?;
        self.host.synchronize(timestamp);
        Ok(())
    }

    /// Write the host clock's current time into the device.
    ///
    /// The written block carries a cleared voltage-low flag: a freshly
    /// set clock is valid by definition.
    ///
    /// # Errors
    /// [`Error::HostClockInvalid`] while the host has no established
    /// time, or [`Error::Transport`] on a failed bus write.
    pub fn write_from_host(&mut self) -> Result<()> {
        let Some(now) = self.host.now_utc() else {
            error!("host time not valid, not syncing to device");
            return Err(Error::HostClockInvalid);
        };
        let fields = CalendarTime::from_datetime(&now).to_fields();
        self.transport.write(TIME_REGISTER, &fields.encode())?;
        debug!("wrote {fields}");
        Ok(())
    }

    fn read_registers(&mut self) -> Result<RegisterFields> {
        let raw = self.transport.read(TIME_REGISTER, RegisterFields::LEN)?;
        let fields = RegisterFields::decode(&raw).ok_or(Error::ShortTransfer {
            wanted: RegisterFields::LEN,
            got: raw.len(),
        })?;
        debug!("read {fields}");
        Ok(fields)
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Bus transfer failed.
    #[error(transparent)]
    Transport(#[from] std::io::Error),
    /// Bus transfer moved fewer bytes than requested.
    #[error("short transfer: wanted {wanted} bytes, got {got}")]
    ShortTransfer { wanted: usize, got: usize },

    /// Voltage-low flag set; the oscillator stopped at some point and
    /// elapsed time is unknown.
    #[error("clock halted, time cannot be trusted")]
    ClockHalted,
    /// Decoded registers do not form a real calendar date.
    #[error("invalid calendar time")]
    InvalidCalendar,
    /// Host clock has no established time yet.
    #[error("host clock not valid")]
    HostClockInvalid,
}

pub type Result<T> = std::result::Result<T, Error>;

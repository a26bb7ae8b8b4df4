/// Sentinel text reported for every failure except corruption
pub const NO_DATA: &str = "ERROR NO DATA";

/// Sentinel text reported when unprintable bytes arrived without a marker
pub const DATA_CORRUPTED: &str = "DATA CORRUPTED";

/// Errors returned by the crate
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Command index is outside the command table
    InvalidIndex,
    /// Timed out while waiting for an end marker
    Timeout,
    /// Response buffer filled up before an end marker was seen
    BufferFull,
    /// Bytes outside the printable range arrived, and no end marker was seen.
    ///
    /// This is a heuristic on the captured bytes, not a checksum.
    Corrupted,
    /// Asked to read a response without any end markers
    NoMarkers,
    /// Serial read error
    Read,
    /// Serial write error
    Write,
}

impl Error {
    /// The sentinel string this error is reported as.
    ///
    /// Only [`Error::Corrupted`] maps to [`DATA_CORRUPTED`], everything else
    /// maps to [`NO_DATA`].
    pub const fn sentinel(&self) -> &'static str {
        match self {
            Error::Corrupted => DATA_CORRUPTED,
            Error::InvalidIndex
            | Error::Timeout
            | Error::BufferFull
            | Error::NoMarkers
            | Error::Read
            | Error::Write => NO_DATA,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.sentinel())
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinels() {
        assert_eq!(Error::Corrupted.sentinel(), "DATA CORRUPTED");
        for e in [
            Error::InvalidIndex,
            Error::Timeout,
            Error::BufferFull,
            Error::NoMarkers,
            Error::Read,
            Error::Write,
        ] {
            assert_eq!(e.sentinel(), "ERROR NO DATA");
        }
    }

    #[test]
    fn display_is_sentinel() {
        assert_eq!(Error::Timeout.to_string(), NO_DATA);
        assert_eq!(Error::Corrupted.to_string(), DATA_CORRUPTED);
    }
}

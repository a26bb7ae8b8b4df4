/// Byte slice helpers used while scanning modem output.
pub trait SliceExt {
    /// Position of the first occurrence of `needle`, if any.
    ///
    /// An empty needle is found at position 0, like `strstr` does.
    fn find(&self, needle: &[u8]) -> Option<usize>;

    /// Whether every byte is printable ASCII or one of `\r` / `\n`.
    fn is_printable(&self) -> bool;
}

impl SliceExt for [u8] {
    fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.windows(needle.len())
            .position(|window| window == needle)
    }

    fn is_printable(&self) -> bool {
        self.iter()
            .all(|&c| matches!(c, b'\r' | b'\n' | 0x20..=0x7E))
    }
}

/// Renders a byte buffer as a string when it is valid UTF-8, and as raw bytes
/// otherwise.
pub struct LossyStr<'a>(pub &'a [u8]);

impl core::fmt::Debug for LossyStr<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match core::str::from_utf8(self.0) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LossyStr<'_> {
    fn format(&self, fmt: defmt::Formatter) {
        match core::str::from_utf8(self.0) {
            Ok(s) => defmt::write!(fmt, "{:?}", s),
            Err(_) => defmt::write!(fmt, "{:?}", self.0),
        }
    }
}

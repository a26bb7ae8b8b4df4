use heapless::Vec;

use crate::{helpers::SliceExt, Error};

/// Capacity of a captured response. At most `RESPONSE_CAPACITY - 1` bytes
/// are ever read for a single response.
pub const RESPONSE_CAPACITY: usize = 512;

/// End markers used when the caller does not supply any.
pub const DEFAULT_MARKERS: &[&[u8]] = &[b"\r\nOK\r\n", b"\r\nERROR\r\n", b"> "];

/// A response that ended with one of the requested markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    buf: Vec<u8, RESPONSE_CAPACITY>,
    marker: usize,
}

impl Response {
    pub(crate) fn new(buf: Vec<u8, RESPONSE_CAPACITY>, marker: usize) -> Self {
        Self { buf, marker }
    }

    /// All captured bytes, including the marker.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf).ok()
    }

    /// Index into the marker set of the marker that ended the response.
    pub fn marker(&self) -> usize {
        self.marker
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8, RESPONSE_CAPACITY> {
        self.buf
    }
}

impl AsRef<[u8]> for Response {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

/// Index of the first marker, in order, found anywhere in `buf`.
pub(crate) fn match_marker(buf: &[u8], markers: &[&[u8]]) -> Option<usize> {
    markers.iter().position(|marker| buf.find(marker).is_some())
}

/// Classify bytes captured without ever seeing an end marker.
pub(crate) fn classify_unterminated(buf: &[u8]) -> Error {
    if !buf.is_printable() {
        Error::Corrupted
    } else if buf.len() >= RESPONSE_CAPACITY - 1 {
        Error::BufferFull
    } else {
        Error::Timeout
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_marker_in_order_wins() {
        assert_eq!(match_marker(b"+CSQ: 21,0\r\n\r\nOK\r\n", DEFAULT_MARKERS), Some(0));
        assert_eq!(match_marker(b"\r\nERROR\r\n", DEFAULT_MARKERS), Some(1));
        assert_eq!(match_marker(b"\r\n> ", DEFAULT_MARKERS), Some(2));
        assert_eq!(match_marker(b"> \r\nOK\r\n", DEFAULT_MARKERS), Some(0));
        assert_eq!(match_marker(b"\r\nOK\r", DEFAULT_MARKERS), None);
        assert_eq!(match_marker(b"\r\nOK\r\n", &[]), None);
    }

    #[test]
    fn classify() {
        assert_eq!(classify_unterminated(b""), Error::Timeout);
        assert_eq!(classify_unterminated(b"\r\n+CSQ: 21,0\r\n"), Error::Timeout);
        assert_eq!(classify_unterminated(b"\r\n+CSQ\x01"), Error::Corrupted);
        assert_eq!(classify_unterminated(&[b'A'; RESPONSE_CAPACITY - 1]), Error::BufferFull);

        let mut garbage = [b'A'; RESPONSE_CAPACITY - 1];
        garbage[100] = 0x80;
        assert_eq!(classify_unterminated(&garbage), Error::Corrupted);
    }

    #[test]
    fn accessors() {
        let response = Response::new(Vec::from_slice(b"\r\nOK\r\n").unwrap(), 0);
        assert_eq!(response.as_bytes(), b"\r\nOK\r\n");
        assert_eq!(response.as_str(), Some("\r\nOK\r\n"));
        assert_eq!(response.len(), 6);
        assert!(!response.is_empty());
        assert_eq!(response.marker(), 0);

        let response = Response::new(Vec::from_slice(&[0xFF, b'>', b' ']).unwrap(), 2);
        assert_eq!(response.as_str(), None);
    }

    #[test]
    fn into_inner_and_as_ref() {
        let response = Response::new(Vec::from_slice(b"\r\n> ").unwrap(), 2);
        assert_eq!(response.as_ref(), b"\r\n> ");

        let buf = response.into_inner();
        assert_eq!(buf.as_slice(), b"\r\n> ");
        assert_eq!(buf.capacity(), RESPONSE_CAPACITY);
    }
}

use std::collections::VecDeque;

use embassy_time::{Duration, Instant};
use embedded_io::ErrorType;

/// Scripted serial port. Received bytes become readable at a fixed offset
/// from the moment the mock was created.
pub struct SerialMock {
    start: Instant,
    rx: VecDeque<(Duration, u8)>,
    pub written: Vec<u8>,
    pub flushes: usize,
    pub consumed: usize,
    pub fail_read: bool,
    pub fail_write: bool,
}

#[derive(Debug)]
pub struct IoError;

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

impl SerialMock {
    pub fn new() -> Self {
        SerialMock {
            start: Instant::now(),
            rx: VecDeque::new(),
            written: Vec::new(),
            flushes: 0,
            consumed: 0,
            fail_read: false,
            fail_write: false,
        }
    }

    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut mock = Self::new();
        mock.push_rx_after(Duration::from_ticks(0), bytes);
        mock
    }

    pub fn push_rx_after(&mut self, delay: Duration, bytes: &[u8]) {
        self.rx.extend(bytes.iter().map(|&b| (delay, b)));
    }

    /// Bytes scripted but not yet read
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    fn due(&self) -> bool {
        self.rx
            .front()
            .is_some_and(|(delay, _)| self.start + *delay <= Instant::now())
    }
}

impl ErrorType for SerialMock {
    type Error = IoError;
}

impl embedded_io::ReadReady for SerialMock {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if self.fail_read {
            return Err(IoError);
        }
        Ok(self.due())
    }
}

impl embedded_io::Read for SerialMock {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_read {
            return Err(IoError);
        }
        if buf.is_empty() || !self.due() {
            return Ok(0);
        }
        match self.rx.pop_front() {
            Some((_, b)) => {
                buf[0] = b;
                self.consumed += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl embedded_io::Write for SerialMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_write {
            return Err(IoError);
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_write {
            return Err(IoError);
        }
        self.flushes += 1;
        Ok(())
    }
}

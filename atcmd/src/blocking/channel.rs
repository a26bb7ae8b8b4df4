use embassy_time::Duration;
use embedded_io::{Read, ReadReady, Write};
use heapless::Vec;

use super::{timer::BlockingTimer, AtClient};
use crate::{
    command::{Assembled, Terminator},
    helpers::LossyStr,
    response::{classify_unterminated, match_marker},
    CommandTable, Config, Error, Request, Response, RESPONSE_CAPACITY,
};

/// Channel responsible for assembling commands, writing them to the serial
/// transport and scanning the received bytes for an end marker.
///
/// Only one exchange is ever in flight. Every response is returned by value,
/// so nothing is shared between consecutive commands.
pub struct CommandChannel<T>
where
    T: Read + ReadReady + Write,
{
    transport: T,
    table: CommandTable,
    cooldown_timer: Option<BlockingTimer>,
    config: Config,
}

impl<T> CommandChannel<T>
where
    T: Read + ReadReady + Write,
{
    /// Create a channel using the built-in [`COMMANDS`] table.
    ///
    /// [`COMMANDS`]: crate::COMMANDS
    pub fn new(transport: T, config: Config) -> Self {
        Self::with_table(transport, CommandTable::DEFAULT, config)
    }

    pub fn with_table(transport: T, table: CommandTable, config: Config) -> Self {
        Self {
            transport,
            table,
            cooldown_timer: None,
            config,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Human readable form of `request`, with the carriage return written as
    /// a printable `\r` escape. Nothing is transmitted.
    pub fn format(&self, request: &Request<'_>) -> Result<Vec<u8, RESPONSE_CAPACITY>, Error> {
        self.table
            .assemble(request, Terminator::Escaped)
            .map(Assembled::into_display)
    }

    fn send_inner(&mut self, assembled: &Assembled) -> Result<(), Error> {
        let display = assembled.display();
        if display.len() < 50 {
            debug!("Sending command: {:?}", LossyStr(display));
        } else {
            debug!("Sending command with long payload ({} bytes)", display.len());
        }

        self.transport
            .write_all(assembled.wire())
            .map_err(|_| Error::Write)?;
        self.transport.flush().map_err(|_| Error::Write)?;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.transport.read_ready().map_err(|_| Error::Read)? {
            return Ok(None);
        }

        let mut byte = [0; 1];
        match self.transport.read(&mut byte) {
            Ok(1) => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(_) => Err(Error::Read),
        }
    }

    fn start_cooldown_timer(&mut self) {
        self.cooldown_timer = Some(BlockingTimer::after(self.config.cmd_cooldown));
    }

    fn wait_cooldown_timer(&mut self) {
        if let Some(cooldown) = self.cooldown_timer.take() {
            cooldown.wait();
        }
    }
}

impl<T> AtClient for CommandChannel<T>
where
    T: Read + ReadReady + Write,
{
    fn send(&mut self, request: &Request<'_>) -> Result<Option<Response>, Error> {
        let assembled = match self.table.assemble(request, Terminator::CarriageReturn) {
            Ok(assembled) => assembled,
            Err(e) => {
                error!("Invalid command index {}", request.index);
                return Err(e);
            }
        };

        self.wait_cooldown_timer();

        let response = self.send_inner(&assembled).and_then(|()| {
            if request.expects_response {
                self.read_response(request.timeout).map(Some)
            } else {
                Ok(None)
            }
        });

        self.start_cooldown_timer();
        response
    }

    fn read_response_with(
        &mut self,
        timeout: Duration,
        markers: &[&[u8]],
    ) -> Result<Response, Error> {
        if markers.is_empty() {
            warn!("No end markers given, not reading a response");
            return Err(Error::NoMarkers);
        }

        let deadline = BlockingTimer::after(timeout);
        let mut buf = Vec::<u8, RESPONSE_CAPACITY>::new();

        while !deadline.is_expired() && buf.len() < RESPONSE_CAPACITY - 1 {
            let Some(c) = self.read_byte()? else {
                BlockingTimer::after(self.config.poll_interval).wait();
                continue;
            };

            trace!("Received byte {:?}", c);
            buf.push(c).map_err(|_| Error::BufferFull)?;

            if let Some(marker) = match_marker(&buf, markers) {
                debug!("Captured response: {:?}", LossyStr(&buf));
                return Ok(Response::new(buf, marker));
            }
        }

        let e = classify_unterminated(&buf);
        debug!(
            "No end marker in {} received bytes ({:?}): {:?}",
            buf.len(),
            e,
            LossyStr(&buf)
        );
        Err(e)
    }
}

mod channel;
mod timer;

pub use channel::CommandChannel;

use embassy_time::Duration;

use crate::{Error, Request, Response, DEFAULT_MARKERS};

pub trait AtClient {
    /// Send an AT command.
    ///
    /// The command is written to the transport exactly once. If the request
    /// expects a response, this blocks until an end marker is received or
    /// the request timeout elapses, and returns the captured response.
    /// Otherwise it returns `Ok(None)` as soon as the command is written.
    ///
    /// Nothing is retried. Retrying is left to the caller.
    fn send(&mut self, request: &Request<'_>) -> Result<Option<Response>, Error>;

    /// Read from the transport until one of `markers` is seen anywhere in
    /// the received bytes, the response buffer is full, or `timeout` elapses.
    fn read_response_with(
        &mut self,
        timeout: Duration,
        markers: &[&[u8]],
    ) -> Result<Response, Error>;

    /// Same as [`read_response_with`], using [`DEFAULT_MARKERS`].
    ///
    /// [`read_response_with`]: AtClient::read_response_with
    fn read_response(&mut self, timeout: Duration) -> Result<Response, Error> {
        self.read_response_with(timeout, DEFAULT_MARKERS)
    }
}

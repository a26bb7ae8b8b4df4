//! A small helper crate for talking to modem-like peripherals over a serial
//! port using AT commands.
//!
//! Commands are picked by index from a static [`CommandTable`], optionally
//! decorated with a [`Modifier`] or a parameter, and written to any transport
//! implementing the [`embedded_io`] `Read`, `ReadReady` and `Write` traits. The
//! response is then read byte by byte until one of a set of end markers shows
//! up, the response buffer is full, or a timeout elapses.
//!
//! Exactly one command/response exchange is in flight at a time, and the
//! calling thread is blocked for the duration of it.
//!
//! # Examples
//!
//! ```ignore
//! use atcmd::{blocking::{AtClient, CommandChannel}, Command, Config, Request};
//! use embassy_time::Duration;
//!
//! let mut channel = CommandChannel::new(serial, Config::new());
//!
//! // AT+CSQ?\r
//! match channel.send(&Request::new(Command::SignalQuality).query()) {
//!     Ok(Some(response)) => {
//!         // Do something with response.as_bytes() here
//!     }
//!     Ok(None) => {}
//!     Err(e) => {
//!         // Either "ERROR NO DATA" or "DATA CORRUPTED"
//!         let _ = e.sentinel();
//!     }
//! }
//!
//! // ATD=1234\r, waiting up to 20 seconds for the call to be set up
//! let dial = Request::new(Command::Dial)
//!     .param("1234")
//!     .timeout(Duration::from_secs(20));
//! let _ = channel.send(&dial);
//!
//! // Debug form without any I/O: `AT+COPS=?\r` with a printable `\r`
//! let shown = channel.format(&Request::new(Command::OperatorSelection).test());
//! ```
//!
//! # Optional Cargo Features
//!
//! - **`log`** *(disabled by default)*: Logs outgoing commands and captured
//!   responses on the `DEBUG` level, and every received byte on `TRACE`.
//! - **`defmt`** *(disabled by default)*: Same as `log`, through `defmt`.
//! - **`std`** *(disabled by default)*: Enables the `std` support of
//!   `embedded-io` and `embassy-time`.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod blocking;
mod command;
mod config;
mod error;
pub mod helpers;
mod response;

#[cfg(test)]
mod serial_mock;

pub use command::{
    Assembled, Command, CommandTable, Modifier, Request, Terminator, COMMANDS, COMMAND_CAPACITY,
    DEFAULT_TIMEOUT,
};
pub use config::Config;
pub use error::{Error, DATA_CORRUPTED, NO_DATA};
pub use response::{Response, DEFAULT_MARKERS, RESPONSE_CAPACITY};

pub mod prelude {
    //! The prelude is a collection of all the traits in this crate
    //!
    //! The traits have been renamed to avoid collisions with other items when
    //! performing a glob import.
    pub use crate::blocking::AtClient as _atcmd_AtClient;
    pub use crate::helpers::SliceExt as _atcmd_SliceExt;
}

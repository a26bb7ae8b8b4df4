//! Talks to a modem attached to a host serial port.
//!
//! Usage: `std-serial <port> [baud]`, e.g. `std-serial /dev/ttyUSB0 115200`.
//! Run with `RUST_LOG=debug` to see the raw traffic.

use std::io;
use std::time::Duration as StdDuration;

use atcmd::{
    blocking::{AtClient, CommandChannel},
    helpers::LossyStr,
    Command, Config, Request,
};
use embassy_time::Duration;
use embedded_io::ErrorType;
use serialport::SerialPort;

/// Adapts a `serialport` port to the `embedded-io` traits the channel needs.
struct Serial(Box<dyn SerialPort>);

impl ErrorType for Serial {
    type Error = io::Error;
}

impl embedded_io::ReadReady for Serial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.bytes_to_read()? > 0)
    }
}

impl embedded_io::Read for Serial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        io::Read::read(&mut self.0, buf)
    }
}

impl embedded_io::Write for Serial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        io::Write::write(&mut self.0, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        io::Write::flush(&mut self.0)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: std-serial <port> [baud]")?;
    let baud = match args.next() {
        Some(baud) => baud.parse()?,
        None => 115_200,
    };

    let port = serialport::new(&path, baud)
        .timeout(StdDuration::from_millis(10))
        .open()?;
    log::info!("Opened {} at {} baud", path, baud);

    let mut channel = CommandChannel::new(Serial(port), Config::new());

    let requests = [
        Request::new(Command::At),
        Request::new(Command::SignalQuality).query(),
        Request::new(Command::OperatorSelection)
            .test()
            .timeout(Duration::from_secs(30)),
    ];

    for request in &requests {
        let shown = channel.format(request)?;
        match channel.send(request) {
            Ok(Some(response)) => {
                println!("{:?} -> {:?}", LossyStr(&shown), LossyStr(response.as_bytes()))
            }
            Ok(None) => println!("{:?} -> (not awaited)", LossyStr(&shown)),
            Err(e) => println!("{:?} -> {}", LossyStr(&shown), e),
        }
    }

    Ok(())
}

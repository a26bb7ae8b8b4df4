use embassy_time::Duration;
use heapless::Vec;

use crate::{Error, RESPONSE_CAPACITY};

/// Capacity of the buffer holding the bytes put on the wire.
///
/// One slot is always left unused, so an assembled command is at most
/// `COMMAND_CAPACITY - 1` bytes long.
pub const COMMAND_CAPACITY: usize = 255;

/// Response timeout used unless a [`Request`] says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// The built-in command table, indexed by [`Command`].
pub const COMMANDS: [&str; 15] = [
    "AT",
    "ATE1",
    "AT+CLIP",
    "AT+CSDVC",
    "AT+CBC",
    "AT+CSQ",
    "AT+CGMI",
    "AT+CGSN",
    "ATI",
    "AT+IPR",
    "AT+CPOWD",
    "ATD",
    "AT+COPS",
    "AT+CMGS",
    "A/",
];

/// Named indices into [`COMMANDS`].
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// `AT`, check that the module replies
    At = 0,
    /// `ATE1`, enable echo
    EchoOn,
    /// `AT+CLIP`, calling line identification presentation
    CallerId,
    /// `AT+CSDVC`, speaker output
    SpeakerOutput,
    /// `AT+CBC`, battery charge status
    BatteryCharge,
    /// `AT+CSQ`, signal quality
    SignalQuality,
    /// `AT+CGMI`, manufacturer identification
    Manufacturer,
    /// `AT+CGSN`, device serial number
    SerialNumber,
    /// `ATI`, product identification
    ProductInfo,
    /// `AT+IPR`, baud rate, usually queried
    BaudRate,
    /// `AT+CPOWD`, power off
    PowerOff,
    /// `ATD`, dial a number or memory location
    Dial,
    /// `AT+COPS`, operator selection
    OperatorSelection,
    /// `AT+CMGS`, send SMS
    SendSms,
    /// `A/`, re-issue the last command
    RepeatLast,
}

impl Command {
    pub const fn text(self) -> &'static str {
        COMMANDS[self as usize]
    }
}

impl From<Command> for Request<'_> {
    fn from(cmd: Command) -> Self {
        Request::new(cmd)
    }
}

impl From<u8> for Request<'_> {
    fn from(index: u8) -> Self {
        Request::from_index(index)
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd as u8
    }
}

/// Read-only mapping from a small index to command text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommandTable {
    commands: &'static [&'static str],
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CommandTable {
    pub const DEFAULT: Self = Self::new(&COMMANDS);

    pub const fn new(commands: &'static [&'static str]) -> Self {
        Self { commands }
    }

    pub fn get(&self, index: u8) -> Option<&'static str> {
        self.commands.get(usize::from(index)).copied()
    }

    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Build the wire and display forms of `request`.
    ///
    /// Both forms are assembled side by side: command text, then the
    /// modifier or parameter, then the terminator. Anything that does not fit
    /// is silently cut off. Neither form ever grows past its capacity minus
    /// one.
    ///
    /// `terminator` only applies to requests that are terminated, see
    /// [`Request::without_terminator`].
    pub fn assemble(
        &self,
        request: &Request<'_>,
        terminator: Terminator,
    ) -> Result<Assembled, Error> {
        let text = self.get(request.index).ok_or(Error::InvalidIndex)?;

        let mut assembled = Assembled::default();
        push_clamped(&mut assembled.wire, text.as_bytes());
        push_clamped(&mut assembled.display, &assembled.wire);

        assembled.append_suffix(request.param, request.modifier);
        if request.terminated {
            assembled.append_terminator(terminator);
        }

        Ok(assembled)
    }
}

/// Suffix form altering the meaning of a command.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    /// Append `=<param>` when a parameter is given
    #[default]
    None,
    /// Append `?`
    Query,
    /// Append `=?`
    Test,
}

/// How an assembled command is terminated.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Terminator {
    None,
    /// `\r` on both the wire and the display form
    CarriageReturn,
    /// A printable `\r` escape on the display form only
    Escaped,
}

/// A single command to format or send.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    pub(crate) index: u8,
    pub(crate) param: Option<&'a str>,
    pub(crate) modifier: Modifier,
    pub(crate) terminated: bool,
    pub(crate) timeout: Duration,
    pub(crate) expects_response: bool,
}

impl<'a> Request<'a> {
    pub fn new(command: Command) -> Self {
        Self::from_index(command.into())
    }

    /// Request for an arbitrary table index, which is checked when the
    /// request is formatted or sent.
    pub fn from_index(index: u8) -> Self {
        Self {
            index,
            param: None,
            modifier: Modifier::None,
            terminated: true,
            timeout: DEFAULT_TIMEOUT,
            expects_response: true,
        }
    }

    /// Parameter appended as `=<param>`.
    ///
    /// A parameter starting with `>` is a raw payload, e.g. an SMS body, and
    /// is appended without the `=`.
    #[must_use]
    pub fn param(mut self, param: &'a str) -> Self {
        self.param = Some(param);
        self
    }

    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    #[must_use]
    pub fn query(self) -> Self {
        self.modifier(Modifier::Query)
    }

    #[must_use]
    pub fn test(self) -> Self {
        self.modifier(Modifier::Test)
    }

    #[must_use]
    pub fn without_terminator(mut self) -> Self {
        self.terminated = false;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Only transmit, do not wait for a response.
    #[must_use]
    pub fn no_response(mut self) -> Self {
        self.expects_response = false;
        self
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn expects_response(&self) -> bool {
        self.expects_response
    }
}

/// The two views of an assembled command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Assembled {
    wire: Vec<u8, COMMAND_CAPACITY>,
    display: Vec<u8, RESPONSE_CAPACITY>,
}

impl Assembled {
    /// Exact bytes to transmit
    pub fn wire(&self) -> &[u8] {
        &self.wire
    }

    /// Human readable form, for debug output
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    pub fn into_display(self) -> Vec<u8, RESPONSE_CAPACITY> {
        self.display
    }

    fn push_both(&mut self, bytes: &[u8]) {
        push_clamped(&mut self.wire, bytes);
        push_clamped(&mut self.display, bytes);
    }

    fn append_suffix(&mut self, param: Option<&str>, modifier: Modifier) {
        if room(&self.wire) == 0 || room(&self.display) == 0 {
            return;
        }

        match modifier {
            Modifier::Query => self.push_both(b"?"),
            Modifier::Test => {
                if room(&self.wire) >= 2 && room(&self.display) >= 2 {
                    self.push_both(b"=?");
                }
            }
            Modifier::None => {
                let Some(param) = param.filter(|p| !p.is_empty()) else {
                    return;
                };
                let param = param.as_bytes();
                if param[0] != b'>' {
                    self.push_both(b"=");
                }
                // Both views get the same number of parameter bytes
                let len = param
                    .len()
                    .min(room(&self.wire))
                    .min(room(&self.display));
                self.push_both(&param[..len]);
            }
        }
    }

    fn append_terminator(&mut self, terminator: Terminator) {
        match terminator {
            Terminator::None => {}
            Terminator::CarriageReturn => {
                if room(&self.wire) > 0 {
                    push_clamped(&mut self.wire, b"\r");
                    push_clamped(&mut self.display, b"\r");
                }
            }
            Terminator::Escaped => {
                if room(&self.display) >= 2 {
                    push_clamped(&mut self.display, b"\\r");
                }
            }
        }
    }
}

/// Bytes that can still be appended, keeping the last slot free.
fn room<const N: usize>(buf: &Vec<u8, N>) -> usize {
    (N - 1).saturating_sub(buf.len())
}

/// Append as much of `bytes` as fits.
fn push_clamped<const N: usize>(buf: &mut Vec<u8, N>, bytes: &[u8]) {
    let len = bytes.len().min(room(buf));
    buf.extend(bytes[..len].iter().copied());
}

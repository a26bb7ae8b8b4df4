use embassy_time::Duration;

/// Configuration of the [`CommandChannel`].
///
/// [`CommandChannel`]: crate::blocking::CommandChannel
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) poll_interval: Duration,
    pub(crate) cmd_cooldown: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            cmd_cooldown: Duration::from_millis(0),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time to idle between polls while no byte is available.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Minimum time between the end of one exchange and the next
    /// transmission, giving the modem room to settle.
    #[must_use]
    pub const fn cmd_cooldown(mut self, cooldown: Duration) -> Self {
        self.cmd_cooldown = cooldown;
        self
    }

    pub const fn get_poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub const fn get_cmd_cooldown(&self) -> Duration {
        self.cmd_cooldown
    }
}

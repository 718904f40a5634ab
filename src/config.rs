use crate::constants::DEFAULT_READ_TIMEOUT_MS;

/// Configuration settings for a Finch session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Timeout handed to every HID read, in milliseconds.
    pub read_timeout_ms: i32,
    /// Cap on transport writes per command while the device accepts zero
    /// bytes. `None` keeps retrying forever.
    pub max_write_attempts: Option<u32>,
    /// Cap on transport reads per sensor command while waiting for the
    /// response carrying our sequence number. `None` keeps reading forever.
    pub max_read_attempts: Option<u32>,
}

impl Config {
    /// Creates a new `Config` instance.
    ///
    /// # Arguments
    ///
    /// * `read_timeout_ms` - The per-read timeout in milliseconds.
    ///
    /// # Returns
    ///
    /// A new `Config` with the given timeout and unbounded retry loops.
    pub fn new(read_timeout_ms: i32) -> Config {
        Config {
            read_timeout_ms,
            ..Config::default()
        }
    }

    /// Sets the per-read timeout for the configuration.
    ///
    /// # Arguments
    ///
    /// * `read_timeout_ms` - The timeout in milliseconds.
    ///
    /// # Returns
    ///
    /// The updated `Config` instance.
    pub fn read_timeout_ms(mut self, read_timeout_ms: i32) -> Self {
        self.read_timeout_ms = read_timeout_ms;
        self
    }

    /// Bounds the write loop. Exceeding it fails the command with
    /// `Error::RetriesExhausted`.
    ///
    /// # Arguments
    ///
    /// * `attempts` - Maximum writes per command, or `None` for no limit.
    ///
    /// # Returns
    ///
    /// The updated `Config` instance.
    pub fn max_write_attempts(mut self, attempts: Option<u32>) -> Self {
        self.max_write_attempts = attempts;
        self
    }

    /// Bounds the read loop of sensor commands.
    ///
    /// # Arguments
    ///
    /// * `attempts` - Maximum reads per sensor request, or `None` for no limit.
    ///
    /// # Returns
    ///
    /// The updated `Config` instance.
    pub fn max_read_attempts(mut self, attempts: Option<u32>) -> Self {
        self.max_read_attempts = attempts;
        self
    }
}

/// Provides default configuration values for a Finch session.
impl Default for Config {
    /// A one second read timeout, with write and read loops that never give
    /// up on their own.
    fn default() -> Config {
        Config {
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            max_write_attempts: None,
            max_read_attempts: None,
        }
    }
}

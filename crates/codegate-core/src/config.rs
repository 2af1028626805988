//! Control configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Number of segments in a code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Seconds before a sent code expires and resend becomes available.
pub const DEFAULT_EXPIRY_SECS: u32 = 60;

/// Period of the countdown tick source. Each tick is one second off the
/// countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Code entry configuration.
///
/// Fields are validated on construction, so a built config always describes
/// a usable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryConfig {
    /// Number of segments (N)
    length: usize,
    /// Initial countdown value in seconds
    expiry_secs: u32,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self { length: DEFAULT_CODE_LENGTH, expiry_secs: DEFAULT_EXPIRY_SECS }
    }
}

impl EntryConfig {
    /// Create a config with the given code length and expiry.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ZeroLength` if `length` is 0
    /// - `ConfigError::ZeroExpiry` if `expiry_secs` is 0
    pub fn new(length: usize, expiry_secs: u32) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if expiry_secs == 0 {
            return Err(ConfigError::ZeroExpiry);
        }
        Ok(Self { length, expiry_secs })
    }

    /// Number of segments.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Initial countdown value in seconds.
    pub fn expiry_secs(&self) -> u32 {
        self.expiry_secs
    }

    /// Period between countdown ticks.
    pub fn tick_interval(&self) -> Duration {
        TICK_INTERVAL
    }
}

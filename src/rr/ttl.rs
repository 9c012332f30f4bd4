use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time to live of a record, in seconds.
///
/// Zero is not a real TTL here: it means "use the default", and is resolved
/// with [`TimeToLive::effective`] when the record is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeToLive(u32);

impl TimeToLive {
    pub const MAX: TimeToLive = TimeToLive(u32::MAX);
    pub const ZERO: TimeToLive = TimeToLive(0u32);

    /// TTL used for records that do not set one.
    pub const DEFAULT: TimeToLive = TimeToLive(300);

    pub fn from_secs(secs: u32) -> Self {
        TimeToLive(secs)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The TTL to publish: this one, or [`TimeToLive::DEFAULT`] when unset.
    pub fn effective(&self) -> TimeToLive {
        if self.is_zero() {
            TimeToLive::DEFAULT
        } else {
            *self
        }
    }
}

impl fmt::Display for TimeToLive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TimeToLive {
    fn from(value: u32) -> Self {
        TimeToLive(value)
    }
}

impl From<TimeToLive> for u32 {
    fn from(value: TimeToLive) -> Self {
        value.0
    }
}

impl From<TimeToLive> for Duration {
    fn from(value: TimeToLive) -> Self {
        Duration::from_secs(value.0 as u64)
    }
}

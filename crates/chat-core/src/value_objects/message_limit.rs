//! Message limit - how many log entries a reader asked for

use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};
use std::str::FromStr;

/// Upper bound on the number of messages returned by one query.
///
/// `MessageLimit::UNBOUNDED` returns the whole visible log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageLimit(Option<NonZeroU32>);

impl MessageLimit {
    /// No truncation
    pub const UNBOUNDED: Self = Self(None);

    /// Create a limit from a raw count; zero means unbounded
    pub fn new(count: u32) -> Self {
        Self(NonZeroU32::new(count))
    }

    /// The bound, if any
    #[inline]
    pub fn get(&self) -> Option<u32> {
        self.0.map(NonZeroU32::get)
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for MessageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("unbounded"),
        }
    }
}

/// Error returned when a supplied limit is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("limit must be a positive integer, got {0:?}")]
pub struct MessageLimitParseError(pub String);

impl FromStr for MessageLimit {
    type Err = MessageLimitParseError;

    /// Parses a caller-supplied limit. Only positive integers are accepted;
    /// values past `u32::MAX` are clamped to it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = match s.parse::<u32>() {
            Ok(n) => n,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
            Err(_) => 0,
        };
        NonZeroU32::new(count)
            .map(|n| Self(Some(n)))
            .ok_or_else(|| MessageLimitParseError(s.to_string()))
    }
}

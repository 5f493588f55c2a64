//! Participant entity - a live member of the chat

/// Participant entity
///
/// `last_seen` is milliseconds since the Unix epoch and never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub last_seen: i64,
}

impl Participant {
    /// Create a participant that was active at `now_ms`
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            name: name.into(),
            last_seen: now_ms,
        }
    }

    /// Refresh the activity timestamp
    pub fn touch(&mut self, now_ms: i64) {
        self.last_seen = self.last_seen.max(now_ms);
    }

    /// Whether the participant has been inactive since before `cutoff_ms`
    #[inline]
    pub fn is_stale(&self, cutoff_ms: i64) -> bool {
        self.last_seen < cutoff_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_is_monotonic() {
        let mut p = Participant::new("Ana", 1_000);
        p.touch(5_000);
        assert_eq!(p.last_seen, 5_000);

        p.touch(2_000);
        assert_eq!(p.last_seen, 5_000);
    }

    #[test]
    fn test_is_stale_is_strict() {
        let p = Participant::new("Ana", 1_000);
        assert!(p.is_stale(1_001));
        assert!(!p.is_stale(1_000));
        assert!(!p.is_stale(999));
    }
}

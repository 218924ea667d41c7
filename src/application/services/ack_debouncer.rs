//! Rate limiting for outbound acknowledgements.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::domain::entities::ChannelId;

/// Minimum interval between two acknowledgements for one channel.
pub const DEFAULT_ACK_COOLDOWN: Duration = Duration::from_secs(10);

/// Allows at most one acknowledgement per channel per cooldown window.
///
/// Only decides when a send may happen. A mark-read that lands inside an
/// open window is dropped, not deferred.
#[derive(Debug)]
pub struct AckDebouncer {
    cooldown: Duration,
    last_sent: Mutex<HashMap<ChannelId, Instant>>,
}

impl Default for AckDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_ACK_COOLDOWN)
    }
}

impl AckDebouncer {
    /// Creates a debouncer with the given cooldown.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_sent: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Checks the gate and records `now` as a send if it is open.
    pub fn should_send(&self, channel_id: ChannelId, now: Instant) -> bool {
        let mut last_sent = self.last_sent.lock();

        if let Some(last) = last_sent.get(&channel_id)
            && now.saturating_duration_since(*last) < self.cooldown
        {
            return false;
        }

        last_sent.insert(channel_id, now);
        true
    }

    /// Drops the recorded send time for a channel.
    pub fn forget(&self, channel_id: ChannelId) {
        self.last_sent.lock().remove(&channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use test_case::test_case;

    const CHANNEL: ChannelId = ChannelId(3);

    #[test]
    fn test_first_send_passes() {
        let debouncer = AckDebouncer::default();

        assert!(debouncer.should_send(CHANNEL, Instant::now()));
        assert_eq!(debouncer.cooldown(), DEFAULT_ACK_COOLDOWN);
    }

    #[test_case(Duration::from_millis(1), false ; "just_after")]
    #[test_case(Duration::from_secs(9), false ; "inside_window")]
    #[test_case(Duration::from_secs(10), true ; "window_boundary")]
    #[test_case(Duration::from_secs(11), true ; "after_window")]
    fn test_second_send(delay: Duration, expected: bool) {
        let debouncer = AckDebouncer::default();
        let t0 = Instant::now();

        assert!(debouncer.should_send(CHANNEL, t0));
        assert_eq!(debouncer.should_send(CHANNEL, t0 + delay), expected);
    }

    #[test]
    fn test_rejected_send_does_not_extend_window() {
        let debouncer = AckDebouncer::new(Duration::from_secs(10));
        let t0 = Instant::now();

        assert!(debouncer.should_send(CHANNEL, t0));
        assert!(!debouncer.should_send(CHANNEL, t0 + Duration::from_secs(8)));
        assert!(debouncer.should_send(CHANNEL, t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_channels_are_independent() {
        let debouncer = AckDebouncer::default();
        let now = Instant::now();

        assert!(debouncer.should_send(ChannelId(1), now));
        assert!(debouncer.should_send(ChannelId(2), now));
        assert!(!debouncer.should_send(ChannelId(1), now));
    }

    #[test]
    fn test_forget_reopens_gate() {
        let debouncer = AckDebouncer::default();
        let now = Instant::now();

        assert!(debouncer.should_send(CHANNEL, now));
        debouncer.forget(CHANNEL);
        assert!(debouncer.should_send(CHANNEL, now));
    }

    #[test]
    fn test_concurrent_callers_pass_once() {
        let debouncer = Arc::new(AckDebouncer::default());
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let debouncer = Arc::clone(&debouncer);
                std::thread::spawn(move || debouncer.should_send(CHANNEL, now))
            })
            .collect();

        let passed = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|passed| *passed)
            .count();

        assert_eq!(passed, 1);
    }
}

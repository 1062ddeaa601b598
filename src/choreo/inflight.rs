//! In-flight tracking for dispatched animations.
//!
//! Every animated dispatch takes a [`Completion`] guard from the shared
//! [`InFlight`] handle. The guard releases its slot exactly once, when it is
//! completed or dropped. Invalidating the handle (on reset) starts a new
//! epoch: guards from an older epoch release nothing.
//!
//! The epoch and the count share one atomic word so a release can never
//! observe one without the other.

// Packing splits a u64 into two u32 halves
#![allow(clippy::cast_possible_truncation)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const COUNT_MASK: u64 = 0xFFFF_FFFF;

const fn pack(epoch: u32, count: u32) -> u64 {
    ((epoch as u64) << 32) | count as u64
}

const fn epoch_of(word: u64) -> u32 {
    (word >> 32) as u32
}

const fn count_of(word: u64) -> u32 {
    (word & COUNT_MASK) as u32
}

/// Shared counter of animations still playing.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    word: Arc<AtomicU64>,
}

impl InFlight {
    /// Create an idle counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of animations still playing in the current epoch.
    #[must_use]
    pub fn count(&self) -> u32 {
        count_of(self.word.load(Ordering::Acquire))
    }

    /// Current epoch; bumped by every [`InFlight::invalidate`].
    #[must_use]
    pub fn epoch(&self) -> u32 {
        epoch_of(self.word.load(Ordering::Acquire))
    }

    /// Whether nothing is playing.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.count() == 0
    }

    /// Take a slot for a new animation.
    pub fn begin(&self) -> Completion {
        let previous = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                Some(pack(epoch_of(word), count_of(word).saturating_add(1)))
            })
            .unwrap_or_else(|word| word);
        Completion {
            word: Arc::clone(&self.word),
            epoch: epoch_of(previous),
        }
    }

    /// Forget every outstanding slot.
    ///
    /// The count drops to zero and guards handed out earlier become inert.
    pub fn invalidate(&self) {
        let _ = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                Some(pack(epoch_of(word).wrapping_add(1), 0))
            });
    }
}

/// Guard for one dispatched animation; releases its slot when dropped.
#[derive(Debug)]
#[must_use = "dropping a Completion releases its in-flight slot immediately"]
pub struct Completion {
    word: Arc<AtomicU64>,
    epoch: u32,
}

impl Completion {
    /// Report that the animation finished or was replaced.
    pub fn complete(self) {
        drop(self);
    }

    /// Whether releasing this guard would still affect the counter.
    #[must_use]
    pub fn is_current(&self) -> bool {
        epoch_of(self.word.load(Ordering::Acquire)) == self.epoch
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        let epoch = self.epoch;
        let _ = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let count = count_of(word);
                (epoch_of(word) == epoch && count > 0).then(|| pack(epoch, count - 1))
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_complete_balance() {
        let in_flight = InFlight::new();
        assert!(in_flight.is_idle());

        let first = in_flight.begin();
        let second = in_flight.begin();
        assert_eq!(in_flight.count(), 2);

        first.complete();
        assert_eq!(in_flight.count(), 1);
        drop(second);
        assert!(in_flight.is_idle());
    }

    #[test]
    fn test_invalidate_ignores_stale_completions() {
        let in_flight = InFlight::new();
        let stale = in_flight.begin();
        assert!(stale.is_current());

        in_flight.invalidate();
        assert!(in_flight.is_idle());
        assert!(!stale.is_current());

        let fresh = in_flight.begin();
        stale.complete();
        assert_eq!(in_flight.count(), 1, "stale completion must not release the fresh slot");

        fresh.complete();
        assert!(in_flight.is_idle());
    }

    #[test]
    fn test_epoch_advances() {
        let in_flight = InFlight::new();
        let before = in_flight.epoch();
        in_flight.invalidate();
        assert_eq!(in_flight.epoch(), before.wrapping_add(1));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let in_flight = InFlight::new();
        let other = in_flight.clone();
        let guard = other.begin();
        assert_eq!(in_flight.count(), 1);
        guard.complete();
        assert!(in_flight.is_idle());
    }

    #[test]
    fn test_release_from_another_thread() {
        let in_flight = InFlight::new();
        let guard = in_flight.begin();
        std::thread::spawn(move || guard.complete()).join().unwrap();
        assert!(in_flight.is_idle());
    }
}

#![forbid(unsafe_code)]

//! Deterministic timer queue.
//!
//! Holds one-shot and repeating timers against a host-supplied monotonic time.
//! Entries are ordered by due time, then by scheduling order, so two timers
//! due at the same instant always fire in the order they were armed.
//!
//! # Invariants
//!
//! 1. At most one entry exists per key: scheduling an existing key replaces it.
//! 2. A repeating entry is re-armed at `due + period` when it fires, so a
//!    long gap between polls fires every missed occurrence in order.
//! 3. Cancelling a key that is not armed is a no-op.

use std::time::Duration;

/// Shortest accepted repeat period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    due: Duration,
    period: Option<Duration>,
    seq: u64,
    value: Option<V>,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<K, V> {
    /// Key the timer was armed under.
    pub key: K,
    /// Instant the timer was due (not the instant it was polled).
    pub due: Duration,
    /// Payload of a one-shot timer; `None` for repeating timers.
    pub value: Option<V>,
}

/// Queue of keyed one-shot and repeating timers.
#[derive(Debug, Clone)]
pub struct TimerQueue<K, V> {
    entries: Vec<Entry<K, V>>,
    next_seq: u64,
}

impl<K, V> Default for TimerQueue<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: PartialEq + Copy, V> TimerQueue<K, V> {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer carrying `value`, replacing any timer under `key`.
    pub fn schedule_once(&mut self, key: K, due: Duration, value: V) {
        self.insert(key, due, None, Some(value));
    }

    /// Arm a repeating timer first due at `first_due`, replacing any timer
    /// under `key`.
    pub fn schedule_every(&mut self, key: K, first_due: Duration, period: Duration) {
        self.insert(key, first_due, Some(period.max(MIN_PERIOD)), None);
    }

    /// Disarm `key`. Returns whether a timer was armed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    /// Whether a timer is armed under `key`.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Due time of the timer under `key`.
    #[must_use]
    pub fn due_of(&self, key: K) -> Option<Duration> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.due)
    }

    /// Earliest due time in the queue.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timer is armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// One-shot timers are removed; repeating timers are re-armed one period
    /// after the occurrence that fired.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<K, V>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        match self.entries[idx].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[idx];
                let fired = Fired {
                    key: entry.key,
                    due: entry.due,
                    value: None,
                };
                entry.due = entry.due.saturating_add(period);
                entry.seq = seq;
                Some(fired)
            }
            None => {
                let entry = self.entries.swap_remove(idx);
                Some(Fired {
                    key: entry.key,
                    due: entry.due,
                    value: entry.value,
                })
            }
        }
    }

    fn insert(&mut self, key: K, due: Duration, period: Option<Duration>, value: Option<V>) {
        self.cancel(key);
        let seq = self.bump_seq();
        self.entries.push(Entry {
            key,
            due,
            period,
            seq,
            value,
        });
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[test]
    fn once_fires_when_due() {
        let mut q: TimerQueue<u8, &str> = TimerQueue::new();
        q.schedule_once(1, MS(150), "close");
        assert!(q.pop_due(MS(149)).is_none());
        let fired = q.pop_due(MS(150)).unwrap();
        assert_eq!(fired.value, Some("close"));
        assert_eq!(fired.due, MS(150));
        assert!(q.is_empty());
    }

    #[test]
    fn rescheduling_replaces() {
        let mut q: TimerQueue<u8, u32> = TimerQueue::new();
        q.schedule_once(1, MS(100), 1);
        q.schedule_once(1, MS(300), 2);
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(MS(200)).is_none());
        assert_eq!(q.pop_due(MS(300)).unwrap().value, Some(2));
    }

    #[test]
    fn cancel_disarms() {
        let mut q: TimerQueue<u8, ()> = TimerQueue::new();
        q.schedule_once(1, MS(10), ());
        assert!(q.cancel(1));
        assert!(!q.cancel(1));
        assert!(q.pop_due(MS(1000)).is_none());
    }

    #[test]
    fn repeating_catches_up_in_order() {
        let mut q: TimerQueue<u8, ()> = TimerQueue::new();
        q.schedule_every(7, MS(100), MS(100));
        let mut dues = Vec::new();
        while let Some(f) = q.pop_due(MS(350)) {
            dues.push(f.due);
        }
        assert_eq!(dues, vec![MS(100), MS(200), MS(300)]);
        assert_eq!(q.due_of(7), Some(MS(400)));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q: TimerQueue<u8, u8> = TimerQueue::new();
        q.schedule_once(2, MS(50), 2);
        q.schedule_once(1, MS(50), 1);
        assert_eq!(q.pop_due(MS(50)).unwrap().key, 2);
        assert_eq!(q.pop_due(MS(50)).unwrap().key, 1);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut q: TimerQueue<u8, ()> = TimerQueue::new();
        q.schedule_every(1, MS(0), Duration::ZERO);
        q.pop_due(MS(0));
        assert_eq!(q.due_of(1), Some(MS(1)));
    }

    #[test]
    fn next_due_is_minimum() {
        let mut q: TimerQueue<u8, ()> = TimerQueue::new();
        q.schedule_every(1, MS(3500), MS(3500));
        q.schedule_once(2, MS(700), ());
        assert_eq!(q.next_due(), Some(MS(700)));
    }
}

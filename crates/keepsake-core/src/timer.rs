//! Scheduled tasks with cancel handles.
//!
//! The queue never reads a clock. Callers pass `now` when scheduling and when
//! polling, so the same queue works with `std::time::Instant` and with a
//! virtual clock. Only `Ord` and `Sub<Output = Duration>` are required of the
//! instant type; deadlines are expressed as "started at + delay".

use std::{ops::Sub, time::Duration};

/// Handle to a scheduled task. Unique within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw identifier, for logging.
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry<I, T> {
    handle: TimerHandle,
    started_at: I,
    delay: Duration,
    payload: T,
}

impl<I, T> Entry<I, T>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    fn elapsed(&self, now: I) -> Duration {
        if now <= self.started_at { Duration::ZERO } else { now - self.started_at }
    }

    fn is_due(&self, now: I) -> bool {
        self.elapsed(now) >= self.delay
    }
}

/// Pending tasks keyed by [`TimerHandle`].
#[derive(Debug, Clone)]
pub struct TimerQueue<I, T> {
    entries: Vec<Entry<I, T>>,
    next_id: u64,
}

impl<I, T> Default for TimerQueue<I, T> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }
}

impl<I, T> TimerQueue<I, T>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: I, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry { handle, started_at: now, delay, payload });
        handle
    }

    /// Cancel a pending task. Returns its payload, or `None` if it already
    /// fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.handle == handle)?;
        Some(self.entries.remove(pos).payload)
    }

    /// Whether `handle` is still pending.
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Remove and return every task due at `now`.
    ///
    /// Tasks come out in deadline order; tasks sharing a deadline come out in
    /// the order they were scheduled.
    pub fn expire(&mut self, now: I) -> Vec<(TimerHandle, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| e.is_due(now));
        self.entries = pending;

        // Larger overshoot means an earlier deadline.
        due.sort_by(|a, b| {
            let over_a = a.elapsed(now) - a.delay;
            let over_b = b.elapsed(now) - b.delay;
            over_b.cmp(&over_a).then(a.handle.cmp(&b.handle))
        });
        due.into_iter().map(|e| (e.handle, e.payload)).collect()
    }

    /// Time until the earliest pending task is due. `None` if empty.
    pub fn next_due_in(&self, now: I) -> Option<Duration> {
        self.entries.iter().map(|e| e.delay.saturating_sub(e.elapsed(now))).min()
    }

    /// Drop every pending task, returning their payloads in scheduling order.
    pub fn clear(&mut self) -> Vec<T> {
        std::mem::take(&mut self.entries).into_iter().map(|e| e.payload).collect()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_only_after_delay() {
        let mut timers: TimerQueue<Duration, &str> = TimerQueue::new();
        timers.schedule(ms(0), ms(600), "settle");

        assert!(timers.expire(ms(599)).is_empty());
        let fired = timers.expire(ms(600));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "settle");
        assert!(timers.is_empty());
    }

    #[test]
    fn expires_in_deadline_order() {
        let mut timers: TimerQueue<Duration, u8> = TimerQueue::new();
        timers.schedule(ms(0), ms(400), 2);
        timers.schedule(ms(0), ms(200), 1);
        timers.schedule(ms(50), ms(100), 0);
        timers.schedule(ms(300), ms(500), 9);

        let fired: Vec<_> = timers.expire(ms(450)).into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec![0, 1, 2]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn cancel_returns_payload_once() {
        let mut timers: TimerQueue<Duration, &str> = TimerQueue::new();
        let handle = timers.schedule(ms(0), ms(10), "x");

        assert!(timers.contains(handle));
        assert_eq!(timers.cancel(handle), Some("x"));
        assert_eq!(timers.cancel(handle), None);
        assert!(timers.expire(ms(100)).is_empty());
    }

    #[test]
    fn next_due_in_reports_earliest() {
        let mut timers: TimerQueue<Duration, ()> = TimerQueue::new();
        assert_eq!(timers.next_due_in(ms(0)), None);

        timers.schedule(ms(0), ms(600), ());
        timers.schedule(ms(100), ms(300), ());
        assert_eq!(timers.next_due_in(ms(200)), Some(ms(200)));
        assert_eq!(timers.next_due_in(ms(1000)), Some(Duration::ZERO));
    }

    #[test]
    fn clock_before_start_is_not_due() {
        let mut timers: TimerQueue<Duration, ()> = TimerQueue::new();
        timers.schedule(ms(500), Duration::ZERO, ());
        assert!(timers.expire(ms(100)).is_empty());
        assert_eq!(timers.expire(ms(500)).len(), 1);
    }

    #[test]
    fn clear_drains_everything() {
        let mut timers: TimerQueue<Duration, u8> = TimerQueue::new();
        timers.schedule(ms(0), ms(1), 1);
        timers.schedule(ms(0), ms(2), 2);
        assert_eq!(timers.clear(), vec![1, 2]);
        assert!(timers.is_empty());
    }
}

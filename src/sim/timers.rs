//! Session-owned timer queue
//!
//! Replaces free-floating `setTimeout`/`setInterval` callbacks with entries the
//! session can enumerate and cancel. The queue never reads a clock: callers
//! pass `now` in milliseconds, and `pop_due` hands back one expired timer at a
//! time so each firing runs as its own step.

/// Cancellation token for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Rafa shows up
    RafaAppear,
    /// Rafa's once-a-second penalty increment
    RafaPenalty,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_ms: f64,
    period_ms: Option<f64>,
}

/// Pending timers, fired in due order (ties in schedule order)
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }

    /// Fire once, `delay_ms` after `now_ms`
    pub fn schedule_once(&mut self, now_ms: f64, delay_ms: f64, kind: TimerKind) -> TimerId {
        let id = self.allocate_id();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + delay_ms.max(0.0),
            period_ms: None,
        });
        id
    }

    /// Fire every `period_ms`, first at `now_ms + period_ms`
    pub fn schedule_repeating(&mut self, now_ms: f64, period_ms: f64, kind: TimerKind) -> TimerId {
        let id = self.allocate_id();
        // A zero period would fire forever within one pump
        let period_ms = period_ms.max(1.0);
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + period_ms,
            period_ms: Some(period_ms),
        });
        id
    }

    /// Cancel one timer; false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel everything, returning how many were pending
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.timers.len();
        self.timers.clear();
        pending
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// When the next timer is due, if any
    pub fn next_due(&self) -> Option<f64> {
        self.timers.iter().map(|t| t.due_ms).reduce(f64::min)
    }

    /// Take the earliest timer due at or before `now_ms`
    ///
    /// Repeating timers are re-queued one period later before returning.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerId, TimerKind)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let Timer {
            id,
            kind,
            period_ms,
            ..
        } = self.timers[index];
        match period_ms {
            Some(period) => self.timers[index].due_ms += period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some((id, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_once() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_once(0.0, 500.0, TimerKind::RafaAppear);

        assert_eq!(timers.pop_due(499.0), None);
        assert_eq!(timers.pop_due(500.0), Some((id, TimerKind::RafaAppear)));
        assert_eq!(timers.pop_due(10_000.0), None);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_repeating_catches_up_one_at_a_time() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_repeating(0.0, 1000.0, TimerKind::RafaPenalty);

        let mut fired = 0;
        while let Some((fired_id, _)) = timers.pop_due(3500.0) {
            assert_eq!(fired_id, id);
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(timers.next_due(), Some(4000.0));
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule_once(0.0, 200.0, TimerKind::RafaAppear);
        let first = timers.schedule_once(0.0, 100.0, TimerKind::RafaPenalty);
        let tie = timers.schedule_once(0.0, 100.0, TimerKind::RafaAppear);

        assert_eq!(timers.pop_due(1000.0).map(|f| f.0), Some(first));
        assert_eq!(timers.pop_due(1000.0).map(|f| f.0), Some(tie));
        assert_eq!(timers.pop_due(1000.0).map(|f| f.0), Some(late));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule_once(0.0, 100.0, TimerKind::RafaAppear);
        let b = timers.schedule_repeating(0.0, 100.0, TimerKind::RafaPenalty);

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert!(timers.is_pending(b));
        assert_eq!(timers.cancel_all(), 1);
        assert_eq!(timers.pop_due(f64::MAX), None);
    }
}

//! Frame scheduler
//!
//! One-shot timers advanced by frame ticks instead of wall-clock callbacks,
//! so delayed work runs on the same thread and in the same order as the
//! animations it belongs to.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TimerId;
}

struct Timer<T> {
    /// Scheduler time (ms) at which the timer fires
    due_ms: f64,
    payload: T,
}

/// Delayed one-shot timers carrying a payload of type `T`
pub struct FrameScheduler<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    elapsed_ms: f64,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            elapsed_ms: 0.0,
        }
    }

    /// Fire `payload` once `delay_ms` has elapsed
    pub fn after(&mut self, delay_ms: u32, payload: T) -> TimerId {
        self.timers.insert(Timer {
            due_ms: self.elapsed_ms + delay_ms as f64,
            payload,
        })
    }

    /// Cancel a pending timer, handing back its payload
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|t| t.payload)
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance the clock and collect the payloads of timers that came due,
    /// earliest first
    pub fn advance(&mut self, dt_ms: f32) -> SmallVec<[T; 2]> {
        if dt_ms > 0.0 && dt_ms.is_finite() {
            self.elapsed_ms += dt_ms as f64;
        }

        let now = self.elapsed_ms;
        let mut due: SmallVec<[(f64, TimerId); 2]> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= now)
            .map(|(id, t)| (t.due_ms, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0));

        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(id).map(|t| t.payload))
            .collect()
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once_due() {
        let mut scheduler = FrameScheduler::new();
        scheduler.after(300, "release");

        assert!(scheduler.advance(16.0).is_empty());
        assert!(scheduler.advance(250.0).is_empty());
        let fired = scheduler.advance(40.0);
        assert_eq!(fired.as_slice(), &["release"]);
        assert_eq!(scheduler.pending_count(), 0);
        assert!(scheduler.advance(1000.0).is_empty());
    }

    #[test]
    fn test_fired_in_due_order() {
        let mut scheduler = FrameScheduler::new();
        scheduler.after(400, 2);
        scheduler.after(100, 1);
        scheduler.after(900, 3);

        let fired = scheduler.advance(500.0);
        assert_eq!(fired.as_slice(), &[1, 2]);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.after(10, 'a');
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.cancel(id), Some('a'));
        assert_eq!(scheduler.cancel(id), None);
        assert!(scheduler.advance(100.0).is_empty());
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut scheduler = FrameScheduler::new();
        scheduler.after(0, ());
        assert_eq!(scheduler.advance(0.0).len(), 1);
    }
}

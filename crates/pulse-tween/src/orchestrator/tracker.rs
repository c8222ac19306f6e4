// orchestrator/tracker.rs
//
// Follows one tween or sequence through the manager's per-tick broadcasts,
// turning the shared event sets into a per-target callback list.
//
// Usage:
//   let mut tracker = TweenTracker::new(&manager, id);
//   manager.tick(frame);
//   for event in tracker.observe(&manager) { ... }

use crate::api::types::{TweenEvent, TweenId};

use super::manager::TweenManager;

/// What a tracked target did during the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedEvent {
    /// The value moved. Emitted before the edge that accompanied it, if any.
    Updated { value: f32, completion: f32 },
    Started,
    Paused,
    Resumed,
    PingPongApex,
    Looped,
    Completed,
    Cancelled,
    /// The tracked sequence moved to its next leg.
    MovedNext { leg: TweenId, index: usize },
    SequenceCompleted,
}

#[derive(Debug, Clone)]
pub struct TweenTracker {
    target: TweenId,
    is_sequence: bool,
    /// Timeline observed this tick: the target itself, or the current leg.
    leg: Option<TweenId>,
    events: Vec<TrackedEvent>,
    finished: bool,
}

impl TweenTracker {
    pub fn new(manager: &TweenManager, target: TweenId) -> Self {
        let is_sequence = manager.sequence(target).is_some();
        let leg = if is_sequence {
            manager.sequence_current_tween(target).map(|(leg, _)| leg)
        } else {
            Some(target)
        };
        Self {
            target,
            is_sequence,
            leg,
            events: Vec::new(),
            finished: !manager.is_active_tween(target),
        }
    }

    pub fn target(&self) -> TweenId {
        self.target
    }

    /// Timeline currently followed.
    pub fn current(&self) -> Option<TweenId> {
        self.leg
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Events gathered by the last [`observe`](Self::observe).
    pub fn events(&self) -> &[TrackedEvent] {
        &self.events
    }

    /// Read the manager's latest broadcasts. Call once after each tick.
    pub fn observe(&mut self, manager: &TweenManager) -> &[TrackedEvent] {
        self.events.clear();
        if self.finished {
            return &self.events;
        }
        let sets = manager.last_events();

        if let Some(leg) = self.leg {
            let moved = [
                TweenEvent::Updated,
                TweenEvent::Started,
                TweenEvent::Resumed,
                TweenEvent::PingPongApex,
                TweenEvent::Looped,
                TweenEvent::Completed,
            ]
            .into_iter()
            .any(|event| sets.contains(event, leg));
            if moved {
                if let Some((value, completion)) = manager.tween_values(leg) {
                    self.events.push(TrackedEvent::Updated { value, completion });
                }
            }

            for event in TweenEvent::ALL {
                if event.is_sequence_event() || !sets.contains(event, leg) {
                    continue;
                }
                let tracked = match event {
                    TweenEvent::Started => TrackedEvent::Started,
                    TweenEvent::Paused => TrackedEvent::Paused,
                    TweenEvent::Resumed => TrackedEvent::Resumed,
                    TweenEvent::PingPongApex => TrackedEvent::PingPongApex,
                    TweenEvent::Looped => TrackedEvent::Looped,
                    TweenEvent::Completed => TrackedEvent::Completed,
                    TweenEvent::Cancelled => TrackedEvent::Cancelled,
                    _ => continue,
                };
                self.events.push(tracked);
            }
        }

        if self.is_sequence {
            if sets.contains(TweenEvent::SequenceMovedNext, self.target) {
                if let Some((leg, index)) = manager.sequence_current_tween(self.target) {
                    self.leg = Some(leg);
                    self.events.push(TrackedEvent::MovedNext { leg, index });
                }
            }
            if sets.contains(TweenEvent::SequenceCompleted, self.target) {
                self.events.push(TrackedEvent::SequenceCompleted);
                self.finished = true;
            }
        } else {
            let ended = self.events.iter().any(|e| {
                matches!(e, TrackedEvent::Completed | TrackedEvent::Cancelled)
            });
            self.finished = ended || !manager.is_active_tween(self.target);
        }

        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FrameTime;
    use crate::timeline::TweenParams;

    #[test]
    fn follows_single_tween_to_completion() {
        let mut manager = TweenManager::new();
        let id = manager.create_tween(TweenParams::new(1.0), None).unwrap();
        let mut tracker = TweenTracker::new(&manager, id);
        assert!(!tracker.is_finished());

        manager.tick(FrameTime::new(0.5));
        assert_eq!(
            tracker.observe(&manager),
            &[
                TrackedEvent::Updated { value: 0.5, completion: 0.5 },
                TrackedEvent::Started
            ]
        );

        manager.tick(FrameTime::new(0.5));
        let events = tracker.observe(&manager).to_vec();
        assert_eq!(events.last(), Some(&TrackedEvent::Completed));
        assert!(tracker.is_finished());
    }

    #[test]
    fn reports_cancellation() {
        let mut manager = TweenManager::new();
        let id = manager.create_tween(TweenParams::new(1.0), None).unwrap();
        let mut tracker = TweenTracker::new(&manager, id);
        manager.tick(FrameTime::new(0.1));
        tracker.observe(&manager);

        manager.cancel_tween(id);
        manager.tick(FrameTime::new(0.1));
        assert_eq!(tracker.observe(&manager), &[TrackedEvent::Cancelled]);
        assert!(tracker.is_finished());
    }

    #[test]
    fn retargets_across_sequence_legs() {
        let mut manager = TweenManager::new();
        let seq = manager
            .create_sequence(&[TweenParams::new(0.5), TweenParams::new(0.5)], 0, None)
            .unwrap();
        let mut tracker = TweenTracker::new(&manager, seq);
        let first = tracker.current();
        assert!(first.is_some());

        let mut moved = Vec::new();
        let mut completed = 0;
        for _ in 0..6 {
            manager.tick(FrameTime::new(0.25));
            for event in tracker.observe(&manager) {
                match event {
                    TrackedEvent::MovedNext { index, .. } => moved.push(*index),
                    TrackedEvent::Completed => completed += 1,
                    _ => {}
                }
            }
        }

        assert_eq!(moved, vec![1]);
        assert_eq!(completed, 2);
        assert_ne!(tracker.current(), first);
        assert!(tracker.is_finished());
    }

    #[test]
    fn unknown_target_is_finished() {
        let manager = TweenManager::new();
        let tracker = TweenTracker::new(&manager, TweenId::new_random());
        assert!(tracker.is_finished());
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a tween or a tween sequence.
/// Identifiers are recycled once the tween they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TweenId(Uuid);

impl TweenId {
    /// Placeholder for timelines that are not addressed by identifier.
    pub const NIL: TweenId = TweenId(Uuid::nil());

    /// Generate a fresh, never-before-seen identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Discrete state of a tween timeline.
///
/// `Just*` values are edges: they hold for exactly the tick on which the
/// transition happened and collapse to `Updating`, `Paused` or `Completed`
/// on the following tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TweenStatus {
    #[default]
    WaitingToStart,
    JustStarted,
    Updating,
    JustPaused,
    Paused,
    JustResumed,
    JustReachedPingPongApex,
    JustLooped,
    JustCompleted,
    Completed,
}

impl TweenStatus {
    /// Whether this status marks a one-tick transition.
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            TweenStatus::JustStarted
                | TweenStatus::JustPaused
                | TweenStatus::JustResumed
                | TweenStatus::JustReachedPingPongApex
                | TweenStatus::JustLooped
                | TweenStatus::JustCompleted
        )
    }

    /// The status an edge collapses to on the next tick.
    pub fn steady_state(self) -> Self {
        match self {
            TweenStatus::JustPaused | TweenStatus::Paused => TweenStatus::Paused,
            TweenStatus::JustCompleted | TweenStatus::Completed => TweenStatus::Completed,
            TweenStatus::WaitingToStart => TweenStatus::WaitingToStart,
            _ => TweenStatus::Updating,
        }
    }

    /// The broadcast this status feeds into, if any.
    pub fn event(self) -> Option<TweenEvent> {
        match self {
            TweenStatus::Updating => Some(TweenEvent::Updated),
            TweenStatus::JustStarted => Some(TweenEvent::Started),
            TweenStatus::JustPaused => Some(TweenEvent::Paused),
            TweenStatus::JustResumed => Some(TweenEvent::Resumed),
            TweenStatus::JustReachedPingPongApex => Some(TweenEvent::PingPongApex),
            TweenStatus::JustLooped => Some(TweenEvent::Looped),
            TweenStatus::JustCompleted => Some(TweenEvent::Completed),
            TweenStatus::WaitingToStart | TweenStatus::Paused | TweenStatus::Completed => None,
        }
    }
}

/// Kinds of per-tick broadcasts published by the tween manager.
/// Each broadcast carries the set of identifiers that hit the edge this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenEvent {
    Updated,
    Started,
    Paused,
    Resumed,
    Completed,
    Cancelled,
    PingPongApex,
    Looped,
    SequenceMovedNext,
    SequenceCompleted,
}

impl TweenEvent {
    /// Broadcast order within one tick.
    pub const ALL: [TweenEvent; 10] = [
        TweenEvent::Updated,
        TweenEvent::Started,
        TweenEvent::Paused,
        TweenEvent::Resumed,
        TweenEvent::Completed,
        TweenEvent::Cancelled,
        TweenEvent::PingPongApex,
        TweenEvent::Looped,
        TweenEvent::SequenceCompleted,
        TweenEvent::SequenceMovedNext,
    ];

    /// Dense slot for per-event storage.
    pub(crate) fn slot(self) -> usize {
        self as usize
    }

    /// Whether the broadcast concerns a sequence rather than a single timeline.
    pub fn is_sequence_event(self) -> bool {
        matches!(self, TweenEvent::SequenceMovedNext | TweenEvent::SequenceCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_collapse_to_steady_states() {
        assert_eq!(TweenStatus::JustStarted.steady_state(), TweenStatus::Updating);
        assert_eq!(TweenStatus::JustPaused.steady_state(), TweenStatus::Paused);
        assert_eq!(TweenStatus::JustLooped.steady_state(), TweenStatus::Updating);
        assert_eq!(TweenStatus::JustCompleted.steady_state(), TweenStatus::Completed);
        assert!(!TweenStatus::Updating.is_edge());
        assert!(TweenStatus::JustReachedPingPongApex.is_edge());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        let a = TweenId::new_random();
        let b = TweenId::new_random();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 32);
    }
}

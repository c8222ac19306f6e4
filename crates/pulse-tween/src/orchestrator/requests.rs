// orchestrator/requests.rs
//
// Deferred control requests. Callers record an intent; the manager applies
// all of them at the start of its next tick.

use std::collections::HashMap;

use crate::api::types::TweenId;

/// Intent recorded against a tween or sequence identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenRequest {
    Pause,
    Resume,
    Reset,
    Cancel,
}

impl TweenRequest {
    /// Reset and Cancel hold their slot against later pause/resume.
    pub fn is_blocking(self) -> bool {
        matches!(self, TweenRequest::Reset | TweenRequest::Cancel)
    }

    /// Resolve `incoming` against whatever is already pending.
    /// Returns `None` when the incoming request is dropped.
    ///
    /// Cancel overwrites anything except another Cancel. Reset yields only
    /// to Cancel. Pause and Resume yield to both.
    pub fn merge(pending: Option<TweenRequest>, incoming: TweenRequest) -> Option<TweenRequest> {
        match (pending, incoming) {
            (None, request) => Some(request),
            (Some(TweenRequest::Cancel), _) => None,
            (Some(_), TweenRequest::Cancel) => Some(TweenRequest::Cancel),
            (Some(TweenRequest::Reset), _) => None,
            (Some(_), request) => Some(request),
        }
    }
}

/// Requests waiting for the next tick, one per identifier.
#[derive(Debug, Default)]
pub struct PendingRequests {
    map: HashMap<TweenId, TweenRequest>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request. Returns false if the conflict policy dropped it.
    pub fn submit(&mut self, id: TweenId, request: TweenRequest) -> bool {
        let pending = self.map.get(&id).copied();
        match TweenRequest::merge(pending, request) {
            Some(merged) => {
                self.map.insert(id, merged);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TweenId) -> Option<TweenRequest> {
        self.map.get(&id).copied()
    }

    /// Take every pending request, leaving the map empty but allocated.
    pub fn drain(&mut self) -> impl Iterator<Item = (TweenId, TweenRequest)> + '_ {
        self.map.drain()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

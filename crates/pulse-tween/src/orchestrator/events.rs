// orchestrator/events.rs
//
// Per-tick status-edge sets and the listeners they are broadcast to.

use std::collections::HashSet;
use std::fmt;

use crate::api::types::{TweenEvent, TweenId};

/// Identifiers that hit each kind of edge during one tick.
#[derive(Debug, Clone, Default)]
pub struct EventSets {
    sets: [HashSet<TweenId>; TweenEvent::ALL.len()],
}

impl EventSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: TweenEvent, id: TweenId) {
        self.sets[event.slot()].insert(id);
    }

    pub fn get(&self, event: TweenEvent) -> &HashSet<TweenId> {
        &self.sets[event.slot()]
    }

    pub fn contains(&self, event: TweenEvent, id: TweenId) -> bool {
        self.sets[event.slot()].contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(HashSet::is_empty)
    }

    /// Empty every set, keeping their allocations.
    pub fn clear(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }

    /// Non-empty sets in broadcast order.
    pub fn populated(&self) -> impl Iterator<Item = (TweenEvent, &HashSet<TweenId>)> {
        TweenEvent::ALL
            .into_iter()
            .map(|event| (event, self.get(event)))
            .filter(|(_, ids)| !ids.is_empty())
    }
}

pub type Listener = Box<dyn FnMut(TweenEvent, &HashSet<TweenId>) + Send>;

/// Registration handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Observers invoked synchronously, in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(TweenEvent, &HashSet<TweenId>) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Send every populated set to every listener.
    pub fn broadcast(&mut self, events: &EventSets) {
        for (event, ids) in events.populated() {
            for (_, listener) in &mut self.entries {
                listener(event, ids);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn populated_follows_broadcast_order() {
        let mut events = EventSets::new();
        let id = TweenId::new_random();
        events.insert(TweenEvent::SequenceMovedNext, id);
        events.insert(TweenEvent::Completed, id);
        events.insert(TweenEvent::Updated, id);
        let order: Vec<_> = events.populated().map(|(event, _)| event).collect();
        assert_eq!(
            order,
            vec![TweenEvent::Updated, TweenEvent::Completed, TweenEvent::SequenceMovedNext]
        );
    }

    #[test]
    fn clear_empties_all_sets() {
        let mut events = EventSets::new();
        events.insert(TweenEvent::Looped, TweenId::new_random());
        assert!(!events.is_empty());
        events.clear();
        assert!(events.is_empty());
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["a", "b"] {
            let log = log.clone();
            listeners.subscribe(move |event, ids| {
                log.lock().unwrap().push((tag, event, ids.len()));
            });
        }
        let mut events = EventSets::new();
        events.insert(TweenEvent::Started, TweenId::new_random());
        listeners.broadcast(&events);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("a", TweenEvent::Started, 1), ("b", TweenEvent::Started, 1)]
        );
    }

    #[test]
    fn unsubscribe_removes_once() {
        let mut listeners = Listeners::new();
        let id = listeners.subscribe(|_, _| {});
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());
    }
}

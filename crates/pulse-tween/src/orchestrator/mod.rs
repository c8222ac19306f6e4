// orchestrator/mod.rs
//
// Identifier-addressed tweens and sequences with deferred control requests
// and per-tick broadcasts.

pub mod events;
pub mod manager;
pub mod requests;
pub mod tracker;

pub use events::{EventSets, Listener, ListenerId, Listeners};
pub use manager::TweenManager;
pub use requests::{PendingRequests, TweenRequest};
pub use tracker::{TrackedEvent, TweenTracker};

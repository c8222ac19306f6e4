// timeline/mod.rs
//
// Value-free tween timelines: parameters, owner liveness, the playback
// state machine and sequences of timelines.

pub mod owner;
pub mod params;
pub mod sequence;
#[allow(clippy::module_inception)]
pub mod timeline;

pub use owner::{LifeToken, Liveness, OwnerRef};
pub use params::TweenParams;
pub use sequence::TweenSequence;
pub use timeline::TweenTimeline;

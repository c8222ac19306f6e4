pub mod api;
pub mod core;
pub mod easing;
pub mod timeline;
pub mod pool;
pub mod orchestrator;

// Re-export key types at crate root for convenience
pub use api::types::{TweenEvent, TweenId, TweenStatus};
pub use crate::core::config::TweenConfig;
pub use crate::core::error::{Result, TweenError};
pub use crate::core::time::FrameTime;
pub use easing::{ease, ease_with_params, lerp, lerp_vec2, lerp_vec3, EaseKind, EaseParams};
pub use timeline::{LifeToken, Liveness, OwnerRef, TweenParams, TweenSequence, TweenTimeline};

// Pooled, callback-driven tweens over typed values
pub use pool::{PooledValue, RecyclingPool, TweenHandle, TweenInstance, TweenSystem, TweenValue};

// Identifier-addressed tweens and sequences
pub use orchestrator::{
    EventSets, ListenerId, TrackedEvent, TweenManager, TweenRequest, TweenTracker,
};

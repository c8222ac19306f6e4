// pool/mod.rs
//
// Pooled, callback-driven tweens over typed values.

pub mod instance;
pub mod recycling;
pub mod system;
pub mod value;

pub use instance::TweenInstance;
pub use recycling::{RecyclingPool, TweenHandle};
pub use system::{PooledValue, TweenSystem};
pub use value::TweenValue;

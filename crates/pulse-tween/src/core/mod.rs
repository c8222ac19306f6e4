pub mod config;
pub mod error;
pub mod time;

pub use config::TweenConfig;
pub use error::{Result, TweenError};
pub use time::FrameTime;

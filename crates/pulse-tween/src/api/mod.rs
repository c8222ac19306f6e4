pub mod types;

pub use types::{TweenEvent, TweenId, TweenStatus};

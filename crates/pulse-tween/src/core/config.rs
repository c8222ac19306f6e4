use serde::{Deserialize, Serialize};

use super::error::Result;

/// Runtime configuration for the tween system and manager.
/// Loaded from JSON or built in code; missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Advance timelines in parallel once this many are live.
    /// `None` keeps the advance phase sequential.
    pub multithread_threshold: Option<usize>,
    /// Pre-warmed pool size for `f32` tweens (default: 50).
    pub float_capacity: usize,
    /// Pre-warmed pool size for `Vec3` tweens (default: 50).
    pub vector_capacity: usize,
    /// Pre-warmed pool size for `Vec2` tweens (default: 50).
    pub vector2_capacity: usize,
    /// Pre-warmed pool size for `Quat` tweens (default: 10).
    pub quat_capacity: usize,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            multithread_threshold: None,
            float_capacity: 50,
            vector_capacity: 50,
            vector2_capacity: 50,
            quat_capacity: 10,
        }
    }
}

impl TweenConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether `live` timelines should be advanced in parallel.
    pub fn use_parallel(&self, live: usize) -> bool {
        match self.multithread_threshold {
            Some(threshold) => cfg!(feature = "parallel") && live >= threshold.max(1),
            None => false,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TweenError};
use crate::easing::{EaseKind, EaseParams};

/// Parameter bundle describing one tween timeline.
/// Loaded from JSON or built in code; missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenParams {
    /// Seconds to tween from 0 to 1. Must be > 0.
    pub forward_duration: f32,
    /// Seconds to tween back from 1 to 0. 0 disables ping-pong.
    pub reverse_duration: f32,
    /// Delay before the first leg.
    pub start_delay: f32,
    /// Delay before each reverse leg.
    pub reverse_delay: f32,
    /// Delay before every loop after the first.
    pub loop_delay: f32,
    /// Number of repeats after the first play. Negative loops forever.
    pub loops: i32,
    /// Keep ticking while the host is paused.
    pub tween_when_paused: bool,
    /// Scale by the host time-dilation factor.
    pub use_time_dilation: bool,
    pub forward_easing: EaseKind,
    /// Reverse-leg curve. `None` mirrors `forward_easing`.
    pub reverse_easing: Option<EaseKind>,
    pub ease_params: EaseParams,
}

impl Default for TweenParams {
    fn default() -> Self {
        Self {
            forward_duration: 0.1,
            reverse_duration: 0.0,
            start_delay: 0.0,
            reverse_delay: 0.0,
            loop_delay: 0.0,
            loops: 0,
            tween_when_paused: false,
            use_time_dilation: false,
            forward_easing: EaseKind::Linear,
            reverse_easing: None,
            ease_params: EaseParams::DEFAULT,
        }
    }
}

impl TweenParams {
    pub fn new(forward_duration: f32) -> Self {
        Self {
            forward_duration,
            ..Default::default()
        }
    }

    /// Parse and validate parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: TweenParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject durations and delays the timeline cannot play.
    pub fn validate(&self) -> Result<()> {
        if !self.forward_duration.is_finite() || self.forward_duration <= 0.0 {
            return Err(TweenError::InvalidDuration(self.forward_duration));
        }
        if !self.reverse_duration.is_finite() || self.reverse_duration < 0.0 {
            return Err(TweenError::InvalidDuration(self.reverse_duration));
        }
        for delay in [self.start_delay, self.reverse_delay, self.loop_delay] {
            if !delay.is_finite() || delay < 0.0 {
                return Err(TweenError::InvalidDelay(delay));
            }
        }
        Ok(())
    }

    pub fn is_ping_pong(&self) -> bool {
        self.reverse_duration > 0.0
    }

    pub fn is_infinite(&self) -> bool {
        self.loops < 0
    }

    /// Curve used on reverse legs.
    pub fn reverse_kind(&self) -> EaseKind {
        self.reverse_easing
            .unwrap_or_else(|| self.forward_easing.mirrored())
    }

    // -- Builder methods --

    pub fn with_ping_pong(mut self, reverse_duration: f32) -> Self {
        self.reverse_duration = reverse_duration;
        self
    }

    pub fn with_loops(mut self, loops: i32) -> Self {
        self.loops = loops;
        self
    }

    pub fn with_start_delay(mut self, delay: f32) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn with_reverse_delay(mut self, delay: f32) -> Self {
        self.reverse_delay = delay;
        self
    }

    pub fn with_loop_delay(mut self, delay: f32) -> Self {
        self.loop_delay = delay;
        self
    }

    pub fn with_easing(mut self, kind: EaseKind) -> Self {
        self.forward_easing = kind;
        self
    }

    pub fn with_reverse_easing(mut self, kind: EaseKind) -> Self {
        self.reverse_easing = Some(kind);
        self
    }

    pub fn with_ease_params(mut self, p1: f32, p2: f32) -> Self {
        self.ease_params = EaseParams::new(p1, p2);
        self
    }

    pub fn when_paused(mut self, tween_when_paused: bool) -> Self {
        self.tween_when_paused = tween_when_paused;
        self
    }

    pub fn with_time_dilation(mut self, use_time_dilation: bool) -> Self {
        self.use_time_dilation = use_time_dilation;
        self
    }
}

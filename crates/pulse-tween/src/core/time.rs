/// Per-tick time input shared by every tween advanced during one frame.
/// Read once per tick and applied uniformly, so no tween drifts from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Unscaled frame delta in seconds.
    pub delta: f32,
    /// Host time-dilation factor (1.0 = real time).
    pub time_dilation: f32,
    /// Whether the host application is paused this tick.
    pub host_paused: bool,
}

impl FrameTime {
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            time_dilation: 1.0,
            host_paused: false,
        }
    }

    /// Build from the unscaled and dilated deltas reported by a host loop.
    pub fn from_deltas(unscaled: f32, dilated: f32, host_paused: bool) -> Self {
        let time_dilation = if unscaled > 0.0 { dilated / unscaled } else { 1.0 };
        Self {
            delta: unscaled,
            time_dilation,
            host_paused,
        }
    }

    pub fn with_dilation(mut self, time_dilation: f32) -> Self {
        self.time_dilation = time_dilation;
        self
    }

    pub fn paused(mut self, host_paused: bool) -> Self {
        self.host_paused = host_paused;
        self
    }

    /// Effective delta for a tween that does or does not opt into dilation.
    /// This is the only place dilation is applied. Negative or non-finite
    /// results count as a zero-length frame; time never runs backwards.
    #[inline]
    pub fn scaled_delta(&self, use_time_dilation: bool) -> f32 {
        let delta = if use_time_dilation {
            self.delta * self.time_dilation
        } else {
            self.delta
        };
        if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            0.0
        }
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new(0.0)
    }
}

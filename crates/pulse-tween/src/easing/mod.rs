// easing/mod.rs
//
// Pure easing functions for tween interpolation.
// No dependencies on timelines or pools, just math.

pub mod curves;

use serde::{Deserialize, Serialize};

use curves::*;

/// Easing curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EaseKind {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Hermite smoothstep. Tunable edges (x0, x1).
    Smoothstep,
    /// Flat plateaus. Tunable step count.
    Stepped,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    /// Spring oscillation. Tunable (amplitude, period).
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
    /// Overshoot then settle. Tunable overshoot.
    InBack,
    OutBack,
    InOutBack,
}

impl EaseKind {
    pub const ALL: [EaseKind; 33] = [
        EaseKind::Linear,
        EaseKind::Smoothstep,
        EaseKind::Stepped,
        EaseKind::InSine,
        EaseKind::OutSine,
        EaseKind::InOutSine,
        EaseKind::InQuad,
        EaseKind::OutQuad,
        EaseKind::InOutQuad,
        EaseKind::InCubic,
        EaseKind::OutCubic,
        EaseKind::InOutCubic,
        EaseKind::InQuart,
        EaseKind::OutQuart,
        EaseKind::InOutQuart,
        EaseKind::InQuint,
        EaseKind::OutQuint,
        EaseKind::InOutQuint,
        EaseKind::InExpo,
        EaseKind::OutExpo,
        EaseKind::InOutExpo,
        EaseKind::InCirc,
        EaseKind::OutCirc,
        EaseKind::InOutCirc,
        EaseKind::InElastic,
        EaseKind::OutElastic,
        EaseKind::InOutElastic,
        EaseKind::InBounce,
        EaseKind::OutBounce,
        EaseKind::InOutBounce,
        EaseKind::InBack,
        EaseKind::OutBack,
        EaseKind::InOutBack,
    ];

    /// The In/Out counterpart, used for the reverse leg of a ping-pong.
    /// Symmetric kinds mirror to themselves.
    pub fn mirrored(self) -> Self {
        use EaseKind::*;
        match self {
            InSine => OutSine,
            OutSine => InSine,
            InQuad => OutQuad,
            OutQuad => InQuad,
            InCubic => OutCubic,
            OutCubic => InCubic,
            InQuart => OutQuart,
            OutQuart => InQuart,
            InQuint => OutQuint,
            OutQuint => InQuint,
            InExpo => OutExpo,
            OutExpo => InExpo,
            InCirc => OutCirc,
            OutCirc => InCirc,
            InElastic => OutElastic,
            OutElastic => InElastic,
            InBounce => OutBounce,
            OutBounce => InBounce,
            InBack => OutBack,
            OutBack => InBack,
            other => other,
        }
    }

    /// Whether this curve reads `EaseParams`.
    pub fn is_tunable(self) -> bool {
        use EaseKind::*;
        matches!(
            self,
            Smoothstep | Stepped | InElastic | OutElastic | InOutElastic | InBack | OutBack | InOutBack
        )
    }

    /// Apply the curve with default parameters. `t` is expected in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        ease(t, self)
    }
}

/// The two tunables shared by the parameterized curves.
/// Both zero means "use the curve's defaults".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EaseParams {
    pub p1: f32,
    pub p2: f32,
}

impl EaseParams {
    pub const DEFAULT: EaseParams = EaseParams { p1: 0.0, p2: 0.0 };

    pub fn new(p1: f32, p2: f32) -> Self {
        Self { p1, p2 }
    }

    pub fn is_default(&self) -> bool {
        self.p1 == 0.0 && self.p2 == 0.0
    }
}

/// Evaluate `kind` at progress `t` with default parameters.
/// Pure; callers clamp `t`.
pub fn ease(t: f32, kind: EaseKind) -> f32 {
    use EaseKind::*;
    match kind {
        Linear => linear(t),
        Smoothstep => smoothstep(t, 0.0, 1.0),
        Stepped => stepped(t, DEFAULT_STEPS),
        InSine => in_sine(t),
        OutSine => out_sine(t),
        InOutSine => in_out_sine(t),
        InQuad => in_quad(t),
        OutQuad => out_quad(t),
        InOutQuad => in_out_quad(t),
        InCubic => in_cubic(t),
        OutCubic => out_cubic(t),
        InOutCubic => in_out_cubic(t),
        InQuart => in_quart(t),
        OutQuart => out_quart(t),
        InOutQuart => in_out_quart(t),
        InQuint => in_quint(t),
        OutQuint => out_quint(t),
        InOutQuint => in_out_quint(t),
        InExpo => in_expo(t),
        OutExpo => out_expo(t),
        InOutExpo => in_out_expo(t),
        InCirc => in_circ(t),
        OutCirc => out_circ(t),
        InOutCirc => in_out_circ(t),
        InElastic => in_elastic(t, DEFAULT_ELASTIC_AMPLITUDE, DEFAULT_ELASTIC_PERIOD),
        OutElastic => out_elastic(t, DEFAULT_ELASTIC_AMPLITUDE, DEFAULT_ELASTIC_PERIOD),
        InOutElastic => in_out_elastic(t, DEFAULT_ELASTIC_AMPLITUDE, DEFAULT_ELASTIC_PERIOD),
        InBounce => in_bounce(t),
        OutBounce => out_bounce(t),
        InOutBounce => in_out_bounce(t),
        InBack => in_back(t, DEFAULT_BACK_OVERSHOOT),
        OutBack => out_back(t, DEFAULT_BACK_OVERSHOOT),
        InOutBack => in_out_back(t, DEFAULT_BACK_OVERSHOOT),
    }
}

/// Evaluate `kind` at progress `t` with explicit tunables.
///
/// Smoothstep reads `(x0, x1)`, Stepped reads the step count from `p1`,
/// Elastic reads `(amplitude, period)` and Back reads the overshoot from
/// `p1`. Every other curve ignores the parameters. When both are exactly
/// zero this is identical to [`ease`].
pub fn ease_with_params(t: f32, kind: EaseKind, p1: f32, p2: f32) -> f32 {
    if p1 == 0.0 && p2 == 0.0 {
        return ease(t, kind);
    }
    use EaseKind::*;
    match kind {
        Smoothstep => smoothstep(t, p1, p2),
        Stepped => stepped(t, p1.round() as i32),
        InElastic => in_elastic(t, p1, elastic_period(p2)),
        OutElastic => out_elastic(t, p1, elastic_period(p2)),
        InOutElastic => in_out_elastic(t, p1, elastic_period(p2)),
        InBack => in_back(t, p1),
        OutBack => out_back(t, p1),
        InOutBack => in_out_back(t, p1),
        other => ease(t, other),
    }
}

// Zero period would divide by zero inside the elastic sine term.
#[inline]
fn elastic_period(period: f32) -> f32 {
    if period > 0.0 {
        period
    } else {
        DEFAULT_ELASTIC_PERIOD
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: glam::Vec3, b: glam::Vec3, t: f32) -> glam::Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease_lerp(a: f32, b: f32, t: f32, kind: EaseKind) -> f32 {
    lerp(a, b, ease(t, kind))
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32, kind: EaseKind) -> glam::Vec2 {
    lerp_vec2(a, b, ease(t, kind))
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_lerp_vec3(a: glam::Vec3, b: glam::Vec3, t: f32, kind: EaseKind) -> glam::Vec3 {
    lerp_vec3(a, b, ease(t, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_curve_hits_its_endpoints() {
        for kind in EaseKind::ALL {
            let start = ease(0.0, kind);
            let end = ease(1.0, kind);
            assert!(start.abs() < 1e-5, "{:?} at 0 = {}", kind, start);
            assert!((end - 1.0).abs() < 1e-5, "{:?} at 1 = {}", kind, end);
        }
    }

    #[test]
    fn zero_params_match_defaults() {
        for kind in EaseKind::ALL {
            for &t in &[0.1, 0.33, 0.5, 0.77, 0.95] {
                assert_eq!(ease_with_params(t, kind, 0.0, 0.0), ease(t, kind), "{:?}", kind);
            }
        }
    }

    #[test]
    fn untunable_curves_ignore_params() {
        let kind = EaseKind::InOutCubic;
        assert!(!kind.is_tunable());
        assert_eq!(ease_with_params(0.4, kind, 3.0, 7.0), ease(0.4, kind));
    }

    #[test]
    fn explicit_default_params_match() {
        let t = 0.42;
        let explicit = ease_with_params(t, EaseKind::OutBack, curves::DEFAULT_BACK_OVERSHOOT, 0.0);
        assert!((explicit - ease(t, EaseKind::OutBack)).abs() < 1e-6);

        let explicit = ease_with_params(t, EaseKind::InOutElastic, 1.0, 0.2);
        assert!((explicit - ease(t, EaseKind::InOutElastic)).abs() < 1e-6);
    }

    #[test]
    fn stepped_reads_step_count() {
        assert_eq!(ease_with_params(0.6, EaseKind::Stepped, 2.0, 0.0), 0.5);
        assert_eq!(ease_with_params(0.65, EaseKind::Stepped, 5.0, 0.0), 0.6);
    }

    #[test]
    fn elastic_with_zero_period_stays_finite() {
        let v = ease_with_params(0.5, EaseKind::OutElastic, 1.5, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn out_quad_faster_start() {
        let mid = EaseKind::OutQuad.apply(0.5);
        assert!(mid > 0.5, "OutQuad at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_overshoots() {
        assert!(ease(0.3, EaseKind::InBack) < 0.0);
        assert!(ease(0.7, EaseKind::OutBack) > 1.0);
    }

    #[test]
    fn mirrored_is_an_involution() {
        for kind in EaseKind::ALL {
            assert_eq!(kind.mirrored().mirrored(), kind);
        }
        assert_eq!(EaseKind::InExpo.mirrored(), EaseKind::OutExpo);
        assert_eq!(EaseKind::InOutBounce.mirrored(), EaseKind::InOutBounce);
        assert_eq!(EaseKind::Stepped.mirrored(), EaseKind::Stepped);
    }

    #[test]
    fn kind_deserializes_by_name() {
        let kind: EaseKind = serde_json::from_str("\"InOutBack\"").unwrap();
        assert_eq!(kind, EaseKind::InOutBack);
    }

    #[test]
    fn ease_lerp_interpolates() {
        let result = ease_lerp(100.0, 200.0, 0.5, EaseKind::Linear);
        assert!((result - 150.0).abs() < 0.001);
        let v = ease_lerp_vec3(glam::Vec3::ZERO, glam::Vec3::splat(2.0), 0.5, EaseKind::Linear);
        assert!((v - glam::Vec3::ONE).length() < 1e-6);
    }
}

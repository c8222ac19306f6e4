use glam::{Quat, Vec2, Vec3};

use crate::easing::{lerp, lerp_vec2, lerp_vec3};

/// A value a pooled tween can animate.
///
/// `interpolate` receives eased progress, which may leave [0, 1] for
/// overshooting curves.
pub trait TweenValue: Copy + Default + Send + 'static {
    fn interpolate(start: Self, end: Self, t: f32) -> Self;
}

impl TweenValue for f32 {
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        lerp(start, end, t)
    }
}

impl TweenValue for Vec2 {
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        lerp_vec2(start, end, t)
    }
}

impl TweenValue for Vec3 {
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        lerp_vec3(start, end, t)
    }
}

impl TweenValue for Quat {
    /// Spherical interpolation along the shortest arc.
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn vectors_lerp() {
        let v = Vec3::interpolate(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 0.5);
        assert!((v - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        let v = Vec2::interpolate(Vec2::ONE, Vec2::splat(3.0), 0.25);
        assert!((v - Vec2::splat(1.5)).length() < 1e-6);
    }

    #[test]
    fn overshoot_extrapolates() {
        assert!((f32::interpolate(0.0, 10.0, 1.1) - 11.0).abs() < 1e-5);
    }

    #[test]
    fn quat_slerps() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_z(FRAC_PI_2);
        let mid = Quat::interpolate(a, b, 0.5);
        assert!(mid.angle_between(Quat::from_rotation_z(FRAC_PI_2 / 2.0)) < 1e-4);
    }
}

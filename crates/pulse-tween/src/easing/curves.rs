// easing/curves.rs
//
// Closed-form easing curves. Each maps t in [0, 1] to an eased value;
// callers clamp t. Elastic, Back and Bounce may leave [0, 1] in between
// the endpoints.

use std::f32::consts::PI;

pub const DEFAULT_ELASTIC_AMPLITUDE: f32 = 1.0;
pub const DEFAULT_ELASTIC_PERIOD: f32 = 0.2;
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;
pub const DEFAULT_STEPS: i32 = 10;

const BACK_IN_OUT_OVERSHOOT_MODIFIER: f32 = 1.525;

const BOUNCE_R: f32 = 1.0 / 2.75;
const BOUNCE_K0: f32 = 7.5625;
const BOUNCE_K1: f32 = BOUNCE_R;
const BOUNCE_K2: f32 = 2.0 * BOUNCE_R;
const BOUNCE_K3: f32 = 1.5 * BOUNCE_R;
const BOUNCE_K4: f32 = 2.5 * BOUNCE_R;
const BOUNCE_K5: f32 = 2.25 * BOUNCE_R;
const BOUNCE_K6: f32 = 2.625 * BOUNCE_R;

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Hermite smoothstep between the edges `x0` and `x1`.
#[inline]
pub fn smoothstep(t: f32, x0: f32, x1: f32) -> f32 {
    if x1 == x0 {
        return if t < x0 { 0.0 } else { 1.0 };
    }
    let x = ((t - x0) / (x1 - x0)).clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Quantize into `steps` flat plateaus.
#[inline]
pub fn stepped(t: f32, steps: i32) -> f32 {
    let steps = if steps < 1 { DEFAULT_STEPS } else { steps } as f32;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        (steps * t).floor() / steps
    }
}

// ── Sine ────────────────────────────────────────────────────────────────

#[inline]
pub fn in_sine(t: f32) -> f32 {
    1.0 - (t * PI * 0.5).cos()
}

#[inline]
pub fn out_sine(t: f32) -> f32 {
    (t * PI * 0.5).sin()
}

#[inline]
pub fn in_out_sine(t: f32) -> f32 {
    0.5 * (1.0 - (t * PI).cos())
}

// ── Polynomial ──────────────────────────────────────────────────────────

#[inline]
pub fn in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

#[inline]
pub fn in_out_quad(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        t * t2
    } else {
        let m = t - 1.0;
        1.0 - m * m * 2.0
    }
}

#[inline]
pub fn in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn out_cubic(t: f32) -> f32 {
    let m = t - 1.0;
    1.0 + m * m * m
}

#[inline]
pub fn in_out_cubic(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        t * t2 * t2
    } else {
        let m = t - 1.0;
        1.0 + m * m * m * 4.0
    }
}

#[inline]
pub fn in_quart(t: f32) -> f32 {
    t * t * t * t
}

#[inline]
pub fn out_quart(t: f32) -> f32 {
    let m = t - 1.0;
    1.0 - m * m * m * m
}

#[inline]
pub fn in_out_quart(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        t * t2 * t2 * t2
    } else {
        let m = t - 1.0;
        1.0 - m * m * m * m * 8.0
    }
}

#[inline]
pub fn in_quint(t: f32) -> f32 {
    t * t * t * t * t
}

#[inline]
pub fn out_quint(t: f32) -> f32 {
    let m = t - 1.0;
    1.0 + m * m * m * m * m
}

#[inline]
pub fn in_out_quint(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        t * t2 * t2 * t2 * t2
    } else {
        let m = t - 1.0;
        1.0 + m * m * m * m * m * 16.0
    }
}

// ── Exponential ─────────────────────────────────────────────────────────

#[inline]
pub fn in_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

#[inline]
pub fn out_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

#[inline]
pub fn in_out_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f32.powf(10.0 * (2.0 * t - 1.0) - 1.0)
    } else {
        1.0 - 2.0_f32.powf(-10.0 * (2.0 * t - 1.0) - 1.0)
    }
}

// ── Circular ────────────────────────────────────────────────────────────

#[inline]
pub fn in_circ(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

#[inline]
pub fn out_circ(t: f32) -> f32 {
    let m = t - 1.0;
    (1.0 - m * m).max(0.0).sqrt()
}

#[inline]
pub fn in_out_circ(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        (1.0 - (1.0 - t2 * t2).max(0.0).sqrt()) * 0.5
    } else {
        let m = t - 1.0;
        ((1.0 - 4.0 * m * m).max(0.0).sqrt() + 1.0) * 0.5
    }
}

// ── Elastic ─────────────────────────────────────────────────────────────

/// Phase shift so the oscillation starts at rest for the given amplitude.
#[inline]
fn elastic_phase(amplitude: f32, period: f32) -> f32 {
    if amplitude > 1.0 {
        period * (1.0 / amplitude).asin() / (2.0 * PI)
    } else {
        period / 4.0
    }
}

#[inline]
pub fn in_elastic(t: f32, amplitude: f32, period: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let m = t - 1.0;
    let s = elastic_phase(amplitude, period);
    -(amplitude * 2.0_f32.powf(10.0 * m) * ((m - s) * (2.0 * PI) / period).sin())
}

#[inline]
pub fn out_elastic(t: f32, amplitude: f32, period: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let s = elastic_phase(amplitude, period);
    1.0 + amplitude * 2.0_f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / period).sin()
}

#[inline]
pub fn in_out_elastic(t: f32, amplitude: f32, period: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let m = 2.0 * t - 1.0;
    let s = elastic_phase(amplitude, period);
    if m < 0.0 {
        0.5 * -(amplitude * 2.0_f32.powf(10.0 * m) * ((m - s) * (2.0 * PI) / period).sin())
    } else {
        1.0 + 0.5 * (amplitude * 2.0_f32.powf(-10.0 * m) * ((m - s) * (2.0 * PI) / period).sin())
    }
}

// ── Bounce ──────────────────────────────────────────────────────────────

#[inline]
pub fn out_bounce(t: f32) -> f32 {
    if t < BOUNCE_K1 {
        BOUNCE_K0 * t * t
    } else if t < BOUNCE_K2 {
        let t2 = t - BOUNCE_K3;
        BOUNCE_K0 * t2 * t2 + 0.75
    } else if t < BOUNCE_K4 {
        let t2 = t - BOUNCE_K5;
        BOUNCE_K0 * t2 * t2 + 0.9375
    } else {
        let t2 = t - BOUNCE_K6;
        BOUNCE_K0 * t2 * t2 + 0.984375
    }
}

#[inline]
pub fn in_bounce(t: f32) -> f32 {
    1.0 - out_bounce(1.0 - t)
}

#[inline]
pub fn in_out_bounce(t: f32) -> f32 {
    let t2 = t * 2.0;
    if t2 < 1.0 {
        0.5 - 0.5 * out_bounce(1.0 - t2)
    } else {
        0.5 + 0.5 * out_bounce(t2 - 1.0)
    }
}

// ── Back (overshoot) ────────────────────────────────────────────────────

#[inline]
pub fn in_back(t: f32, overshoot: f32) -> f32 {
    t * t * ((overshoot + 1.0) * t - overshoot)
}

#[inline]
pub fn out_back(t: f32, overshoot: f32) -> f32 {
    let m = t - 1.0;
    1.0 + m * m * (m * (overshoot + 1.0) + overshoot)
}

#[inline]
pub fn in_out_back(t: f32, overshoot: f32) -> f32 {
    let t2 = t * 2.0;
    let s = overshoot * BACK_IN_OUT_OVERSHOOT_MODIFIER;
    if t < 0.5 {
        t * t2 * (t2 * (s + 1.0) - s)
    } else {
        let m = t - 1.0;
        1.0 + 2.0 * m * m * (2.0 * m * (s + 1.0) + s)
    }
}

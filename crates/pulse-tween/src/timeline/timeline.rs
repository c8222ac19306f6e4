// timeline/timeline.rs
//
// One tween's playback state machine:
// start delay -> forward leg -> [reverse delay -> reverse leg] -> [loop delay -> ...] -> complete.
//
// Advancing never skips an edge. A tick that already carries JustStarted or
// JustResumed defers a reached leg boundary to the next tick, and any time
// past a boundary is carried forward instead of dropped.

use std::fmt;
use std::mem;

use crate::api::types::{TweenId, TweenStatus};
use crate::core::time::FrameTime;
use crate::easing::ease_with_params;

use super::owner::OwnerRef;
use super::params::TweenParams;

/// Playback state of a single tween.
#[derive(Debug, Clone)]
pub struct TweenTimeline {
    id: TweenId,
    sequence: Option<TweenId>,
    params: TweenParams,
    owner: Option<OwnerRef>,
    /// Loops still to play. Negative means complete.
    loops_remaining: i32,
    start_delay_remaining: f32,
    /// Time spent in the reverse or loop delay preceding the current leg.
    leg_delay_elapsed: f32,
    looped_once: bool,
    reverse: bool,
    /// Position within the current leg, always in [0, leg duration].
    elapsed: f32,
    total_time: f32,
    paused: bool,
    status: TweenStatus,
    /// Time taken from a frame but not yet applied to a leg.
    carry: f32,
    completed_overshoot: f32,
}

impl TweenTimeline {
    /// Build a timeline. `params` are assumed valid; see [`TweenParams::validate`].
    pub fn new(id: TweenId, params: TweenParams) -> Self {
        Self {
            id,
            sequence: None,
            loops_remaining: params.loops.max(0),
            start_delay_remaining: params.start_delay,
            params,
            owner: None,
            leg_delay_elapsed: 0.0,
            looped_once: false,
            reverse: false,
            elapsed: 0.0,
            total_time: 0.0,
            paused: false,
            status: TweenStatus::WaitingToStart,
            carry: 0.0,
            completed_overshoot: 0.0,
        }
    }

    pub fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner = Some(owner);
        self
    }

    pub(crate) fn with_sequence(mut self, sequence: TweenId) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn id(&self) -> TweenId {
        self.id
    }

    /// The sequence this timeline is a leg of, if any.
    pub fn sequence(&self) -> Option<TweenId> {
        self.sequence
    }

    pub fn params(&self) -> &TweenParams {
        &self.params
    }

    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_ref()
    }

    pub fn status(&self) -> TweenStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.loops_remaining < 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn loops_remaining(&self) -> i32 {
        self.loops_remaining
    }

    /// Duration of the leg currently playing.
    pub fn duration(&self) -> f32 {
        if self.reverse {
            self.params.reverse_duration
        } else {
            self.params.forward_duration
        }
    }

    /// Playing time across every leg, delay and loop, excluding the start
    /// delay. 0 for infinite timelines.
    pub fn total_duration(&self) -> f32 {
        let p = &self.params;
        if p.is_infinite() {
            return 0.0;
        }
        let plays = (p.loops + 1) as f32;
        let reverse_delays = if p.is_ping_pong() { p.reverse_delay * plays } else { 0.0 };
        (p.forward_duration + p.reverse_duration) * plays + reverse_delays + p.loop_delay * p.loops as f32
    }

    /// Fraction of `total_duration` played so far, in [0, 1].
    pub fn completion(&self) -> f32 {
        let total = self.total_duration();
        if total > 0.0 {
            (self.total_time / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Eased progress of the current leg.
    pub fn value(&self) -> f32 {
        let duration = self.duration();
        let progress = if duration > 0.0 {
            (self.elapsed / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let kind = if self.reverse {
            self.params.reverse_kind()
        } else {
            self.params.forward_easing
        };
        let ease = self.params.ease_params;
        ease_with_params(progress, kind, ease.p1, ease.p2)
    }

    /// Rewind to the freshly created state, start delay included.
    pub fn reset(&mut self) {
        self.loops_remaining = self.params.loops.max(0);
        self.start_delay_remaining = self.params.start_delay;
        self.leg_delay_elapsed = 0.0;
        self.looped_once = false;
        self.reverse = false;
        self.elapsed = 0.0;
        self.total_time = 0.0;
        self.paused = false;
        self.status = TweenStatus::WaitingToStart;
        self.carry = 0.0;
        self.completed_overshoot = 0.0;
    }

    /// Time that ran past the end of the final leg. Only available once the
    /// timeline is complete, and only once.
    pub fn take_completed_overshoot(&mut self) -> Option<f32> {
        if !self.is_complete() {
            return None;
        }
        Some(mem::take(&mut self.completed_overshoot))
    }

    /// Add time to be played on the next update, e.g. spill from a previous
    /// sequence leg.
    pub fn inject_time(&mut self, time: f32) {
        if time > 0.0 {
            self.carry += time;
        }
    }

    /// Advance by one frame and return the new status.
    pub fn update(&mut self, frame: FrameTime) -> TweenStatus {
        if self.owner.as_ref().is_some_and(|owner| !owner.is_alive()) {
            self.loops_remaining = -1;
            if self.status != TweenStatus::Completed {
                self.completed_overshoot = 0.0;
                self.status = TweenStatus::Completed;
            }
            return self.status;
        }

        if self.is_complete() {
            self.status = TweenStatus::Completed;
            return self.status;
        }

        if self.paused || (frame.host_paused && !self.params.tween_when_paused) {
            self.status = match self.status {
                TweenStatus::JustPaused | TweenStatus::Paused => TweenStatus::Paused,
                _ => TweenStatus::JustPaused,
            };
            return self.status;
        }

        let mut delta = frame.scaled_delta(self.params.use_time_dilation) + mem::take(&mut self.carry);

        if self.start_delay_remaining > 0.0 {
            if delta < self.start_delay_remaining {
                self.start_delay_remaining -= delta;
                self.status = TweenStatus::WaitingToStart;
                return self.status;
            }
            delta -= self.start_delay_remaining;
            self.start_delay_remaining = 0.0;
            if delta <= 0.0 {
                self.status = TweenStatus::WaitingToStart;
                return self.status;
            }
        }

        self.total_time += delta;
        self.status = match self.status {
            TweenStatus::WaitingToStart => TweenStatus::JustStarted,
            TweenStatus::JustPaused | TweenStatus::Paused => TweenStatus::JustResumed,
            _ => TweenStatus::Updating,
        };
        let edge_tick = self.status != TweenStatus::Updating;

        let Some(delta) = self.consume_leg_delay(delta) else {
            return self.status;
        };

        let duration = self.duration();
        let overshoot = if self.reverse {
            self.elapsed -= delta;
            -self.elapsed
        } else {
            self.elapsed += delta;
            self.elapsed - duration
        };
        if overshoot < 0.0 {
            return self.status;
        }

        if edge_tick {
            self.elapsed = if self.reverse { 0.0 } else { duration };
            self.total_time -= overshoot;
            self.carry += overshoot;
            return self.status;
        }

        self.cross_boundary(overshoot)
    }

    fn leg_delay(&self) -> f32 {
        if self.reverse {
            self.params.reverse_delay
        } else if self.looped_once {
            self.params.loop_delay
        } else {
            0.0
        }
    }

    /// Spend `delta` on a pending reverse or loop delay. Returns what is
    /// left for the leg, or `None` while the delay is still running.
    fn consume_leg_delay(&mut self, delta: f32) -> Option<f32> {
        let delay = self.leg_delay();
        if delay <= 0.0 || self.leg_delay_elapsed >= delay {
            return Some(delta);
        }
        self.leg_delay_elapsed += delta;
        if self.leg_delay_elapsed < delay {
            return None;
        }
        Some(self.leg_delay_elapsed - delay)
    }

    fn cross_boundary(&mut self, overshoot: f32) -> TweenStatus {
        self.leg_delay_elapsed = 0.0;

        if self.params.is_ping_pong() && !self.reverse {
            self.reverse = true;
            self.elapsed = self.params.reverse_duration;
            self.status = TweenStatus::JustReachedPingPongApex;
            self.spill(overshoot);
            return self.status;
        }

        self.looped_once = true;
        if !self.params.is_infinite() {
            self.loops_remaining -= 1;
        }

        if self.loops_remaining < 0 {
            self.elapsed = if self.reverse { 0.0 } else { self.params.forward_duration };
            self.total_time -= overshoot;
            self.completed_overshoot = overshoot;
            self.status = TweenStatus::JustCompleted;
        } else {
            self.reverse = false;
            self.elapsed = 0.0;
            self.status = TweenStatus::JustLooped;
            self.spill(overshoot);
        }
        self.status
    }

    /// Apply time that ran past a boundary to the leg that follows it.
    /// At most one leg's worth is applied; the rest waits in `carry`.
    fn spill(&mut self, time: f32) {
        let Some(time) = self.consume_leg_delay(time) else {
            return;
        };
        let duration = self.duration();
        let step = time.min(duration);
        self.elapsed = if self.reverse { duration - step } else { step };
        let rest = time - step;
        if rest > 0.0 {
            self.total_time -= rest;
            self.carry += rest;
        }
    }
}

impl fmt::Display for TweenTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {}: Status: {:?}, Time: {:.3}/{:.3}, Loops: {}",
            self.id,
            self.status,
            self.elapsed,
            self.duration(),
            self.loops_remaining
        )?;
        match &self.owner {
            Some(owner) if !owner.is_alive() => write!(f, ", Owner is no more"),
            Some(owner) => write!(f, ", Owner: {}", owner.name()),
            None => Ok(()),
        }
    }
}

// pool/instance.rs
//
// A pooled tween driving one typed value through a callback.
// Lives in a pool slot for the life of the pool; leases re-initialize it.

use crate::api::types::{TweenId, TweenStatus};
use crate::core::time::FrameTime;
use crate::easing::{EaseKind, EaseParams};
use crate::timeline::{TweenParams, TweenTimeline};

use super::value::TweenValue;

pub type UpdateFn<T> = Box<dyn FnMut(T) + Send>;
pub type EdgeFn = Box<dyn FnMut() + Send>;

/// Typed tween owned by a [`RecyclingPool`](super::RecyclingPool) slot.
pub struct TweenInstance<T: TweenValue> {
    timeline: TweenTimeline,
    start: T,
    end: T,
    on_update: Option<UpdateFn<T>>,
    on_ping_pong: Option<EdgeFn>,
    on_loop: Option<EdgeFn>,
    on_complete: Option<EdgeFn>,
    active: bool,
    auto_destroy: bool,
    time_scale: f32,
}

impl<T: TweenValue> Default for TweenInstance<T> {
    fn default() -> Self {
        Self {
            timeline: TweenTimeline::new(TweenId::NIL, TweenParams::default()),
            start: T::default(),
            end: T::default(),
            on_update: None,
            on_ping_pong: None,
            on_loop: None,
            on_complete: None,
            active: false,
            auto_destroy: true,
            time_scale: 1.0,
        }
    }
}

impl<T: TweenValue> TweenInstance<T> {
    /// Lease setup. Pooled tweens follow host time dilation unless told
    /// otherwise. A non-positive duration is raised to a millisecond.
    pub fn initialize(
        &mut self,
        start: T,
        end: T,
        on_update: impl FnMut(T) + Send + 'static,
        duration: f32,
        ease: EaseKind,
    ) {
        let duration = if duration > 0.0 { duration } else { 0.001 };
        let params = TweenParams::new(duration)
            .with_easing(ease)
            .with_time_dilation(true);
        self.timeline = TweenTimeline::new(TweenId::NIL, params);
        self.start = start;
        self.end = end;
        self.on_update = Some(Box::new(on_update));
        self.on_ping_pong = None;
        self.on_loop = None;
        self.on_complete = None;
        self.active = true;
        self.auto_destroy = true;
        self.time_scale = 1.0;
    }

    /// Begin playback from the top, start delay included.
    pub fn start(&mut self) {
        self.timeline.reset();
    }

    /// Restart a live tween.
    pub fn restart(&mut self) {
        if self.active {
            self.start();
        }
    }

    /// Release back to the pool. Callbacks are dropped immediately.
    pub fn destroy(&mut self) {
        self.active = false;
        self.on_update = None;
        self.on_ping_pong = None;
        self.on_loop = None;
        self.on_complete = None;
    }

    pub fn pause(&mut self) {
        self.timeline.set_paused(true);
    }

    pub fn unpause(&mut self) {
        self.timeline.set_paused(false);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.timeline.is_paused()
    }

    pub fn status(&self) -> TweenStatus {
        self.timeline.status()
    }

    pub fn timeline(&self) -> &TweenTimeline {
        &self.timeline
    }

    /// Current interpolated value.
    pub fn value(&self) -> T {
        T::interpolate(self.start, self.end, self.timeline.value())
    }

    // -- Setters (chainable, applied before the tween starts) --

    fn configure(&mut self, apply: impl FnOnce(&mut TweenParams)) -> &mut Self {
        let mut params = self.timeline.params().clone();
        apply(&mut params);
        let paused = self.timeline.is_paused();
        self.timeline = TweenTimeline::new(TweenId::NIL, params);
        self.timeline.set_paused(paused);
        self
    }

    pub fn set_start_delay(&mut self, delay: f32) -> &mut Self {
        self.configure(|p| p.start_delay = delay.max(0.0))
    }

    /// Repeats after the first play. Negative loops forever.
    pub fn set_loops(&mut self, loops: i32) -> &mut Self {
        self.configure(|p| p.loops = loops)
    }

    pub fn set_loop_delay(&mut self, delay: f32) -> &mut Self {
        self.configure(|p| p.loop_delay = delay.max(0.0))
    }

    /// Play back to the start after reaching the end, taking as long as the
    /// forward leg.
    pub fn set_ping_pong(&mut self, ping_pong: bool) -> &mut Self {
        self.configure(|p| p.reverse_duration = if ping_pong { p.forward_duration } else { 0.0 })
    }

    pub fn set_ping_pong_delay(&mut self, delay: f32) -> &mut Self {
        self.configure(|p| p.reverse_delay = delay.max(0.0))
    }

    /// Curve for the way back. Defaults to the forward curve's mirror.
    pub fn set_reverse_easing(&mut self, kind: EaseKind) -> &mut Self {
        self.configure(|p| p.reverse_easing = Some(kind))
    }

    pub fn set_ease_params(&mut self, p1: f32, p2: f32) -> &mut Self {
        self.configure(|p| p.ease_params = EaseParams::new(p1, p2))
    }

    pub fn set_tick_when_paused(&mut self, tick_when_paused: bool) -> &mut Self {
        self.configure(|p| p.tween_when_paused = tick_when_paused)
    }

    pub fn set_time_dilation(&mut self, use_time_dilation: bool) -> &mut Self {
        self.configure(|p| p.use_time_dilation = use_time_dilation)
    }

    /// Playback speed multiplier. Sign is ignored.
    pub fn set_time_scale(&mut self, scale: f32) -> &mut Self {
        self.time_scale = scale.abs();
        self
    }

    /// Release to the pool on completion (default), or pause in place.
    pub fn set_auto_destroy(&mut self, auto_destroy: bool) -> &mut Self {
        self.auto_destroy = auto_destroy;
        self
    }

    pub fn on_ping_pong(&mut self, handler: impl FnMut() + Send + 'static) -> &mut Self {
        self.on_ping_pong = Some(Box::new(handler));
        self
    }

    pub fn on_loop(&mut self, handler: impl FnMut() + Send + 'static) -> &mut Self {
        self.on_loop = Some(Box::new(handler));
        self
    }

    pub fn on_complete(&mut self, handler: impl FnMut() + Send + 'static) -> &mut Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    /// Advance one frame. Returns whether the instance is still leased.
    pub fn update(&mut self, frame: FrameTime) -> bool {
        if !self.active {
            return false;
        }
        let frame = FrameTime {
            delta: frame.delta * self.time_scale,
            ..frame
        };
        let status = self.timeline.update(frame);

        match status {
            TweenStatus::WaitingToStart
            | TweenStatus::JustPaused
            | TweenStatus::Paused
            | TweenStatus::Completed => {}
            _ => {
                let value = self.value();
                if let Some(on_update) = self.on_update.as_mut() {
                    on_update(value);
                }
            }
        }

        match status {
            TweenStatus::JustReachedPingPongApex => {
                if let Some(handler) = self.on_ping_pong.as_mut() {
                    handler();
                }
            }
            TweenStatus::JustLooped => {
                if let Some(handler) = self.on_loop.as_mut() {
                    handler();
                }
            }
            TweenStatus::JustCompleted => {
                if let Some(handler) = self.on_complete.as_mut() {
                    handler();
                }
                if self.auto_destroy {
                    self.destroy();
                } else {
                    self.pause();
                }
            }
            _ => {}
        }

        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<f32>>>, impl FnMut(f32) + Send + 'static) {
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = values.clone();
        (values, move |v| sink.lock().unwrap().push(v))
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        (count, move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn started(start: f32, end: f32, duration: f32) -> (TweenInstance<f32>, Arc<Mutex<Vec<f32>>>) {
        let (values, on_update) = recorder();
        let mut tween = TweenInstance::default();
        tween.initialize(start, end, on_update, duration, EaseKind::Linear);
        tween.start();
        (tween, values)
    }

    #[test]
    fn drives_callback_and_releases() {
        let (mut tween, values) = started(0.0, 10.0, 1.0);
        let (completed, on_complete) = counter();
        tween.on_complete(on_complete);

        assert!(tween.update(FrameTime::new(0.5)));
        assert!(!tween.update(FrameTime::new(0.5)));
        assert_eq!(*values.lock().unwrap(), vec![5.0, 10.0]);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert!(!tween.is_active());
    }

    #[test]
    fn without_auto_destroy_pauses_at_end() {
        let (mut tween, _) = started(0.0, 1.0, 0.5);
        tween.set_auto_destroy(false);
        tween.update(FrameTime::new(0.25));
        tween.update(FrameTime::new(0.25));
        assert!(tween.is_active());
        assert!(tween.is_paused());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn ping_pong_fires_handler_and_returns() {
        let (mut tween, values) = started(0.0, 4.0, 1.0);
        let (apex, on_ping_pong) = counter();
        tween.set_ping_pong(true).on_ping_pong(on_ping_pong);
        tween.start();
        for _ in 0..4 {
            tween.update(FrameTime::new(0.5));
        }
        assert_eq!(apex.load(Ordering::SeqCst), 1);
        assert!(!tween.is_active());
        assert_eq!(values.lock().unwrap().last().copied(), Some(0.0));
    }

    #[test]
    fn loops_fire_handler() {
        let (mut tween, _) = started(0.0, 1.0, 0.5);
        let (loops, on_loop) = counter();
        tween.set_loops(2).on_loop(on_loop);
        tween.start();
        for _ in 0..10 {
            tween.update(FrameTime::new(0.25));
        }
        assert_eq!(loops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn time_scale_speeds_up_playback() {
        let (mut tween, values) = started(0.0, 10.0, 1.0);
        tween.set_time_scale(-2.0);
        tween.update(FrameTime::new(0.25));
        assert_eq!(*values.lock().unwrap(), vec![5.0]);
    }

    #[test]
    fn follows_dilation_by_default() {
        let (mut tween, values) = started(0.0, 10.0, 1.0);
        tween.update(FrameTime::new(0.5).with_dilation(0.5));
        assert_eq!(*values.lock().unwrap(), vec![2.5]);
    }

    #[test]
    fn start_delay_suppresses_updates() {
        let (mut tween, values) = started(0.0, 10.0, 1.0);
        tween.set_start_delay(0.5);
        tween.start();
        tween.update(FrameTime::new(0.25));
        assert!(values.lock().unwrap().is_empty());
    }

    #[test]
    fn destroy_drops_callbacks() {
        let (mut tween, values) = started(0.0, 10.0, 1.0);
        tween.destroy();
        assert!(!tween.update(FrameTime::new(0.5)));
        assert!(values.lock().unwrap().is_empty());
        assert_eq!(Arc::strong_count(&values), 1);
    }
}

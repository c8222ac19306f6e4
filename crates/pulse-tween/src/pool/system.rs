// pool/system.rs
//
// Typed front door to the tween pools: one recycling pool per supported
// value type, pre-warmed from config and updated once per frame.

use glam::{Quat, Vec2, Vec3};

use crate::core::config::TweenConfig;
use crate::core::error::{Result, TweenError};
use crate::core::time::FrameTime;
use crate::easing::EaseKind;

use super::instance::TweenInstance;
use super::recycling::{RecyclingPool, TweenHandle};
use super::value::TweenValue;

/// A value type with a dedicated pool inside [`TweenSystem`].
pub trait PooledValue: TweenValue {
    /// Name used in capacity warnings.
    const NAME: &'static str;

    fn pool(system: &TweenSystem) -> &RecyclingPool<Self>;
    fn pool_mut(system: &mut TweenSystem) -> &mut RecyclingPool<Self>;
}

macro_rules! pooled_value {
    ($ty:ty, $name:literal, $field:ident) => {
        impl PooledValue for $ty {
            const NAME: &'static str = $name;

            fn pool(system: &TweenSystem) -> &RecyclingPool<Self> {
                &system.$field
            }

            fn pool_mut(system: &mut TweenSystem) -> &mut RecyclingPool<Self> {
                &mut system.$field
            }
        }
    };
}

pooled_value!(f32, "float", floats);
pooled_value!(Vec3, "vector", vectors);
pooled_value!(Vec2, "vector2", vectors2);
pooled_value!(Quat, "quaternion", quats);

/// Requested pool sizes, for capacity diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Reserved {
    floats: usize,
    vectors: usize,
    vectors2: usize,
    quats: usize,
}

/// Owner of the four typed tween pools.
pub struct TweenSystem {
    floats: RecyclingPool<f32>,
    vectors: RecyclingPool<Vec3>,
    vectors2: RecyclingPool<Vec2>,
    quats: RecyclingPool<Quat>,
    reserved: Reserved,
}

impl Default for TweenSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenSystem {
    /// Pools pre-warmed to the default capacities.
    pub fn new() -> Self {
        Self::from_config(&TweenConfig::default())
    }

    pub fn from_config(config: &TweenConfig) -> Self {
        let mut system = Self {
            floats: RecyclingPool::default(),
            vectors: RecyclingPool::default(),
            vectors2: RecyclingPool::default(),
            quats: RecyclingPool::default(),
            reserved: Reserved::default(),
        };
        system.ensure_capacity(
            config.float_capacity,
            config.vector_capacity,
            config.vector2_capacity,
            config.quat_capacity,
        );
        log::debug!(
            "TweenSystem: pools warmed (float {}, vector {}, vector2 {}, quaternion {})",
            config.float_capacity,
            config.vector_capacity,
            config.vector2_capacity,
            config.quat_capacity
        );
        system
    }

    /// Lease a pooled tween from `start` to `end` over `duration` seconds.
    /// The tween starts on the next [`update`](Self::update); chain further
    /// setup through [`instance_mut`](Self::instance_mut) before then.
    pub fn play<T: PooledValue>(
        &mut self,
        start: T,
        end: T,
        on_update: impl FnMut(T) + Send + 'static,
        duration: f32,
        ease: EaseKind,
    ) -> Result<TweenHandle<T>> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(TweenError::InvalidDuration(duration));
        }
        let (handle, instance) = T::pool_mut(self).create_tween();
        instance.initialize(start, end, on_update, duration, ease);
        Ok(handle)
    }

    pub fn instance<T: PooledValue>(&self, handle: TweenHandle<T>) -> Option<&TweenInstance<T>> {
        T::pool(self).get(handle)
    }

    pub fn instance_mut<T: PooledValue>(
        &mut self,
        handle: TweenHandle<T>,
    ) -> Option<&mut TweenInstance<T>> {
        T::pool_mut(self).get_mut(handle)
    }

    /// Stop a pooled tween early. Its callbacks are dropped immediately.
    pub fn destroy<T: PooledValue>(&mut self, handle: TweenHandle<T>) -> bool {
        T::pool_mut(self).destroy(handle)
    }

    /// Advance every pool by one frame.
    pub fn update(&mut self, frame: FrameTime) {
        self.floats.update(frame);
        self.vectors.update(frame);
        self.vectors2.update(frame);
        self.quats.update(frame);
    }

    /// Destroy and recycle every leased tween of every type.
    pub fn clear_active_tweens(&mut self) {
        self.floats.clear_active_tweens();
        self.vectors.clear_active_tweens();
        self.vectors2.clear_active_tweens();
        self.quats.clear_active_tweens();
    }

    /// Grow each pool to at least the given size and remember the request.
    pub fn ensure_capacity(&mut self, floats: usize, vectors: usize, vectors2: usize, quats: usize) {
        self.floats.ensure_capacity(floats);
        self.vectors.ensure_capacity(vectors);
        self.vectors2.ensure_capacity(vectors2);
        self.quats.ensure_capacity(quats);
        self.reserved = Reserved {
            floats: self.reserved.floats.max(floats),
            vectors: self.reserved.vectors.max(vectors),
            vectors2: self.reserved.vectors2.max(vectors2),
            quats: self.reserved.quats.max(quats),
        };
    }

    pub fn ensure_capacity_all(&mut self, capacity: usize) {
        self.ensure_capacity(capacity, capacity, capacity, capacity);
    }

    /// Warn about every pool that grew past its reserved size.
    /// Returns the total number of instances held across pools.
    pub fn check_tween_capacity(&self) -> usize {
        fn check<T: PooledValue>(pool: &RecyclingPool<T>, reserved: usize) -> usize {
            let capacity = pool.capacity();
            if capacity > reserved {
                log::warn!(
                    "Tween {} pool grew to {} instances (reserved {}); raise its capacity",
                    T::NAME,
                    capacity,
                    reserved
                );
            }
            capacity
        }

        check(&self.floats, self.reserved.floats)
            + check(&self.vectors, self.reserved.vectors)
            + check(&self.vectors2, self.reserved.vectors2)
            + check(&self.quats, self.reserved.quats)
    }

    /// Leased tweens across all pools, pending ones included.
    pub fn active_count(&self) -> usize {
        fn leased<T: TweenValue>(pool: &RecyclingPool<T>) -> usize {
            pool.active_len() + pool.pending_len()
        }
        leased(&self.floats) + leased(&self.vectors) + leased(&self.vectors2) + leased(&self.quats)
    }

    pub fn pool<T: PooledValue>(&self) -> &RecyclingPool<T> {
        T::pool(self)
    }

    /// Evaluate an easing curve without leasing anything.
    pub fn ease(t: f32, kind: EaseKind) -> f32 {
        crate::easing::ease(t, kind)
    }
}

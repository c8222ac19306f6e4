// pool/recycling.rs
//
// Contiguous arena of pooled tween instances.
//
// Slots never move or deallocate; three index buckets track which slots are
// active, waiting to start, or free. Bucket vectors are reserved to the slot
// count, so a pool whose capacity has settled never allocates in `update`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::core::time::FrameTime;

use super::instance::TweenInstance;
use super::value::TweenValue;

/// Generation-tagged reference to a pool slot. Goes stale once the slot is
/// released, so a recycled instance can never be reached through an old
/// handle.
pub struct TweenHandle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TweenHandle<T> {
    fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u32,
            generation,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for TweenHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TweenHandle<T> {}

impl<T> PartialEq for TweenHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for TweenHandle<T> {}

impl<T> Hash for TweenHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for TweenHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TweenHandle({}v{})", self.index, self.generation)
    }
}

struct Slot<T: TweenValue> {
    instance: TweenInstance<T>,
    generation: u32,
}

impl<T: TweenValue> Default for Slot<T> {
    fn default() -> Self {
        Self {
            instance: TweenInstance::default(),
            generation: 0,
        }
    }
}

/// Object pool of tween instances for one value type.
pub struct RecyclingPool<T: TweenValue> {
    slots: Vec<Slot<T>>,
    active: Vec<usize>,
    /// Leased this frame, started on the next `update`.
    pending: Vec<usize>,
    free: Vec<usize>,
}

impl<T: TweenValue> RecyclingPool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut pool = Self {
            slots: Vec::new(),
            active: Vec::new(),
            pending: Vec::new(),
            free: Vec::new(),
        };
        pool.ensure_capacity(capacity);
        pool
    }

    /// Grow (never shrink) to at least `capacity` instances in total.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity <= self.slots.len() {
            return;
        }
        self.slots.reserve(capacity - self.slots.len());
        while self.slots.len() < capacity {
            self.free.push(self.slots.len());
            self.slots.push(Slot::default());
        }
        self.reserve_buckets();
    }

    fn reserve_buckets(&mut self) {
        let n = self.slots.len();
        for bucket in [&mut self.active, &mut self.pending, &mut self.free] {
            bucket.reserve(n.saturating_sub(bucket.len()));
        }
    }

    /// Lease an instance. It starts on the next `update`.
    /// Never fails: an empty free list grows the pool by one.
    pub fn create_tween(&mut self) -> (TweenHandle<T>, &mut TweenInstance<T>) {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.slots.len();
                log::debug!("Tween pool grew past its reserve to {} instances", index + 1);
                self.slots.push(Slot::default());
                self.reserve_buckets();
                index
            }
        };
        self.pending.push(index);
        let slot = &mut self.slots[index];
        (TweenHandle::new(index, slot.generation), &mut slot.instance)
    }

    /// Start pending instances, advance everything active, and recycle
    /// whatever became inactive.
    pub fn update(&mut self, frame: FrameTime) {
        for index in self.pending.drain(..) {
            self.slots[index].instance.start();
            self.active.push(index);
        }

        let slots = &mut self.slots;
        let free = &mut self.free;
        self.active.retain(|&index| {
            let slot = &mut slots[index];
            if slot.instance.update(frame) {
                return true;
            }
            slot.generation = slot.generation.wrapping_add(1);
            free.push(index);
            false
        });
    }

    /// Destroy and recycle every leased instance.
    pub fn clear_active_tweens(&mut self) {
        for index in self.pending.drain(..).chain(self.active.drain(..)) {
            let slot = &mut self.slots[index];
            slot.instance.destroy();
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }

    pub fn get(&self, handle: TweenHandle<T>) -> Option<&TweenInstance<T>> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .map(|slot| &slot.instance)
    }

    pub fn get_mut(&mut self, handle: TweenHandle<T>) -> Option<&mut TweenInstance<T>> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .map(|slot| &mut slot.instance)
    }

    /// Stop a leased instance; its slot is recycled on the next `update`.
    /// Returns false if the handle is stale or already destroyed.
    pub fn destroy(&mut self, handle: TweenHandle<T>) -> bool {
        match self.get_mut(handle) {
            Some(instance) if instance.is_active() => {
                instance.destroy();
                true
            }
            _ => false,
        }
    }

    /// Instances held by the pool: active + pending + free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

impl<T: TweenValue> Default for RecyclingPool<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EaseKind;

    fn lease(pool: &mut RecyclingPool<f32>, duration: f32) -> TweenHandle<f32> {
        let (handle, instance) = pool.create_tween();
        instance.initialize(0.0, 1.0, |_| {}, duration, EaseKind::Linear);
        handle
    }

    fn assert_balanced(pool: &RecyclingPool<f32>) {
        assert_eq!(
            pool.active_len() + pool.pending_len() + pool.free_len(),
            pool.capacity()
        );
    }

    #[test]
    fn leases_move_through_buckets() {
        let mut pool = RecyclingPool::<f32>::new(4);
        assert_eq!(pool.free_len(), 4);

        let handle = lease(&mut pool, 1.0);
        assert_eq!(pool.pending_len(), 1);
        assert_balanced(&pool);

        pool.update(FrameTime::new(0.5));
        assert_eq!(pool.active_len(), 1);
        assert_eq!(pool.pending_len(), 0);
        assert!(pool.get(handle).is_some());

        pool.update(FrameTime::new(0.5));
        assert_eq!(pool.active_len(), 0);
        assert_eq!(pool.free_len(), 4);
        assert!(pool.get(handle).is_none());
        assert_balanced(&pool);
    }

    #[test]
    fn grows_when_free_list_is_empty() {
        let mut pool = RecyclingPool::<f32>::new(1);
        let a = lease(&mut pool, 1.0);
        let b = lease(&mut pool, 1.0);
        assert_ne!(a, b);
        assert_eq!(pool.capacity(), 2);
        assert_balanced(&pool);
    }

    #[test]
    fn ensure_capacity_never_shrinks() {
        let mut pool = RecyclingPool::<f32>::new(8);
        pool.ensure_capacity(3);
        assert_eq!(pool.capacity(), 8);
        pool.ensure_capacity(12);
        assert_eq!(pool.capacity(), 12);
        assert_eq!(pool.free_len(), 12);
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut pool = RecyclingPool::<f32>::new(2);
        let handle = lease(&mut pool, 1.0);
        pool.update(FrameTime::new(0.1));
        assert!(pool.destroy(handle));
        assert!(!pool.destroy(handle));
        pool.update(FrameTime::new(0.1));
        assert!(!pool.destroy(handle));
        assert_eq!(pool.free_len(), 2);
    }

    #[test]
    fn stale_handle_cannot_reach_recycled_slot() {
        let mut pool = RecyclingPool::<f32>::new(1);
        let old = lease(&mut pool, 0.1);
        pool.update(FrameTime::new(0.1));
        pool.update(FrameTime::new(0.1));
        let new = lease(&mut pool, 1.0);
        assert_eq!(old.index(), new.index());
        assert!(pool.get(old).is_none());
        assert!(pool.get(new).is_some());
    }

    #[test]
    fn clear_recycles_everything() {
        let mut pool = RecyclingPool::<f32>::new(3);
        lease(&mut pool, 1.0);
        pool.update(FrameTime::new(0.1));
        lease(&mut pool, 1.0);
        pool.clear_active_tweens();
        assert_eq!(pool.free_len(), 3);
        assert_eq!(pool.active_len() + pool.pending_len(), 0);
        assert_balanced(&pool);
    }

    #[test]
    fn steady_state_update_keeps_bucket_capacity() {
        let mut pool = RecyclingPool::<f32>::new(16);
        for _ in 0..16 {
            lease(&mut pool, 0.2);
        }
        let reserved = pool.free.capacity();
        for _ in 0..10 {
            pool.update(FrameTime::new(0.1));
        }
        assert_eq!(pool.free.capacity(), reserved);
        assert_eq!(pool.free_len(), 16);
    }
}

// orchestrator/manager.rs
//
// Identifier-addressed tween manager.
//
// Usage:
//   let mut tweens = TweenManager::new();
//   let id = tweens.create_tween(TweenParams::new(0.5), None)?;
//   tweens.tick(FrameTime::new(dt));          // once per frame
//   let (value, completion) = tweens.tween_values(id).unwrap_or_default();
//
// A tick runs in fixed phases: activate queued timelines, apply deferred
// requests, advance, compact, then advance sequences and broadcast.

use std::collections::{HashMap, HashSet};
use std::mem;

use parking_lot::RwLock;

use crate::api::types::{TweenEvent, TweenId, TweenStatus};
use crate::core::config::TweenConfig;
use crate::core::error::{Result, TweenError};
use crate::core::time::FrameTime;
use crate::timeline::{OwnerRef, TweenParams, TweenSequence, TweenTimeline};

use super::events::{EventSets, ListenerId, Listeners};
use super::requests::{PendingRequests, TweenRequest};

/// Upper bound on timeline lines in [`TweenManager::debug_report`].
const DEBUG_REPORT_LINES: usize = 25;

/// Why a live timeline is being dropped at compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    Cancelled,
    /// Completed on an earlier tick, or its owner went away.
    Expired,
    /// Replaced by a sequence reset or dropped by a sequence cancel; silent.
    Superseded,
}

/// State written by the advance phase. Workers share it behind one lock.
#[derive(Default)]
struct AdvanceOutput {
    events: EventSets,
    expired: Vec<usize>,
}

/// Creates, drives and removes tween timelines and sequences by identifier.
pub struct TweenManager {
    config: TweenConfig,
    live: Vec<TweenTimeline>,
    index: HashMap<TweenId, usize>,
    /// Created since the last tick; activated at the start of the next one.
    queued: Vec<TweenTimeline>,
    sequences: HashMap<TweenId, TweenSequence>,
    requests: PendingRequests,
    sequence_requests: PendingRequests,
    /// Released identifiers, reused last-in first-out.
    free_ids: Vec<TweenId>,
    removals: Vec<(usize, Removal)>,
    /// Live slots skipped by the advance phase this tick.
    doomed: Vec<bool>,
    events: EventSets,
    listeners: Listeners,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenManager {
    pub fn new() -> Self {
        Self::from_config(&TweenConfig::default())
    }

    pub fn from_config(config: &TweenConfig) -> Self {
        log::info!(
            "TweenManager created (parallel threshold: {:?})",
            config.multithread_threshold
        );
        Self {
            config: config.clone(),
            live: Vec::new(),
            index: HashMap::new(),
            queued: Vec::new(),
            sequences: HashMap::new(),
            requests: PendingRequests::new(),
            sequence_requests: PendingRequests::new(),
            free_ids: Vec::new(),
            removals: Vec::new(),
            doomed: Vec::new(),
            events: EventSets::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    fn next_id(&mut self) -> TweenId {
        self.free_ids.pop().unwrap_or_else(TweenId::new_random)
    }

    fn release_id(&mut self, id: TweenId) {
        self.free_ids.push(id);
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Queue a timeline; it starts playing on the next tick.
    /// With an owner, the timeline completes silently once the owner dies.
    pub fn create_tween(&mut self, params: TweenParams, owner: Option<OwnerRef>) -> Result<TweenId> {
        params.validate()?;
        let id = self.next_id();
        let mut timeline = TweenTimeline::new(id, params);
        if let Some(owner) = owner {
            timeline = timeline.with_owner(owner);
        }
        log::debug!("Tween {} queued", id);
        self.queued.push(timeline);
        Ok(id)
    }

    /// Queue a chain of timelines played one after another. `loops` repeats
    /// the whole chain; negative repeats forever. Returns the sequence id.
    pub fn create_sequence(
        &mut self,
        legs: &[TweenParams],
        loops: i32,
        owner: Option<OwnerRef>,
    ) -> Result<TweenId> {
        if legs.is_empty() {
            return Err(TweenError::EmptySequence);
        }
        for params in legs {
            params.validate()?;
        }

        let sequence_id = self.next_id();
        let mut timelines = Vec::with_capacity(legs.len());
        for params in legs {
            let id = self.next_id();
            let mut timeline = TweenTimeline::new(id, params.clone()).with_sequence(sequence_id);
            if let Some(owner) = &owner {
                timeline = timeline.with_owner(owner.clone());
            }
            timelines.push(timeline);
        }

        let sequence = TweenSequence::new(sequence_id, timelines, loops);
        if let Some(first) = sequence.current_leg() {
            self.queued.push(first.clone());
        }
        log::debug!("Sequence {} queued with {} legs", sequence_id, legs.len());
        self.sequences.insert(sequence_id, sequence);
        Ok(sequence_id)
    }

    // ── Deferred requests ────────────────────────────────────────────

    fn has_timeline(&self, id: TweenId) -> bool {
        self.index.contains_key(&id) || self.queued.iter().any(|t| t.id() == id)
    }

    fn request(&mut self, id: TweenId, request: TweenRequest) -> bool {
        if !self.has_timeline(id) {
            return false;
        }
        // A finished timeline already broadcast its terminal edge.
        if request == TweenRequest::Cancel
            && self.tween(id).is_some_and(TweenTimeline::is_complete)
        {
            return false;
        }
        self.requests.submit(id, request)
    }

    fn request_sequence(&mut self, id: TweenId, request: TweenRequest) -> bool {
        if !self.sequences.contains_key(&id) {
            return false;
        }
        self.sequence_requests.submit(id, request)
    }

    pub fn pause_tween(&mut self, id: TweenId) -> bool {
        self.request(id, TweenRequest::Pause)
    }

    pub fn resume_tween(&mut self, id: TweenId) -> bool {
        self.request(id, TweenRequest::Resume)
    }

    /// Rewind to the start, start delay included, and unpause.
    pub fn reset_tween(&mut self, id: TweenId) -> bool {
        self.request(id, TweenRequest::Reset)
    }

    /// Remove the timeline on the next tick, broadcasting `Cancelled`.
    pub fn cancel_tween(&mut self, id: TweenId) -> bool {
        self.request(id, TweenRequest::Cancel)
    }

    /// Restart a sequence from its first leg with its full loop budget.
    pub fn reset_sequence(&mut self, id: TweenId) -> bool {
        self.request_sequence(id, TweenRequest::Reset)
    }

    /// Stop a sequence: its current leg is cancelled and the sequence
    /// completes on the next tick.
    pub fn cancel_sequence(&mut self, id: TweenId) -> bool {
        self.request_sequence(id, TweenRequest::Cancel)
    }

    /// Requests waiting for the next tick.
    pub fn pending_requests(&self) -> usize {
        self.requests.len() + self.sequence_requests.len()
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Register a callback receiving each populated event set once per tick.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(TweenEvent, &HashSet<TweenId>) + Send + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Edge sets produced by the most recent tick.
    pub fn last_events(&self) -> &EventSets {
        &self.events
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance everything by one frame.
    pub fn tick(&mut self, frame: FrameTime) {
        self.events.clear();
        self.removals.clear();

        self.activate_queued();
        self.apply_requests();
        self.advance(frame);
        let expired_legs = self.compact();
        self.advance_sequences(&expired_legs);

        log::trace!(
            "Tween tick: {} live, {} queued, {} sequences",
            self.live.len(),
            self.queued.len(),
            self.sequences.len()
        );

        if !self.events.is_empty() {
            self.listeners.broadcast(&self.events);
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, timeline) in self.live.iter().enumerate() {
            self.index.insert(timeline.id(), i);
        }
    }

    fn activate_queued(&mut self) {
        if self.queued.is_empty() {
            return;
        }
        for timeline in self.queued.drain(..) {
            log::debug!("Tween {} activated", timeline.id());
            self.live.push(timeline);
        }
        self.rebuild_index();
    }

    fn apply_requests(&mut self) {
        self.doomed.clear();
        self.doomed.resize(self.live.len(), false);

        for (id, request) in self.requests.drain() {
            let Some(&i) = self.index.get(&id) else {
                continue;
            };
            match request {
                TweenRequest::Pause => self.live[i].set_paused(true),
                TweenRequest::Resume => self.live[i].set_paused(false),
                TweenRequest::Reset => self.live[i].reset(),
                TweenRequest::Cancel => {
                    log::debug!("Tween {} cancelled", id);
                    self.doomed[i] = true;
                    self.removals.push((i, Removal::Cancelled));
                }
            }
        }

        let mut sequence_requests = mem::take(&mut self.sequence_requests);
        for (id, request) in sequence_requests.drain() {
            match request {
                TweenRequest::Reset => self.restart_sequence(id),
                TweenRequest::Cancel => self.stop_sequence(id),
                TweenRequest::Pause | TweenRequest::Resume => {}
            }
        }
        self.sequence_requests = sequence_requests;
    }

    /// Slot of the live leg currently playing for `sequence`, if any.
    fn live_leg(&self, sequence: &TweenSequence) -> Option<usize> {
        sequence
            .current_id()
            .and_then(|leg| self.index.get(&leg).copied())
    }

    fn restart_sequence(&mut self, id: TweenId) {
        let Some(sequence) = self.sequences.get(&id) else {
            return;
        };
        let current = self.live_leg(sequence);
        let Some(sequence) = self.sequences.get_mut(&id) else {
            return;
        };
        sequence.restart();
        let Some(first) = sequence.current_leg() else {
            return;
        };

        match current {
            Some(i) if self.live[i].id() == first.id() => self.live[i].reset(),
            Some(i) => {
                self.doomed[i] = true;
                self.removals.push((i, Removal::Superseded));
                self.queued.push(first.clone());
            }
            None => self.queued.push(first.clone()),
        }
        log::debug!("Sequence {} restarted", id);
    }

    fn stop_sequence(&mut self, id: TweenId) {
        let Some(sequence) = self.sequences.get(&id) else {
            return;
        };
        if let Some(i) = self.live_leg(sequence) {
            self.doomed[i] = true;
            self.removals.push((i, Removal::Cancelled));
        }
        if let Some(sequence) = self.sequences.get_mut(&id) {
            sequence.stop();
        }
        log::debug!("Sequence {} cancelled", id);
    }

    fn advance(&mut self, frame: FrameTime) {
        let parallel = self.config.use_parallel(self.live.len());
        let shared = RwLock::new(AdvanceOutput {
            events: mem::take(&mut self.events),
            expired: Vec::new(),
        });
        let doomed = &self.doomed;

        for_each_live(&mut self.live, parallel, |i, timeline| {
            if doomed[i] {
                return;
            }
            let status = timeline.update(frame);
            match status.event() {
                Some(event) => shared.write().events.insert(event, timeline.id()),
                None if status == TweenStatus::Completed => shared.write().expired.push(i),
                None => {}
            }
        });

        let output = shared.into_inner();
        self.events = output.events;
        self.removals
            .extend(output.expired.into_iter().map(|i| (i, Removal::Expired)));
    }

    /// Drop removed slots, highest index first. Returns sequence legs that
    /// expired on their own, with whether their owner is still alive.
    fn compact(&mut self) -> Vec<(TweenId, bool)> {
        let mut expired_legs = Vec::new();
        if self.removals.is_empty() {
            return expired_legs;
        }

        self.removals.sort_by(|a, b| b.0.cmp(&a.0));
        self.removals.dedup_by_key(|(i, _)| *i);

        let removals = mem::take(&mut self.removals);
        for &(i, reason) in &removals {
            let timeline = self.live.swap_remove(i);
            let id = timeline.id();
            log::debug!("Tween {} removed ({:?})", id, reason);

            if reason == Removal::Cancelled && !timeline.is_complete() {
                self.events.insert(TweenEvent::Cancelled, id);
            }
            match timeline.sequence() {
                Some(sequence) if self.sequences.contains_key(&sequence) => {
                    if reason == Removal::Expired {
                        let alive = timeline.owner().map_or(true, OwnerRef::is_alive);
                        expired_legs.push((id, alive));
                    }
                }
                _ => self.release_id(id),
            }
        }
        self.removals = removals;
        self.removals.clear();

        self.rebuild_index();
        expired_legs
    }

    fn advance_sequences(&mut self, expired_legs: &[(TweenId, bool)]) {
        if self.sequences.is_empty() {
            return;
        }

        let mut finished = Vec::new();
        for (&sequence_id, sequence) in self.sequences.iter_mut() {
            let Some(leg) = sequence.current_id() else {
                finished.push(sequence_id);
                continue;
            };

            // A leg re-queued by a sequence reset is not the one that expired.
            let expired = expired_legs
                .iter()
                .find(|(id, _)| *id == leg)
                .filter(|_| !self.queued.iter().any(|t| t.id() == leg));
            let ended = self.events.contains(TweenEvent::Completed, leg)
                || self.events.contains(TweenEvent::Cancelled, leg)
                || expired.is_some();
            if !ended {
                continue;
            }
            if matches!(expired, Some((_, false))) {
                sequence.stop();
                finished.push(sequence_id);
                continue;
            }

            let spill = self
                .index
                .get(&leg)
                .and_then(|&i| self.live[i].take_completed_overshoot())
                .unwrap_or(0.0);

            let Some(next) = sequence.advance() else {
                finished.push(sequence_id);
                continue;
            };
            match self.index.get(&next.id()) {
                Some(&i) => {
                    let timeline = &mut self.live[i];
                    timeline.reset();
                    timeline.inject_time(spill);
                }
                None => {
                    let mut timeline = next.clone();
                    timeline.inject_time(spill);
                    self.queued.push(timeline);
                }
            }
            self.events.insert(TweenEvent::SequenceMovedNext, sequence_id);
        }

        for sequence_id in finished {
            let Some(sequence) = self.sequences.remove(&sequence_id) else {
                continue;
            };
            self.events.insert(TweenEvent::SequenceCompleted, sequence_id);
            log::info!("Sequence {} completed", sequence_id);

            self.release_id(sequence_id);
            for leg in sequence.legs() {
                if !self.index.contains_key(&leg.id()) {
                    self.release_id(leg.id());
                }
            }
        }
    }

    /// Remove everything immediately, without broadcasting.
    pub fn clear(&mut self) {
        let sequences = &self.sequences;
        let ids: Vec<TweenId> = self
            .live
            .drain(..)
            .chain(self.queued.drain(..))
            .filter(|t| t.sequence().map_or(true, |s| !sequences.contains_key(&s)))
            .map(|t| t.id())
            .collect();
        self.free_ids.extend(ids);
        for (id, sequence) in self.sequences.drain() {
            self.free_ids.push(id);
            self.free_ids.extend(sequence.legs().iter().map(TweenTimeline::id));
        }
        self.index.clear();
        self.requests.clear();
        self.sequence_requests.clear();
        self.events.clear();
        log::debug!("TweenManager cleared");
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Whether `id` names a live or queued timeline, or a running sequence.
    pub fn is_active_tween(&self, id: TweenId) -> bool {
        self.has_timeline(id) || self.sequences.contains_key(&id)
    }

    pub fn tween(&self, id: TweenId) -> Option<&TweenTimeline> {
        match self.index.get(&id) {
            Some(&i) => self.live.get(i),
            None => self.queued.iter().find(|t| t.id() == id),
        }
    }

    /// Eased value and completion in [0, 1].
    pub fn tween_values(&self, id: TweenId) -> Option<(f32, f32)> {
        self.tween(id).map(|t| (t.value(), t.completion()))
    }

    /// The sequence a leg identifier belongs to.
    pub fn tween_sequence_id(&self, leg: TweenId) -> Option<TweenId> {
        self.tween(leg).and_then(TweenTimeline::sequence).or_else(|| {
            self.sequences
                .values()
                .find(|s| s.contains(leg))
                .map(TweenSequence::id)
        })
    }

    /// Identifier and index of the leg a sequence is playing.
    pub fn sequence_current_tween(&self, sequence: TweenId) -> Option<(TweenId, usize)> {
        let sequence = self.sequences.get(&sequence)?;
        Some((sequence.current_id()?, sequence.cursor()?))
    }

    pub fn sequence_tween_count(&self, sequence: TweenId) -> Option<usize> {
        self.sequences.get(&sequence).map(TweenSequence::len)
    }

    /// Eased value of the current leg, its completion, and completion across
    /// the whole chain.
    pub fn sequence_values(&self, sequence: TweenId) -> Option<(f32, f32, f32)> {
        let sequence = self.sequences.get(&sequence)?;
        let leg = self.tween(sequence.current_id()?)?;
        let completion = leg.completion();
        Some((leg.value(), completion, sequence.overall_completion(completion)))
    }

    pub fn sequence(&self, id: TweenId) -> Option<&TweenSequence> {
        self.sequences.get(&id)
    }

    /// Live plus queued timelines.
    pub fn active_count(&self) -> usize {
        self.live.len() + self.queued.len()
    }

    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Human-readable dump of the live timelines, for on-screen debugging.
    pub fn debug_report(&self) -> Vec<String> {
        let count = self.active_count();
        if count == 0 {
            return vec!["No Active Tween".to_string()];
        }
        let mut lines = Vec::with_capacity(DEBUG_REPORT_LINES.min(count) + 1);
        lines.push(format!("{} Actives Tween", count));
        lines.extend(
            self.live
                .iter()
                .chain(self.queued.iter())
                .take(DEBUG_REPORT_LINES)
                .map(ToString::to_string),
        );
        lines
    }
}

#[cfg(feature = "parallel")]
fn for_each_live<F>(live: &mut [TweenTimeline], parallel: bool, advance: F)
where
    F: Fn(usize, &mut TweenTimeline) + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        live.par_iter_mut()
            .enumerate()
            .for_each(|(i, timeline)| advance(i, timeline));
    } else {
        live.iter_mut()
            .enumerate()
            .for_each(|(i, timeline)| advance(i, timeline));
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_live<F>(live: &mut [TweenTimeline], _parallel: bool, advance: F)
where
    F: Fn(usize, &mut TweenTimeline) + Send + Sync,
{
    live.iter_mut()
        .enumerate()
        .for_each(|(i, timeline)| advance(i, timeline));
}

use crate::api::types::TweenId;

use super::timeline::TweenTimeline;

/// Ordered chain of timelines sharing one identifier.
///
/// Legs are kept pristine: the manager plays a clone of the current leg and
/// asks the sequence for the next one when it finishes.
#[derive(Debug, Clone)]
pub struct TweenSequence {
    id: TweenId,
    legs: Vec<TweenTimeline>,
    /// Index of the leg playing now. `None` once the sequence has finished.
    cursor: Option<usize>,
    loops: i32,
    loops_remaining: i32,
}

impl TweenSequence {
    /// `loops` counts repeats of the whole chain; negative repeats forever.
    pub fn new(id: TweenId, legs: Vec<TweenTimeline>, loops: i32) -> Self {
        let cursor = if legs.is_empty() { None } else { Some(0) };
        Self {
            id,
            legs,
            cursor,
            loops,
            loops_remaining: loops.max(0),
        }
    }

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn legs(&self) -> &[TweenTimeline] {
        &self.legs
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_infinite(&self) -> bool {
        self.loops < 0
    }

    pub fn is_completed(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn current_leg(&self) -> Option<&TweenTimeline> {
        self.cursor.and_then(|i| self.legs.get(i))
    }

    pub fn current_id(&self) -> Option<TweenId> {
        self.current_leg().map(TweenTimeline::id)
    }

    pub fn leg_index(&self, leg: TweenId) -> Option<usize> {
        self.legs.iter().position(|t| t.id() == leg)
    }

    pub fn contains(&self, leg: TweenId) -> bool {
        self.leg_index(leg).is_some()
    }

    /// Step to the next leg, wrapping while sequence loops remain.
    /// Returns the new current leg, or `None` once the chain is exhausted.
    pub fn advance(&mut self) -> Option<&TweenTimeline> {
        let current = self.cursor?;
        let mut next = current + 1;
        if next >= self.legs.len() {
            if !self.is_infinite() {
                self.loops_remaining -= 1;
                if self.loops_remaining < 0 {
                    self.cursor = None;
                    return None;
                }
            }
            next = 0;
        }
        self.cursor = Some(next);
        self.legs.get(next)
    }

    /// Rewind to the first leg with the full loop budget.
    pub fn restart(&mut self) {
        self.cursor = if self.legs.is_empty() { None } else { Some(0) };
        self.loops_remaining = self.loops.max(0);
    }

    /// Mark the sequence finished without playing the remaining legs.
    pub fn stop(&mut self) {
        self.cursor = None;
    }

    /// Completion across the whole chain given the current leg's completion.
    pub fn overall_completion(&self, leg_completion: f32) -> f32 {
        match self.cursor {
            Some(index) if !self.legs.is_empty() => {
                let unit = 1.0 / self.legs.len() as f32;
                index as f32 * unit + leg_completion.clamp(0.0, 1.0) * unit
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::params::TweenParams;

    fn sequence(legs: usize, loops: i32) -> TweenSequence {
        let legs = (0..legs)
            .map(|_| TweenTimeline::new(TweenId::new_random(), TweenParams::new(1.0)))
            .collect();
        TweenSequence::new(TweenId::new_random(), legs, loops)
    }

    #[test]
    fn advances_then_finishes() {
        let mut seq = sequence(3, 0);
        assert_eq!(seq.cursor(), Some(0));
        assert!(seq.advance().is_some());
        assert!(seq.advance().is_some());
        assert_eq!(seq.cursor(), Some(2));
        assert!(seq.advance().is_none());
        assert!(seq.is_completed());
        assert!(seq.current_leg().is_none());
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn loops_wrap_to_first_leg() {
        let mut seq = sequence(2, 1);
        let first = seq.current_id();
        seq.advance();
        assert_eq!(seq.advance().map(TweenTimeline::id), first);
        seq.advance();
        assert!(seq.advance().is_none());
    }

    #[test]
    fn infinite_sequence_keeps_wrapping() {
        let mut seq = sequence(2, -1);
        for _ in 0..50 {
            assert!(seq.advance().is_some());
        }
    }

    #[test]
    fn restart_restores_loop_budget() {
        let mut seq = sequence(1, 1);
        seq.advance();
        assert!(seq.advance().is_none());
        seq.restart();
        assert_eq!(seq.cursor(), Some(0));
        assert!(seq.advance().is_some());
    }

    #[test]
    fn overall_completion_spans_legs() {
        let mut seq = sequence(4, 0);
        seq.advance();
        assert!((seq.overall_completion(0.5) - 0.375).abs() < 1e-6);
        seq.stop();
        assert_eq!(seq.overall_completion(0.0), 1.0);
    }

    #[test]
    fn leg_lookup() {
        let seq = sequence(3, 0);
        let second = seq.legs()[1].id();
        assert_eq!(seq.leg_index(second), Some(1));
        assert!(!seq.contains(TweenId::new_random()));
    }
}

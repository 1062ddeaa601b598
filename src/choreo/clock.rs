//! Headless playback driven by a virtual clock.

use std::collections::HashMap;
use std::time::Duration;

use crate::board::EntityId;
use crate::choreo::{Choreography, Completion, Playback};
use crate::geometry::Vec3;

#[derive(Debug)]
struct Animation {
    start: Vec3,
    choreography: Choreography,
    elapsed: Duration,
    total: Duration,
    done: Completion,
}

impl Animation {
    fn position(&self) -> Vec3 {
        self.choreography.sample(self.start, self.elapsed)
    }
}

/// Playback that advances animations only when told how much time passed.
///
/// Used by the CLI and the tests as a stand-in for a real renderer: it
/// remembers where every entity was last put and finishes an animation
/// once the clock has run through all of its legs.
#[derive(Debug, Default)]
pub struct ClockPlayback {
    resting: HashMap<EntityId, Vec3>,
    active: HashMap<EntityId, Animation>,
    clock: Duration,
    finished: u64,
}

impl ClockPlayback {
    /// Create an empty playback at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and finish every animation that ran out.
    ///
    /// Returns how many animations finished.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.clock = self.clock.saturating_add(dt);

        let mut done = Vec::new();
        for (entity, animation) in &mut self.active {
            animation.elapsed = animation.elapsed.saturating_add(dt);
            if animation.elapsed >= animation.total {
                done.push(*entity);
            }
        }

        for entity in &done {
            if let Some(animation) = self.active.remove(entity) {
                let end = animation
                    .choreography
                    .destination()
                    .unwrap_or(animation.start);
                self.resting.insert(*entity, end);
                animation.done.complete();
                self.finished += 1;
            }
        }
        done.len()
    }

    /// Run the clock until nothing is animating.
    pub fn finish_all(&mut self) -> usize {
        let longest = self
            .active
            .values()
            .map(|a| a.total.saturating_sub(a.elapsed))
            .max()
            .unwrap_or_default();
        self.advance(longest)
    }

    /// Where `entity` is drawn right now.
    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.active
            .get(&entity)
            .map(Animation::position)
            .or_else(|| self.resting.get(&entity).copied())
    }

    /// Whether `entity` is mid-animation.
    #[must_use]
    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.active.contains_key(&entity)
    }

    /// Number of animations still playing.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Total time the clock has been advanced.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Animations that have played to the end so far.
    #[must_use]
    pub fn finished_count(&self) -> u64 {
        self.finished
    }
}

impl Playback for ClockPlayback {
    fn render_entity_at(&mut self, entity: EntityId, position: Vec3) {
        // a cancelled animation counts as replaced
        self.active.remove(&entity);
        self.resting.insert(entity, position);
    }

    fn animate_entity_along(&mut self, entity: EntityId, choreography: Choreography, done: Completion) {
        let start = self
            .position(entity)
            .or_else(|| choreography.waypoints().next())
            .unwrap_or_default();
        let total = choreography.total_duration();
        self.active.insert(
            entity,
            Animation {
                start,
                choreography,
                elapsed: Duration::ZERO,
                total,
                done,
            },
        );
    }
}

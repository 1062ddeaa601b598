//! The rendering collaborator seam.

use crate::board::EntityId;
use crate::choreo::{Choreography, Completion};
use crate::geometry::Vec3;

/// Whatever draws the diorama.
///
/// The core only decides where entities go and when; implementations own
/// interpolation, easing and frame timing.
pub trait Playback {
    /// Put `entity` at `position` right away, cancelling any animation it
    /// is running.
    fn render_entity_at(&mut self, entity: EntityId, position: Vec3);

    /// Play `choreography` on `entity` asynchronously.
    ///
    /// `done` must be released exactly once, when the whole path has played
    /// or when the animation is replaced. Dropping it counts as release.
    fn animate_entity_along(&mut self, entity: EntityId, choreography: Choreography, done: Completion);
}

impl<P: Playback + ?Sized> Playback for &mut P {
    fn render_entity_at(&mut self, entity: EntityId, position: Vec3) {
        (**self).render_entity_at(entity, position);
    }

    fn animate_entity_along(&mut self, entity: EntityId, choreography: Choreography, done: Completion) {
        (**self).animate_entity_along(entity, choreography, done);
    }
}

impl<P: Playback + ?Sized> Playback for Box<P> {
    fn render_entity_at(&mut self, entity: EntityId, position: Vec3) {
        (**self).render_entity_at(entity, position);
    }

    fn animate_entity_along(&mut self, entity: EntityId, choreography: Choreography, done: Completion) {
        (**self).animate_entity_along(entity, choreography, done);
    }
}

/// Playback that jumps every animation straight to its destination.
///
/// Completions are released on the spot, so the diorama never looks busy.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPlayback;

impl Playback for InstantPlayback {
    fn render_entity_at(&mut self, _entity: EntityId, _position: Vec3) {}

    fn animate_entity_along(&mut self, _entity: EntityId, _choreography: Choreography, done: Completion) {
        done.complete();
    }
}

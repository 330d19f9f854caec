use rand::Rng;

use crate::vector::Vector2D;

/// Stable tag for a body. Only used for bookkeeping, never for behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl core::fmt::Display for BodyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kinematic state shared by agents and the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Vector2D,
    /// Pixels per tick.
    pub velocity: Vector2D,
    /// Degrees in `(-180, 180]`.
    pub heading: f32,
}

/// Distance from the arena edges inside which random bodies are placed.
const SPAWN_INSET: f32 = 100.0;

impl Body {
    pub fn new(id: BodyId, position: Vector2D, velocity: Vector2D, heading: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            heading: crate::angle::normalize_angle(heading),
        }
    }

    /// A freshly sampled body somewhere inside the arena.
    ///
    /// Every call draws new values from `rng`.
    pub fn random<R: Rng + ?Sized>(id: BodyId, width: f32, height: f32, rng: &mut R) -> Self {
        let inset_x = SPAWN_INSET.min(width / 4.0);
        let inset_y = SPAWN_INSET.min(height / 4.0);
        let position = Vector2D::new(
            rng.gen_range(inset_x..=width - inset_x),
            rng.gen_range(inset_y..=height - inset_y),
        );
        let velocity = Vector2D::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0));
        let heading = rng.gen_range(-180.0..=180.0);
        Self::new(id, position, velocity, heading)
    }

    /// Vector from this body to `other`.
    pub fn offset_to(&self, other: &Body) -> Vector2D {
        other.position - self.position
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        self.position.distance(&other.position)
    }
}

/// Read-only view of every body at the start of a tick.
///
/// The target sits at index 0, agents follow. Controllers read neighbours
/// from here and never from the live state they are about to overwrite.
#[derive(Debug, Clone, Copy)]
pub struct SwarmSnapshot<'a> {
    bodies: &'a [Body],
}

impl<'a> SwarmSnapshot<'a> {
    /// `bodies` must hold the target first.
    pub fn new(bodies: &'a [Body]) -> Self {
        debug_assert!(!bodies.is_empty(), "a swarm always has a target");
        Self { bodies }
    }

    pub fn target(&self) -> &'a Body {
        &self.bodies[0]
    }

    pub fn agents(&self) -> &'a [Body] {
        &self.bodies[1..]
    }

    /// Positions of every agent except `id`.
    pub fn neighbours(&self, id: BodyId) -> impl Iterator<Item = Vector2D> + 'a {
        self.agents()
            .iter()
            .filter(move |body| body.id != id)
            .map(|body| body.position)
    }

    /// Distance from `from` to the farthest agent, `None` without agents.
    pub fn farthest_agent_distance(&self, from: Vector2D) -> Option<f32> {
        self.agents()
            .iter()
            .map(|body| body.position.distance(&from))
            .reduce(f32::max)
    }
}

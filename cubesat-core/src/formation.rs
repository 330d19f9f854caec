//! Swarm-wide boundary handling.
//!
//! When any body gets within the margin of an arena edge, the whole swarm is
//! shifted so that its centroid moves to the arena center. The shift is
//! latched: once started it runs to completion along a fixed correction
//! vector and cannot restart from a different centroid. When the centroid is
//! already centered, the swarm is instead contracted toward the center until
//! every body is back inside the margin.

use log::debug;

use crate::body::Body;
use crate::config::{ArenaConfig, SwarmConfig};
use crate::vector::{centroid, Vector2D};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormationState {
    #[default]
    Idle,
    /// Shifting every body by `correction` per tick until `centroid`, which
    /// moves along with the swarm, reaches the arena center.
    Recentering {
        correction: Vector2D,
        centroid: Vector2D,
    },
    /// Blending every body toward the arena center.
    Rescaling,
}

pub fn arena_center(arena: &ArenaConfig) -> Vector2D {
    Vector2D::new(arena.width, arena.height) / 2.0
}

/// True when `position` is not strictly inside the margin-inset arena.
pub fn at_edge(position: Vector2D, arena: &ArenaConfig) -> bool {
    let inside_x = arena.margin < position.x && position.x < arena.width - arena.margin;
    let inside_y = arena.margin < position.y && position.y < arena.height - arena.margin;
    !(inside_x && inside_y)
}

pub fn any_at_edge(bodies: &[Body], arena: &ArenaConfig) -> bool {
    bodies.iter().any(|body| at_edge(body.position, arena))
}

/// Clamp every body inside the margin, reflecting the velocity component
/// that carried it out.
pub fn contain(bodies: &mut [Body], arena: &ArenaConfig) {
    let margin = arena.margin;
    for body in bodies.iter_mut() {
        if body.position.x < margin {
            body.position.x = margin;
            body.velocity.x = body.velocity.x.abs();
        } else if body.position.x > arena.width - margin {
            body.position.x = arena.width - margin;
            body.velocity.x = -body.velocity.x.abs();
        }

        if body.position.y < margin {
            body.position.y = margin;
            body.velocity.y = body.velocity.y.abs();
        } else if body.position.y > arena.height - margin {
            body.position.y = arena.height - margin;
            body.velocity.y = -body.velocity.y.abs();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormationManager {
    state: FormationState,
}

impl FormationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormationState {
        self.state
    }

    pub fn is_recentering(&self) -> bool {
        matches!(self.state, FormationState::Recentering { .. })
    }

    pub fn is_rescaling(&self) -> bool {
        matches!(self.state, FormationState::Rescaling)
    }

    /// True while a correction or rescale owns the tick.
    pub fn is_active(&self) -> bool {
        self.state != FormationState::Idle
    }

    /// Run one tick of boundary handling.
    ///
    /// Returns `true` when the formation owns this tick, in which case the
    /// individual controllers must not run.
    pub fn step(&mut self, bodies: &mut [Body], config: &SwarmConfig) -> bool {
        let arena = &config.arena;
        let center = arena_center(arena);

        if self.state == FormationState::Idle {
            if !any_at_edge(bodies, arena) {
                return false;
            }
            let Some(centroid) = centroid(bodies.iter().map(|body| body.position)) else {
                return false;
            };
            let offset = center - centroid;
            self.state = if offset.max_axis() < arena.centered_enough {
                debug!("swarm centered but out of bounds, rescaling");
                FormationState::Rescaling
            } else {
                let correction = offset.limit_magnitude(config.recenter_speed());
                debug!("recentering swarm from {centroid:?} by {correction:?} per tick");
                FormationState::Recentering {
                    correction,
                    centroid,
                }
            };
        }

        match self.state {
            FormationState::Idle => false,
            FormationState::Recentering {
                correction,
                centroid,
            } => {
                let remaining = center - centroid;
                // Land exactly on the center instead of stepping past it.
                let shift = if remaining.max_axis() <= correction.max_axis() {
                    remaining
                } else {
                    correction
                };
                for body in bodies.iter_mut() {
                    body.position += shift;
                }
                let centroid = centroid + shift;
                self.state = if (center - centroid).max_axis() < arena.centered_enough {
                    debug!("recentering complete");
                    FormationState::Idle
                } else {
                    FormationState::Recentering {
                        correction,
                        centroid,
                    }
                };
                true
            }
            FormationState::Rescaling => {
                for body in bodies.iter_mut() {
                    body.position = body.position.lerp(center, arena.rescale_rate);
                }
                if !any_at_edge(bodies, arena) {
                    debug!("rescaling complete");
                    self.state = FormationState::Idle;
                }
                true
            }
        }
    }
}

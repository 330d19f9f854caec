//! Per-tick control of a tracking agent.
//!
//! A normal agent corrects heading and velocity every tick. An impaired agent
//! cannot rotate and translate in the same tick, so it alternates between a
//! parked rotation phase and a translation phase of fixed length.

use log::debug;

use crate::angle::heading_error;
use crate::body::{Body, SwarmSnapshot};
use crate::config::{AgentConfig, SwarmConfig};
use crate::field::{aggregate_repulsion, target_repulsive_force};
use crate::kinematics::{step_angle, step_velocity};
use crate::vector::Vector2D;

/// Heading error below which an impaired agent counts as pointed at the target.
pub const ALIGNED_ENOUGH: f32 = 1.0;

/// Duty-cycle phase of an impaired agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpairedPhase {
    /// Parked with zero velocity while turning toward the target.
    Rotating,
    /// Moving with a frozen heading. `ticks` runs from 1 up to the
    /// directional tick limit, at which point the phase wraps to rotating.
    Translating { ticks: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    Normal,
    Impaired(ImpairedPhase),
}

impl AgentMode {
    /// A freshly started impaired agent, beginning in the rotation phase.
    pub fn impaired() -> Self {
        AgentMode::Impaired(ImpairedPhase::Rotating)
    }

    pub fn is_impaired(&self) -> bool {
        matches!(self, AgentMode::Impaired(_))
    }
}

/// Result of one controller tick: the new body state and the new mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentUpdate {
    pub body: Body,
    pub mode: AgentMode,
}

/// Signed heading change that would point `body` at the target.
pub fn heading_correction(body: &Body, target: &Body) -> f32 {
    heading_error(body.offset_to(target).bearing(), body.heading)
}

/// Raw velocity correction toward the target, before rate limiting.
///
/// Attraction to the target is scaled by `1 - target_repulsive_force`, so the
/// agent eases off near the standoff and backs away inside it. Neighbour
/// repulsion is weighted by the constant `neighbour_gain` and always pushes
/// away from neighbours, whichever side of the standoff the agent is on.
pub fn velocity_correction(
    body: &Body,
    swarm: &SwarmSnapshot<'_>,
    config: &SwarmConfig,
) -> Vector2D {
    let field = &config.field;
    let target = swarm.target();
    let repulsion = aggregate_repulsion(body.position, swarm.neighbours(body.id), field);
    let approach = 1.0 - target_repulsive_force(body.position, target.position, field);
    (body.offset_to(target) - body.velocity) * approach + repulsion * field.neighbour_gain
}

/// Speed-up applied when the agent is very close to the target so that it
/// backs off before colliding.
pub fn backpedal_multiplier(distance_to_target: f32, agent: &AgentConfig) -> f32 {
    let ratio = agent.backpedal_radius / distance_to_target.max(agent.backpedal_floor);
    (ratio * ratio).max(1.0)
}

fn corrected_velocity(body: &Body, swarm: &SwarmSnapshot<'_>, config: &SwarmConfig) -> Vector2D {
    let agent = &config.agent;
    let correction = velocity_correction(body, swarm, config);
    let velocity = step_velocity(body.velocity, correction, agent.max_velocity);
    let boost = backpedal_multiplier(body.distance_to(swarm.target()), agent);
    velocity * (boost * (1.0 - agent.velocity_damping))
}

fn turned_toward_target(
    body: &Body,
    swarm: &SwarmSnapshot<'_>,
    config: &SwarmConfig,
) -> (f32, f32) {
    let correction = heading_correction(body, swarm.target());
    let heading = step_angle(body.heading, correction, config.agent.max_turn_rate);
    (heading, correction)
}

/// Advance one agent by a tick against the frozen `swarm`.
///
/// Heading is corrected before velocity and velocity before position.
pub fn step_agent(
    body: &Body,
    mode: AgentMode,
    swarm: &SwarmSnapshot<'_>,
    config: &SwarmConfig,
) -> AgentUpdate {
    let mut next = *body;
    match mode {
        AgentMode::Normal => {
            let (heading, _) = turned_toward_target(body, swarm, config);
            next.heading = heading;
            next.velocity = corrected_velocity(body, swarm, config);
            next.position += next.velocity;
            AgentUpdate { body: next, mode }
        }
        AgentMode::Impaired(ImpairedPhase::Rotating) => {
            next.velocity = Vector2D::zero();
            let (heading, correction) = turned_toward_target(&next, swarm, config);
            next.heading = heading;
            let phase = if correction.abs() < ALIGNED_ENOUGH {
                debug!("agent {} aligned ({correction:.2} deg), translating", body.id);
                ImpairedPhase::Translating { ticks: 1 }
            } else {
                ImpairedPhase::Rotating
            };
            AgentUpdate {
                body: next,
                mode: AgentMode::Impaired(phase),
            }
        }
        AgentMode::Impaired(ImpairedPhase::Translating { ticks }) => {
            if ticks < config.agent.velocity_correction_ticks {
                next.velocity = corrected_velocity(body, swarm, config);
            }
            next.position += next.velocity;
            let ticks = (ticks + 1) % config.agent.directional_ticks_limit;
            let phase = if ticks == 0 {
                debug!("agent {} duty cycle wrapped, rotating", body.id);
                ImpairedPhase::Rotating
            } else {
                ImpairedPhase::Translating { ticks }
            };
            AgentUpdate {
                body: next,
                mode: AgentMode::Impaired(phase),
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// A 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Target,
    Agent,
    /// Impaired agent parked while it turns.
    ImpairedRotating,
    /// Impaired agent moving with a frozen heading.
    ImpairedTranslating,
}

/// Everything a renderer needs to draw one body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyReport {
    pub id: u32,
    pub kind: BodyKind,
    pub position: Position,
    pub velocity: Position,
    /// Degrees, counter-clockwise on screen
    pub heading: f32,
}

/// One frame of the simulation, as handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub bodies: Vec<BodyReport>,
    /// The swarm is being shifted back toward the arena center
    pub recentering: bool,
    /// The swarm is being contracted toward the arena center
    pub rescaling: bool,
}

impl FrameReport {
    /// Status line for on-screen display, if any
    pub fn status(&self) -> Option<&'static str> {
        if self.recentering {
            Some("Recentering")
        } else if self.rescaling {
            Some("Rescaling")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    Recenter,
    Contain,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FleeMode {
    #[default]
    Reverse,
    Dampen,
}

/// Simulation configuration as read from a settings file.
///
/// Every field has a default, so a file only needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SwarmSettings {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub centered_enough: f32,
    pub boundary: BoundaryMode,
    pub recenter_speed_factor: f32,
    pub rescale_rate: f32,

    pub agent_max_velocity: f32,
    pub agent_max_turn_rate: f32,
    pub directional_ticks_limit: u32,
    pub velocity_correction_ticks: u32,
    pub velocity_damping: f32,
    pub backpedal_radius: f32,
    pub backpedal_floor: f32,

    pub target_max_velocity: f32,
    pub target_min_velocity: f32,
    pub target_velocity_change: f32,
    pub prob_velocity_change: f32,
    pub flee_distance_ratio: f32,
    pub flee: FleeMode,
    pub fixed_target: bool,

    pub repulsion_divisor: f32,
    pub repulsion_exponent: i32,
    pub repulsion_floor: f32,
    pub target_repulsion_strength: f32,
    pub target_repulsion_exponent: i32,
    pub neighbour_gain: f32,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            margin: 50.0,
            centered_enough: 5.0,
            boundary: BoundaryMode::Recenter,
            recenter_speed_factor: 5.0,
            rescale_rate: 0.003,

            agent_max_velocity: 1.0,
            agent_max_turn_rate: 0.5,
            directional_ticks_limit: 50,
            velocity_correction_ticks: 6,
            velocity_damping: 0.1,
            backpedal_radius: 125.0,
            backpedal_floor: 50.0,

            target_max_velocity: 1.9,
            target_min_velocity: 0.75,
            target_velocity_change: 1.0,
            prob_velocity_change: 0.009,
            flee_distance_ratio: 0.7,
            flee: FleeMode::Reverse,
            fixed_target: false,

            repulsion_divisor: 100.0,
            repulsion_exponent: 3,
            repulsion_floor: 1.0,
            target_repulsion_strength: 1e9,
            target_repulsion_exponent: 4,
            neighbour_gain: 0.1,
        }
    }
}

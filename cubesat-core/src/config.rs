use thiserror::Error;

/// Reasons a [`SwarmConfig`] is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("edge margin {margin} leaves no interior in a {width}x{height} arena")]
    MarginTooLarge { margin: f32, width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("target min velocity {min} exceeds max velocity {max}")]
    VelocityBand { min: f32, max: f32 },
    #[error("target max velocity {target} must exceed agent max velocity {agent}")]
    TargetTooSlow { target: f32, agent: f32 },
    #[error("{name} must lie in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f32,
    },
    #[error("{0} must be non-zero")]
    Zero(&'static str),
}

/// What happens when a body reaches the arena margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Shift (or contract) the whole swarm back toward the arena center.
    #[default]
    Recenter,
    /// Clamp the offending body inside the margin and reflect its velocity.
    Contain,
}

/// How the target reacts when the swarm falls too far behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FleeResponse {
    /// Reverse the velocity.
    #[default]
    Reverse,
    /// Nearly stop (`velocity *= -0.01`).
    Dampen,
}

impl FleeResponse {
    pub fn factor(self) -> f32 {
        match self {
            FleeResponse::Reverse => -1.0,
            FleeResponse::Dampen => -0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from an edge at which a body counts as out of bounds.
    pub margin: f32,
    /// Largest centroid offset (per axis) considered centered.
    pub centered_enough: f32,
    pub boundary: BoundaryPolicy,
    /// Recenter speed as a multiple of the fastest body's max velocity.
    pub recenter_speed_factor: f32,
    /// Fraction of the way toward the center each body moves per rescale tick.
    pub rescale_rate: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            margin: 50.0,
            centered_enough: 5.0,
            boundary: BoundaryPolicy::Recenter,
            recenter_speed_factor: 5.0,
            rescale_rate: 0.003,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    /// Pixels per tick, enforced on the dominant axis.
    pub max_velocity: f32,
    /// Degrees per tick.
    pub max_turn_rate: f32,
    /// Length of an impaired agent's rotate/translate duty cycle, in ticks.
    pub directional_ticks_limit: u32,
    /// Impaired agents only correct velocity while the phase counter is
    /// below this; afterwards they coast.
    pub velocity_correction_ticks: u32,
    /// Fraction of velocity shed every tick after the correction.
    pub velocity_damping: f32,
    /// Distance inside which the backpedal multiplier exceeds one.
    pub backpedal_radius: f32,
    /// Distance below which the backpedal multiplier stops growing.
    pub backpedal_floor: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_velocity: 1.0,
            max_turn_rate: 0.5,
            directional_ticks_limit: 50,
            velocity_correction_ticks: 6,
            velocity_damping: 0.1,
            backpedal_radius: 125.0,
            backpedal_floor: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetConfig {
    pub max_velocity: f32,
    pub min_velocity: f32,
    /// Largest per-axis random velocity change.
    pub velocity_change: f32,
    /// Chance per tick of a random velocity change.
    pub prob_velocity_change: f32,
    /// Flee once the farthest agent is beyond this fraction of arena width.
    pub flee_distance_ratio: f32,
    pub flee_response: FleeResponse,
    /// A fixed target never moves.
    pub fixed: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            max_velocity: 1.9,
            min_velocity: 0.75,
            velocity_change: 1.0,
            prob_velocity_change: 0.009,
            flee_distance_ratio: 0.7,
            flee_response: FleeResponse::Reverse,
            fixed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub divisor: f32,
    pub exponent: i32,
    pub floor_distance: f32,
    pub target_strength: f32,
    pub target_exponent: i32,
    /// Weight of the summed neighbour repulsion in the velocity correction.
    pub neighbour_gain: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            divisor: 100.0,
            exponent: 3,
            floor_distance: 1.0,
            target_strength: 1e9,
            target_exponent: 4,
            neighbour_gain: 0.1,
        }
    }
}

/// Complete, validated configuration of a swarm simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwarmConfig {
    pub arena: ArenaConfig,
    pub agent: AgentConfig,
    pub target: TargetConfig,
    pub field: FieldConfig,
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn within(
    name: &'static str,
    range: &'static str,
    value: f32,
    ok: bool,
) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, range, value })
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if !(arena.width > 0.0 && arena.height > 0.0) {
            return Err(ConfigError::InvalidArena {
                width: arena.width,
                height: arena.height,
            });
        }
        if arena.margin < 0.0 || 2.0 * arena.margin >= arena.width.min(arena.height) {
            return Err(ConfigError::MarginTooLarge {
                margin: arena.margin,
                width: arena.width,
                height: arena.height,
            });
        }
        positive("centered_enough", arena.centered_enough)?;
        positive("recenter_speed_factor", arena.recenter_speed_factor)?;
        within(
            "rescale_rate",
            "(0, 1)",
            arena.rescale_rate,
            arena.rescale_rate > 0.0 && arena.rescale_rate < 1.0,
        )?;

        let agent = &self.agent;
        positive("agent max_velocity", agent.max_velocity)?;
        positive("agent max_turn_rate", agent.max_turn_rate)?;
        positive("backpedal_radius", agent.backpedal_radius)?;
        positive("backpedal_floor", agent.backpedal_floor)?;
        if agent.directional_ticks_limit == 0 {
            return Err(ConfigError::Zero("directional_ticks_limit"));
        }
        if agent.velocity_correction_ticks == 0 {
            return Err(ConfigError::Zero("velocity_correction_ticks"));
        }
        within(
            "velocity_damping",
            "[0, 1)",
            agent.velocity_damping,
            (0.0..1.0).contains(&agent.velocity_damping),
        )?;

        let target = &self.target;
        positive("target max_velocity", target.max_velocity)?;
        positive("target min_velocity", target.min_velocity)?;
        if target.min_velocity > target.max_velocity {
            return Err(ConfigError::VelocityBand {
                min: target.min_velocity,
                max: target.max_velocity,
            });
        }
        if target.max_velocity <= agent.max_velocity {
            return Err(ConfigError::TargetTooSlow {
                target: target.max_velocity,
                agent: agent.max_velocity,
            });
        }
        within(
            "prob_velocity_change",
            "[0, 1]",
            target.prob_velocity_change,
            (0.0..=1.0).contains(&target.prob_velocity_change),
        )?;
        positive("flee_distance_ratio", target.flee_distance_ratio)?;
        if target.velocity_change < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "velocity_change",
                value: target.velocity_change,
            });
        }

        let field = &self.field;
        positive("field divisor", field.divisor)?;
        positive("field floor_distance", field.floor_distance)?;
        positive("target_strength", field.target_strength)?;
        positive("neighbour_gain", field.neighbour_gain)?;
        if field.exponent <= 0 {
            return Err(ConfigError::NonPositive {
                name: "field exponent",
                value: field.exponent as f32,
            });
        }
        if field.target_exponent <= 0 {
            return Err(ConfigError::NonPositive {
                name: "target_exponent",
                value: field.target_exponent as f32,
            });
        }
        Ok(())
    }

    /// Speed cap applied to a recentering shift.
    pub fn recenter_speed(&self) -> f32 {
        self.arena.recenter_speed_factor * self.agent.max_velocity.max(self.target.max_velocity)
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cubesat_core::{
    AgentConfig, ArenaConfig, BoundaryPolicy, FieldConfig, FleeResponse, SwarmConfig, TargetConfig,
};
use cubesat_shared::{BoundaryMode, FleeMode, SwarmSettings};

/// Read a JSON settings file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<SwarmSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub boundary: Option<BoundaryMode>,
    /// Only ever turns a fixed target on.
    pub fixed_target: bool,
}

impl Overrides {
    pub fn apply(&self, settings: &mut SwarmSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(boundary) = self.boundary {
            settings.boundary = boundary;
        }
        settings.fixed_target |= self.fixed_target;
    }
}

/// Map file settings onto the core configuration and validate it.
pub fn to_config(settings: &SwarmSettings) -> Result<SwarmConfig> {
    let config = SwarmConfig {
        arena: ArenaConfig {
            width: settings.width,
            height: settings.height,
            margin: settings.margin,
            centered_enough: settings.centered_enough,
            boundary: match settings.boundary {
                BoundaryMode::Recenter => BoundaryPolicy::Recenter,
                BoundaryMode::Contain => BoundaryPolicy::Contain,
            },
            recenter_speed_factor: settings.recenter_speed_factor,
            rescale_rate: settings.rescale_rate,
        },
        agent: AgentConfig {
            max_velocity: settings.agent_max_velocity,
            max_turn_rate: settings.agent_max_turn_rate,
            directional_ticks_limit: settings.directional_ticks_limit,
            velocity_correction_ticks: settings.velocity_correction_ticks,
            velocity_damping: settings.velocity_damping,
            backpedal_radius: settings.backpedal_radius,
            backpedal_floor: settings.backpedal_floor,
        },
        target: TargetConfig {
            max_velocity: settings.target_max_velocity,
            min_velocity: settings.target_min_velocity,
            velocity_change: settings.target_velocity_change,
            prob_velocity_change: settings.prob_velocity_change,
            flee_distance_ratio: settings.flee_distance_ratio,
            flee_response: match settings.flee {
                FleeMode::Reverse => FleeResponse::Reverse,
                FleeMode::Dampen => FleeResponse::Dampen,
            },
            fixed: settings.fixed_target,
        },
        field: FieldConfig {
            divisor: settings.repulsion_divisor,
            exponent: settings.repulsion_exponent,
            floor_distance: settings.repulsion_floor,
            target_strength: settings.target_repulsion_strength,
            target_exponent: settings.target_repulsion_exponent,
            neighbour_gain: settings.neighbour_gain,
        },
    };
    config.validate().context("Invalid simulation settings")?;
    Ok(config)
}

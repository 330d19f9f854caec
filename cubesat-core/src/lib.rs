//! Motion control and formation management for a swarm of CubeSats tracking
//! a moving target inside a bounded 2D arena.
//!
//! Everything here is synchronous arithmetic on positions, velocities and
//! headings. Rendering, windowing and the outer loop belong to the caller,
//! which drives a [`Swarm`] one [`Swarm::tick`] at a time.

pub mod agent;
pub mod angle;
pub mod body;
pub mod config;
pub mod field;
pub mod formation;
pub mod kinematics;
pub mod swarm;
pub mod target;
pub mod vector;

pub use agent::{AgentMode, AgentUpdate, ImpairedPhase};
pub use body::{Body, BodyId, SwarmSnapshot};
pub use config::{
    AgentConfig, ArenaConfig, BoundaryPolicy, ConfigError, FieldConfig, FleeResponse,
    SwarmConfig, TargetConfig,
};
pub use formation::{FormationManager, FormationState};
pub use swarm::{Placement, Swarm, SwarmBuilder};
pub use vector::Vector2D;

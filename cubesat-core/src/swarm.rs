//! The tick orchestrator tying every controller together.

use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::{step_agent, AgentMode};
use crate::body::{Body, BodyId, SwarmSnapshot};
use crate::config::{BoundaryPolicy, ConfigError, SwarmConfig};
use crate::formation::{self, FormationManager, FormationState};
use crate::target::step_target;
use crate::vector::Vector2D;

/// How a body's initial state is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Sampled fresh by the body factory when the swarm is built.
    Random,
    Explicit {
        position: Vector2D,
        velocity: Vector2D,
        heading: f32,
    },
}

impl Placement {
    pub fn at(position: Vector2D) -> Self {
        Placement::Explicit {
            position,
            velocity: Vector2D::zero(),
            heading: 0.0,
        }
    }

    fn materialize(self, id: BodyId, config: &SwarmConfig, rng: &mut StdRng) -> Body {
        match self {
            Placement::Random => Body::random(id, config.arena.width, config.arena.height, rng),
            Placement::Explicit {
                position,
                velocity,
                heading,
            } => Body::new(id, position, velocity, heading),
        }
    }
}

/// Collects the initial placements, then builds a validated [`Swarm`].
///
/// The target gets id 0 and agents are numbered from 1 in insertion order.
#[derive(Debug, Clone)]
pub struct SwarmBuilder {
    config: SwarmConfig,
    seed: Option<u64>,
    target: Placement,
    agents: Vec<(Placement, AgentMode)>,
}

impl SwarmBuilder {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            seed: None,
            target: Placement::Random,
            agents: Vec::new(),
        }
    }

    /// Seed the random source for a reproducible run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn target(mut self, placement: Placement) -> Self {
        self.target = placement;
        self
    }

    /// A target that never moves, parked at `position`.
    pub fn fixed_target(mut self, position: Vector2D) -> Self {
        self.config.target.fixed = true;
        self.target = Placement::at(position);
        self
    }

    pub fn agent(mut self, placement: Placement, mode: AgentMode) -> Self {
        self.agents.push((placement, mode));
        self
    }

    /// Add `count` randomly placed agents, the first `impaired` of which
    /// are impaired.
    pub fn random_agents(mut self, count: usize, impaired: usize) -> Self {
        for i in 0..count {
            let mode = if i < impaired {
                AgentMode::impaired()
            } else {
                AgentMode::Normal
            };
            self.agents.push((Placement::Random, mode));
        }
        self
    }

    pub fn build(self) -> Result<Swarm, ConfigError> {
        self.config.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut target = self.target.materialize(BodyId(0), &self.config, &mut rng);
        if self.config.target.fixed {
            target.velocity = Vector2D::zero();
        }
        let mut bodies = Vec::with_capacity(self.agents.len() + 1);
        bodies.push(target);
        let mut modes = Vec::with_capacity(self.agents.len());
        for (index, (placement, mode)) in self.agents.into_iter().enumerate() {
            let id = BodyId(index as u32 + 1);
            bodies.push(placement.materialize(id, &self.config, &mut rng));
            modes.push(mode);
        }

        info!(
            "swarm ready: {} agents ({} impaired), {} target, {}x{} arena",
            modes.len(),
            modes.iter().filter(|mode| mode.is_impaired()).count(),
            if self.config.target.fixed { "fixed" } else { "mobile" },
            self.config.arena.width,
            self.config.arena.height,
        );

        Ok(Swarm {
            config: self.config,
            bodies,
            modes,
            formation: FormationManager::new(),
            rng,
            tick: 0,
        })
    }
}

/// A target and the agents tracking it.
#[derive(Debug, Clone)]
pub struct Swarm {
    config: SwarmConfig,
    /// Target first, then agents.
    bodies: Vec<Body>,
    /// One entry per agent, aligned with `bodies[1..]`.
    modes: Vec<AgentMode>,
    formation: FormationManager,
    rng: StdRng,
    tick: u64,
}

impl Swarm {
    pub fn builder(config: SwarmConfig) -> SwarmBuilder {
        SwarmBuilder::new(config)
    }

    /// Advance the whole swarm by one tick.
    ///
    /// Boundary handling runs first and, while active, owns the tick. Otherwise
    /// every controller computes its next state against a snapshot taken at the
    /// start of the tick, so iteration order does not matter.
    pub fn tick(&mut self) {
        self.tick += 1;

        if self.config.arena.boundary == BoundaryPolicy::Recenter
            && self.formation.step(&mut self.bodies, &self.config)
        {
            trace!("tick {}: formation owns the tick", self.tick);
            return;
        }

        let frozen = self.bodies.clone();
        let swarm = SwarmSnapshot::new(&frozen);

        self.bodies[0] = step_target(swarm.target(), &swarm, &self.config, &mut self.rng);
        for (index, mode) in self.modes.iter_mut().enumerate() {
            let update = step_agent(&frozen[index + 1], *mode, &swarm, &self.config);
            self.bodies[index + 1] = update.body;
            *mode = update.mode;
        }

        if self.config.arena.boundary == BoundaryPolicy::Contain {
            formation::contain(&mut self.bodies, &self.config.arena);
        }
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn target(&self) -> &Body {
        &self.bodies[0]
    }

    /// Every agent with its current mode.
    pub fn agents(&self) -> impl Iterator<Item = (&Body, AgentMode)> + '_ {
        self.bodies[1..].iter().zip(self.modes.iter().copied())
    }

    pub fn agent_count(&self) -> usize {
        self.modes.len()
    }

    /// Target first, then agents.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn formation_state(&self) -> FormationState {
        self.formation.state()
    }

    pub fn is_recentering(&self) -> bool {
        self.formation.is_recentering()
    }

    pub fn is_rescaling(&self) -> bool {
        self.formation.is_rescaling()
    }
}

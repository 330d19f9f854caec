use cubesat_core::{AgentMode, Body, ImpairedPhase, Swarm, Vector2D};
use cubesat_shared::{BodyKind, BodyReport, FrameReport, Position};

fn position(v: Vector2D) -> Position {
    Position::new(v.x, v.y)
}

fn body_report(body: &Body, kind: BodyKind) -> BodyReport {
    BodyReport {
        id: body.id.0,
        kind,
        position: position(body.position),
        velocity: position(body.velocity),
        heading: body.heading,
    }
}

fn agent_kind(mode: AgentMode) -> BodyKind {
    match mode {
        AgentMode::Normal => BodyKind::Agent,
        AgentMode::Impaired(ImpairedPhase::Rotating) => BodyKind::ImpairedRotating,
        AgentMode::Impaired(ImpairedPhase::Translating { .. }) => BodyKind::ImpairedTranslating,
    }
}

/// Capture the current state of `swarm` for the presentation layer.
pub fn frame_report(swarm: &Swarm) -> FrameReport {
    let mut bodies = Vec::with_capacity(swarm.agent_count() + 1);
    bodies.push(body_report(swarm.target(), BodyKind::Target));
    bodies.extend(
        swarm
            .agents()
            .map(|(body, mode)| body_report(body, agent_kind(mode))),
    );
    FrameReport {
        tick: swarm.tick_count(),
        bodies,
        recentering: swarm.is_recentering(),
        rescaling: swarm.is_rescaling(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesat_core::{Placement, SwarmConfig};

    #[test]
    fn test_report_lists_target_first() {
        let swarm = Swarm::builder(SwarmConfig::default())
            .seed(1)
            .fixed_target(Vector2D::new(400.0, 400.0))
            .agent(Placement::at(Vector2D::new(200.0, 200.0)), AgentMode::Normal)
            .agent(Placement::at(Vector2D::new(600.0, 200.0)), AgentMode::impaired())
            .build()
            .unwrap();
        let report = frame_report(&swarm);

        assert_eq!(report.tick, 0);
        assert!(!report.recentering);
        let kinds: Vec<_> = report.bodies.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BodyKind::Target, BodyKind::Agent, BodyKind::ImpairedRotating]
        );
        assert_eq!(report.bodies[0].position, Position::new(400.0, 400.0));
        assert_eq!(report.bodies[2].id, 2);
    }
}

//! Target motion: an erratic wanderer that is faster than the agents chasing it.

use log::trace;
use rand::Rng;

use crate::body::{Body, SwarmSnapshot};
use crate::config::{SwarmConfig, TargetConfig};
use crate::vector::Vector2D;

/// Keep each velocity component inside the target's speed band.
///
/// Slow components double, fast ones shrink by 30%. A component that is
/// exactly zero stays zero.
pub fn enforce_speed_band(velocity: Vector2D, target: &TargetConfig) -> Vector2D {
    let band = |component: f32| {
        let mut component = component;
        if component.abs() < target.min_velocity {
            component *= 2.0;
        }
        if component.abs() > target.max_velocity {
            component *= 0.7;
        }
        component
    };
    Vector2D::new(band(velocity.x), band(velocity.y))
}

/// Occasionally kick the velocity by a random amount, then re-cap it.
pub fn perturb_velocity<R: Rng + ?Sized>(
    velocity: Vector2D,
    target: &TargetConfig,
    rng: &mut R,
) -> Vector2D {
    if !rng.gen_bool(f64::from(target.prob_velocity_change)) {
        return velocity;
    }
    let change = target.velocity_change;
    let delta = Vector2D::new(rng.gen_range(-change..=change), rng.gen_range(-change..=change));
    trace!("target velocity kick {delta:?}");
    (velocity + delta).limit_magnitude(target.max_velocity)
}

/// Advance the target by one tick against the frozen `swarm`.
///
/// A fixed target never moves. Otherwise its velocity is randomly perturbed,
/// reversed or nearly stopped when the swarm trails too far behind, pushed
/// back into the speed band, and finally applied to its position.
pub fn step_target<R: Rng + ?Sized>(
    body: &Body,
    swarm: &SwarmSnapshot<'_>,
    config: &SwarmConfig,
    rng: &mut R,
) -> Body {
    let target = &config.target;
    let mut next = *body;
    if target.fixed {
        next.velocity = Vector2D::zero();
        return next;
    }

    let mut velocity = perturb_velocity(body.velocity, target, rng);

    let flee_distance = config.arena.width * target.flee_distance_ratio;
    if let Some(farthest) = swarm.farthest_agent_distance(body.position) {
        if farthest > flee_distance {
            trace!("swarm trailing by {farthest:.1}, target turning back");
            velocity *= target.flee_response.factor();
        }
    }

    next.velocity = enforce_speed_band(velocity, target);
    next.position += next.velocity;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyId;
    use crate::config::FleeResponse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn body(id: u32, x: f32, y: f32, velocity: Vector2D) -> Body {
        Body::new(BodyId(id), Vector2D::new(x, y), velocity, 0.0)
    }

    #[test]
    fn test_speed_band() {
        let target = TargetConfig::default();
        let v = enforce_speed_band(Vector2D::new(0.5, -0.5), &target);
        assert_eq!(v, Vector2D::new(1.0, -1.0));

        let v = enforce_speed_band(Vector2D::new(2.0, -3.0), &target);
        assert!((v.x - 1.4).abs() < 1e-6);
        assert!((v.y + 2.1).abs() < 1e-6);

        let v = enforce_speed_band(Vector2D::new(1.2, 0.0), &target);
        assert_eq!(v, Vector2D::new(1.2, 0.0));
    }

    #[test]
    fn test_perturb_never_fires_at_zero_probability() {
        let mut target = TargetConfig::default();
        target.prob_velocity_change = 0.0;
        let mut rng = StdRng::seed_from_u64(3);
        let v = Vector2D::new(1.0, 1.0);
        for _ in 0..100 {
            assert_eq!(perturb_velocity(v, &target, &mut rng), v);
        }
    }

    #[test]
    fn test_perturb_always_fires_at_certainty() {
        let mut target = TargetConfig::default();
        target.prob_velocity_change = 1.0;
        let mut rng = StdRng::seed_from_u64(5);
        let v = Vector2D::new(1.8, -1.8);
        let mut changed = 0;
        for _ in 0..100 {
            let next = perturb_velocity(v, &target, &mut rng);
            assert!(next.max_axis() <= target.max_velocity + 1e-5);
            if next != v {
                changed += 1;
            }
        }
        assert!(changed > 90);
    }

    #[test]
    fn test_fixed_target_stays_put() {
        let mut config = SwarmConfig::default();
        config.target.fixed = true;
        let bodies = [body(0, 400.0, 400.0, Vector2D::new(1.0, 1.0))];
        let swarm = SwarmSnapshot::new(&bodies);
        let mut rng = StdRng::seed_from_u64(1);
        let next = step_target(&bodies[0], &swarm, &config, &mut rng);
        assert_eq!(next.position, bodies[0].position);
        assert_eq!(next.velocity, Vector2D::zero());
    }

    #[test]
    fn test_target_moves_within_band() {
        let mut config = SwarmConfig::default();
        config.target.prob_velocity_change = 0.0;
        let bodies = [
            body(0, 400.0, 400.0, Vector2D::new(1.0, -1.0)),
            body(1, 300.0, 300.0, Vector2D::zero()),
        ];
        let swarm = SwarmSnapshot::new(&bodies);
        let mut rng = StdRng::seed_from_u64(1);
        let next = step_target(&bodies[0], &swarm, &config, &mut rng);
        assert_eq!(next.velocity, Vector2D::new(1.0, -1.0));
        assert_eq!(next.position, Vector2D::new(401.0, 399.0));
    }

    #[test]
    fn test_target_turns_back_when_swarm_trails() {
        let mut config = SwarmConfig::default();
        config.target.prob_velocity_change = 0.0;
        let bodies = [
            body(0, 700.0, 700.0, Vector2D::new(1.0, 1.0)),
            body(1, 100.0, 100.0, Vector2D::zero()),
        ];
        let swarm = SwarmSnapshot::new(&bodies);
        let mut rng = StdRng::seed_from_u64(1);
        let next = step_target(&bodies[0], &swarm, &config, &mut rng);
        assert_eq!(next.velocity, Vector2D::new(-1.0, -1.0));

        config.target.flee_response = FleeResponse::Dampen;
        let next = step_target(&bodies[0], &swarm, &config, &mut rng);
        // -0.01 is then doubled by the speed band.
        assert!((next.velocity.x + 0.02).abs() < 1e-6);
        assert!((next.velocity.y + 0.02).abs() < 1e-6);
    }
}

//! Per-tick rate limiting for heading and velocity.
//!
//! Nothing here remembers a partially applied correction. Callers recompute
//! the desired correction from fresh state every tick, which is how the
//! residue of a clamped step gets retried.

use crate::angle::normalize_angle;
use crate::vector::Vector2D;

/// Clamp a heading correction to `±max_step` and apply it.
pub fn step_angle(current: f32, desired_correction: f32, max_step: f32) -> f32 {
    let step = desired_correction.clamp(-max_step, max_step);
    normalize_angle(current + step)
}

/// Apply a velocity correction and cap the result at `max_speed`.
pub fn step_velocity(current: Vector2D, correction: Vector2D, max_speed: f32) -> Vector2D {
    (current + correction).limit_magnitude(max_speed)
}

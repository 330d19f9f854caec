//! Heuristic repulsive potential field.
//!
//! Forces are inverse powers of distance, not physical forces. Every distance
//! is floored before the division so coincident bodies stay finite.

use crate::config::FieldConfig;
use crate::vector::Vector2D;

/// Scalar strength of the repulsion `other` exerts on `this`.
///
/// `1 / (d / divisor)^exponent` with `d` floored at `floor_distance`.
pub fn repulsive_force(this: Vector2D, other: Vector2D, field: &FieldConfig) -> f32 {
    let distance = this.distance(&other).max(field.floor_distance);
    1.0 / (distance / field.divisor).powi(field.exponent)
}

/// Sum of repulsion vectors pointing away from every neighbour.
///
/// Each neighbour contributes `(this - other) * repulsive_force`, so closer
/// neighbours dominate. The caller is responsible for leaving `this` out of
/// `others`.
pub fn aggregate_repulsion<I>(this: Vector2D, others: I, field: &FieldConfig) -> Vector2D
where
    I: IntoIterator<Item = Vector2D>,
{
    let mut total = Vector2D::zero();
    for other in others {
        total += (this - other) * repulsive_force(this, other, field);
    }
    total
}

/// Gain pulling an agent off its target.
///
/// `strength / d^exponent`: it equals one at the standoff distance
/// `strength^(1/exponent)`, and the approach gain `1 - force` turns negative
/// inside it.
pub fn target_repulsive_force(this: Vector2D, target: Vector2D, field: &FieldConfig) -> f32 {
    let distance = this.distance(&target).max(field.floor_distance);
    field.target_strength / distance.powi(field.target_exponent)
}

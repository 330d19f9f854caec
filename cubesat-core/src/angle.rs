//! Heading arithmetic. Headings are degrees in `(-180, 180]`.

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Signed turn from `heading` to `bearing`, taking the short way round.
pub fn heading_error(bearing: f32, heading: f32) -> f32 {
    normalize_angle(bearing - heading)
}

/// A 2D vector used for position and velocity, in screen coordinates
/// (x grows to the right, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Largest absolute component. Speed limits are enforced on this norm.
    pub fn max_axis(&self) -> f32 {
        self.x.abs().max(self.y.abs())
    }

    /// Scale the vector down so that its dominant axis equals `max`.
    ///
    /// Vectors already within the limit are returned unchanged, so the
    /// operation is idempotent.
    pub fn limit_magnitude(&self, max: f32) -> Self {
        let largest = self.max_axis();
        if largest <= max {
            return *self;
        }
        *self * (max / largest)
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Compass-style bearing of this vector in degrees.
    ///
    /// The y component is negated before `atan2` because screen y grows
    /// downward; 0 points right and positive angles turn counter-clockwise
    /// on screen.
    pub fn bearing(&self) -> f32 {
        (-self.y).atan2(self.x).to_degrees()
    }

    /// Linear blend `self * (1 - t) + other * t`.
    pub fn lerp(&self, other: Vector2D, t: f32) -> Self {
        *self * (1.0 - t) + other * t
    }
}

/// Mean of a set of points, `None` when the set is empty.
pub fn centroid<I>(points: I) -> Option<Vector2D>
where
    I: IntoIterator<Item = Vector2D>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0usize;
    for point in points {
        sum += point;
        count += 1;
    }
    (count > 0).then(|| sum / count as f32)
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::MulAssign<f32> for Vector2D {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(v.max_axis(), 4.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        assert_eq!(v1 + v2, Vector2D::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vector2D::new(2.0, 2.0));
        assert_eq!(v1 * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(v2 / 2.0, Vector2D::new(1.5, 2.0));
        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_distance() {
        let a = Vector2D::new(0.0, 0.0);
        let b = Vector2D::new(30.0, 40.0);
        assert_eq!(a.distance(&b), 50.0);
        assert_eq!(b.distance(&a), 50.0);
    }

    #[test]
    fn test_limit_scales_dominant_axis() {
        let v = Vector2D::new(4.0, -2.0).limit_magnitude(1.0);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_limit_leaves_small_vectors() {
        let v = Vector2D::new(0.5, -0.25);
        assert_eq!(v.limit_magnitude(1.0), v);
    }

    #[test]
    fn test_limit_is_idempotent() {
        let samples = [
            Vector2D::new(10.0, 3.0),
            Vector2D::new(-7.5, 22.0),
            Vector2D::new(0.1, 0.1),
            Vector2D::new(-3.0, -3.0),
        ];
        for v in samples {
            let once = v.limit_magnitude(2.0);
            assert_eq!(once.limit_magnitude(2.0), once);
            assert!(once.max_axis() <= 2.0 + 1e-6);
        }
    }

    #[test]
    fn test_bearing_uses_screen_coordinates() {
        assert_eq!(Vector2D::new(1.0, 0.0).bearing(), 0.0);
        assert!((Vector2D::new(0.0, -1.0).bearing() - 90.0).abs() < 1e-4);
        assert!((Vector2D::new(1.0, 1.0).bearing() + 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_centroid() {
        let points = [
            Vector2D::new(0.0, 0.0),
            Vector2D::new(10.0, 0.0),
            Vector2D::new(10.0, 10.0),
            Vector2D::new(0.0, 10.0),
        ];
        assert_eq!(centroid(points), Some(Vector2D::new(5.0, 5.0)));
        assert_eq!(centroid(std::iter::empty()), None);
    }

    #[test]
    fn test_lerp() {
        let a = Vector2D::new(0.0, 100.0);
        let b = Vector2D::new(100.0, 0.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vector2D::new(50.0, 50.0));
    }
}

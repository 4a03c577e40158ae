use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Represents the half-line `P(t) = origin + t * direction`. The direction is
/// not required to be unit length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));

        assert_eq!(ray.at(0.0), ray.origin);
        assert_eq!(ray.at(1.0), ray.origin + ray.direction);
        assert_eq!(ray.at(0.5), Vec3::new(3.0, 4.5, 6.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-3.0, -3.0, -3.0));
    }

    #[test]
    fn test_ray_at_is_affine() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 1.0), Vec3::new(0.25, -1.0, 2.0));

        // Equal steps in t give equal steps in space
        let step = ray.at(2.0) - ray.at(1.0);
        assert!((ray.at(3.0) - ray.at(2.0) - step).length() < 1e-5);
        assert!((step - ray.direction).length() < 1e-5);
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        let ray2 = ray1; // Copy, not move

        assert_eq!(ray1, ray2);
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}

//! Thin-lens camera for ray generation.

use crate::Ray;
use lumen_math::{random_in_unit_disk, Vec3};
use rand::RngCore;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when building a camera from its settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("Focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Camera position and look-at point coincide")]
    DegenerateView,

    #[error("Up vector is parallel to the view direction")]
    DegenerateUp,
}

/// User-level framing parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Eye position
    pub look_from: Vec3,
    /// Point the camera aims at
    pub look_at: Vec3,
    /// Up hint, need not be perpendicular to the view direction
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Image width divided by image height
    pub aspect_ratio: f32,
    /// Lens diameter, 0 for a pinhole camera
    pub aperture: f32,
    /// Distance from the eye to the plane of perfect focus
    pub focus_dist: f32,
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            aspect_ratio: 1.5,
            aperture: 0.1,
            focus_dist: 10.0,
        }
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built; safe to share between render threads.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build a camera from framing parameters.
    ///
    /// Rejects settings that would produce a degenerate basis or viewport
    /// instead of letting NaNs flow into the render.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        let CameraSettings {
            look_from,
            look_at,
            vup,
            vfov,
            aspect_ratio,
            aperture,
            focus_dist,
        } = *settings;

        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(vfov));
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(CameraError::InvalidAspectRatio(aspect_ratio));
        }
        if !(aperture >= 0.0) {
            return Err(CameraError::InvalidAperture(aperture));
        }
        if !(focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDistance(focus_dist));
        }

        // Calculate viewport dimensions
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at)
            .try_normalize()
            .ok_or(CameraError::DegenerateView)?;
        let u = vup.cross(w).try_normalize().ok_or(CameraError::DegenerateUp)?;
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        })
    }

    /// Generate a ray through the image-plane point (s, t).
    ///
    /// `s` runs left to right and `t` bottom to top, both over [0, 1]. With a
    /// non-zero aperture the origin is jittered over the lens disk.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin;

        Ray::new(origin, direction)
    }

    /// World-space eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing backwards along the view direction.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Radius of the simulated lens (half the aperture).
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z(aperture: f32) -> CameraSettings {
        CameraSettings::default()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, aperture, 1.0)
            .with_aspect_ratio(1.0)
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&looking_down_z(0.0)).unwrap();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!((camera.w() - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_lens_radius() {
        assert_eq!(Camera::new(&looking_down_z(0.0)).unwrap().lens_radius(), 0.0);
        assert_eq!(Camera::new(&looking_down_z(2.0)).unwrap().lens_radius(), 1.0);
    }

    #[test]
    fn test_camera_ray_directions() {
        let camera = Camera::new(&looking_down_z(0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert!(center.origin().length() < 1e-6);
        assert!(center.direction().z < 0.0);
        assert!(center.direction().x.abs() < 1e-6);
        assert!(center.direction().y.abs() < 1e-6);

        let top_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!(top_right.direction().x > 0.0);
        assert!(top_right.direction().y > 0.0);

        let bottom_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(bottom_left.direction().x < 0.0);
        assert!(bottom_left.direction().y < 0.0);
    }

    #[test]
    fn test_90_degree_viewport_extent() {
        // tan(45) = 1, so the corner ray at focus 1 is (1, 1, -1)
        let camera = Camera::new(&looking_down_z(0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((ray.direction() - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus() {
        let camera = Camera::new(&looking_down_z(2.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut moved = false;
        for _ in 0..16 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert!(ray.origin().length() < 1.0);
            assert_eq!(ray.origin().z, 0.0);
            moved |= ray.origin().length() > 1e-4;

            // Every lens sample passes through the same point on the focus plane
            let focus_point = ray.at(1.0);
            assert!((focus_point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        }
        assert!(moved);
    }

    #[test]
    fn test_invalid_settings() {
        let base = looking_down_z(0.0);

        assert_eq!(
            Camera::new(&base.with_lens(0.0, 0.0, 1.0)).unwrap_err(),
            CameraError::InvalidFieldOfView(0.0)
        );
        assert_eq!(
            Camera::new(&base.with_lens(180.0, 0.0, 1.0)).unwrap_err(),
            CameraError::InvalidFieldOfView(180.0)
        );
        assert_eq!(
            Camera::new(&base.with_aspect_ratio(0.0)).unwrap_err(),
            CameraError::InvalidAspectRatio(0.0)
        );
        assert_eq!(
            Camera::new(&base.with_lens(90.0, -1.0, 1.0)).unwrap_err(),
            CameraError::InvalidAperture(-1.0)
        );
        assert_eq!(
            Camera::new(&base.with_lens(90.0, 0.0, 0.0)).unwrap_err(),
            CameraError::InvalidFocusDistance(0.0)
        );
        assert_eq!(
            Camera::new(&base.with_position(Vec3::ONE, Vec3::ONE, Vec3::Y)).unwrap_err(),
            CameraError::DegenerateView
        );
        assert_eq!(
            Camera::new(&base.with_position(Vec3::ZERO, Vec3::Y, Vec3::Y)).unwrap_err(),
            CameraError::DegenerateUp
        );
    }
}

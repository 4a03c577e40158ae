//! Lumen renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! surfaces, a thin-lens camera and a row-parallel renderer.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraError, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, radiance, render, render_parallel, render_pixel, ImageBuffer,
    RenderConfig, T_MIN,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};

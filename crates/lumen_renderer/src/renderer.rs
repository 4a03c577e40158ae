//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via jittered multi-sampling
//! - Per-pixel seeded random streams, so output does not depend on scheduling
//! - Gamma correction on output

use std::time::Instant;

use crate::{Camera, Color, Hittable, Ray};
use lumen_math::Interval;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Deserialize;

/// Lower bound of the hit interval; keeps bounced rays from re-hitting the
/// surface they left due to floating point error.
pub const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            samples_per_pixel: 500,
            max_depth: 50,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Width divided by height, for building a matching camera.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Compute the radiance carried back along a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in their attenuation.
pub fn radiance(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * radiance(&result.scattered, world, depth - 1, rng),
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.999 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Seed for the random stream of pixel (x, y).
fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    let index = (u64::from(y) << 32) | u64::from(x);
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ index
}

/// Render a single pixel with multi-sampling.
///
/// `x` is the column and `y` the row, with row 0 at the top of the image.
/// Returns the linear average of all samples (black if there are none).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    if config.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    let mut rng = SmallRng::seed_from_u64(pixel_seed(config.seed, x, y));

    // The image plane's t axis runs bottom to top
    let j = config.height.saturating_sub(1 + y);
    let s_scale = config.width.saturating_sub(1).max(1) as f32;
    let t_scale = config.height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + rng.gen::<f32>()) / s_scale;
        let t = (j as f32 + rng.gen::<f32>()) / t_scale;
        let ray = camera.get_ray(s, t, &mut rng);
        pixel_color += radiance(&ray, world, config.max_depth, &mut rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Row-major buffer of linear pixel colors, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to gamma-corrected RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} @ {} spp, depth {} (serial)",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut image = ImageBuffer::new(config.width, config.height);
    for y in 0..config.height {
        for x in 0..config.width {
            let color = render_pixel(camera, world, x, y, config);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// Render the entire scene, one image row per rayon task.
///
/// Each row is written straight into its slot in the buffer, so the result
/// is exactly the same as [`render`].
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> ImageBuffer {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} threads)",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        rayon::current_num_threads()
    );

    let mut image = ImageBuffer::new(config.width, config.height);
    if config.width > 0 {
        image
            .pixels
            .par_chunks_mut(config.width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = render_pixel(camera, world, x as u32, y as u32, config);
                }
                log::trace!("Row {} done", y);
            });
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

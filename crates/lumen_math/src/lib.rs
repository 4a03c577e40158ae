// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{near_zero, random_in_unit_disk, random_in_unit_sphere, reflect, refract};

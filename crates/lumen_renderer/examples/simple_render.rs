//! Simple path tracer example.
//!
//! Renders three spheres on a ground plane and saves to PPM format.

use lumen_renderer::{
    color_to_rgb8, render_parallel, Camera, CameraSettings, Color, Dielectric, HittableList,
    ImageBuffer, Lambertian, Metal, RenderConfig, Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ground = Lambertian::new(Color::new(0.8, 0.8, 0.0));
    let center = Lambertian::new(Color::new(0.1, 0.2, 0.5));
    let left = Dielectric::new(1.5);
    let right = Metal::new(Color::new(0.8, 0.6, 0.2), 0.1);

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, &ground)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, &center)));
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, &left)));
    world.add(Box::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, &right)));

    let config = RenderConfig {
        width: 400,
        height: 225,
        samples_per_pixel: 50,
        max_depth: 10,
        seed: 0,
    };

    let settings = CameraSettings::default()
        .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(30.0, 0.2, 3.4)
        .with_aspect_ratio(config.aspect_ratio());
    let camera = Camera::new(&settings)?;

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );
    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &world, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

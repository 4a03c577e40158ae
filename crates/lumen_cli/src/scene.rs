//! Procedural demo scene: a field of small random spheres around three large
//! ones on a huge ground sphere.

use lumen_renderer::{Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Half-width of the grid of small spheres.
const GRID_EXTENT: i32 = 11;
const SMALL_RADIUS: f32 = 0.2;

/// Index into a [`DemoScene`]'s material store.
type MaterialId = usize;

/// Placement of one sphere before it is bound to its material.
#[derive(Debug, Clone, Copy)]
struct SphereSpec {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

/// A scene that owns its materials; spheres borrow them when the world is built.
pub struct DemoScene {
    materials: Vec<Box<dyn Material>>,
    spheres: Vec<SphereSpec>,
}

impl DemoScene {
    fn new() -> Self {
        Self {
            materials: Vec::new(),
            spheres: Vec::new(),
        }
    }

    fn add_material(&mut self, material: impl Material + 'static) -> MaterialId {
        self.materials.push(Box::new(material));
        self.materials.len() - 1
    }

    fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) {
        self.spheres.push(SphereSpec {
            center,
            radius,
            material,
        });
    }

    /// Generate the demo layout. The same seed always gives the same scene.
    pub fn random(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut scene = Self::new();

        let ground = scene.add_material(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

        // Small spheres, keeping clear of the large metal one
        let clearance = Vec3::new(4.0, SMALL_RADIUS, 0.0);
        for a in -GRID_EXTENT..GRID_EXTENT {
            for b in -GRID_EXTENT..GRID_EXTENT {
                let choose_mat: f32 = rng.gen();
                let center = Vec3::new(
                    a as f32 + 0.9 * rng.gen::<f32>(),
                    SMALL_RADIUS,
                    b as f32 + 0.9 * rng.gen::<f32>(),
                );

                if (center - clearance).length() <= 0.9 {
                    continue;
                }

                let material = if choose_mat < 0.8 {
                    // Diffuse
                    let albedo = Color::new(
                        rng.gen::<f32>() * rng.gen::<f32>(),
                        rng.gen::<f32>() * rng.gen::<f32>(),
                        rng.gen::<f32>() * rng.gen::<f32>(),
                    );
                    scene.add_material(Lambertian::new(albedo))
                } else if choose_mat < 0.95 {
                    // Metal
                    let albedo = Color::new(
                        0.5 * (1.0 + rng.gen::<f32>()),
                        0.5 * (1.0 + rng.gen::<f32>()),
                        0.5 * (1.0 + rng.gen::<f32>()),
                    );
                    let fuzz = 0.5 * rng.gen::<f32>();
                    scene.add_material(Metal::new(albedo, fuzz))
                } else {
                    // Glass
                    scene.add_material(Dielectric::new(1.5))
                };
                scene.add_sphere(center, SMALL_RADIUS, material);
            }
        }

        let matte = scene.add_material(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
        scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte);

        let glass = scene.add_material(Dielectric::new(1.5));
        scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);

        let mirror = scene.add_material(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
        scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror);

        log::debug!(
            "Generated demo scene: {} spheres, {} materials",
            scene.sphere_count(),
            scene.material_count()
        );
        scene
    }

    /// Build the hittable world, borrowing materials from this scene.
    pub fn world(&self) -> HittableList<'_> {
        let mut world = HittableList::new();
        for spec in &self.spheres {
            let material = self.materials[spec.material].as_ref();
            world.add(Box::new(Sphere::new(spec.center, spec.radius, material)));
        }
        world
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::{Hittable, Interval, Ray};

    #[test]
    fn test_scene_layout() {
        let scene = DemoScene::random(0);

        // Ground + three large spheres + at most a full grid of small ones
        let grid = (2 * GRID_EXTENT * 2 * GRID_EXTENT) as usize;
        assert!(scene.sphere_count() > 4);
        assert!(scene.sphere_count() <= grid + 4);
        assert_eq!(scene.material_count(), scene.sphere_count());
        assert_eq!(scene.world().len(), scene.sphere_count());
    }

    #[test]
    fn test_small_spheres_keep_clear_of_mirror() {
        let scene = DemoScene::random(5);
        let clearance = Vec3::new(4.0, SMALL_RADIUS, 0.0);

        for spec in scene.spheres.iter().filter(|s| s.radius == SMALL_RADIUS) {
            assert!((spec.center - clearance).length() > 0.9);
            assert_eq!(spec.center.y, SMALL_RADIUS);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = DemoScene::random(17);
        let b = DemoScene::random(17);

        assert_eq!(a.sphere_count(), b.sphere_count());
        for (sa, sb) in a.spheres.iter().zip(&b.spheres) {
            assert_eq!(sa.center, sb.center);
            assert_eq!(sa.material, sb.material);
        }
    }

    #[test]
    fn test_world_has_ground() {
        let scene = DemoScene::random(1);
        let world = scene.world();

        // Straight down just outside the grid of small spheres
        let ray = Ray::new(Vec3::new(0.5, 50.0, 13.0), Vec3::NEG_Y);
        let rec = world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should land on the ground");

        // The ground curves away slightly: y = sqrt(1000^2 - 169.25) - 1000
        assert!((rec.p.y + 0.0846).abs() < 1e-2);
        assert!(rec.front_face);
    }
}

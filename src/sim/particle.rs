// particle.rs - Glyph dust particles
//
// Structure-of-Arrays layout for cache-friendly iteration. Capacity is
// text-dependent (every covered glyph pixel is one particle), so storage
// is Vec-based rather than fixed arrays.

use super::{ParticleField, Pointer};

// Per-particle coefficient ranges, fixed at spawn.
const FRICTION_MIN: f32 = 0.15;
const FRICTION_SPAN: f32 = 0.6;
const EASE_MIN: f32 = 0.005;
const EASE_SPAN: f32 = 0.1;

// Floor for the squared pointer distance. Keeps the repulsion force
// finite when a particle sits exactly under the pointer.
const MIN_DISTANCE: f32 = 0.01;

pub struct Particles {
    // Current position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Fixed origin sampled from the rasterized text
    pub origin_x: Vec<f32>,
    pub origin_y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Per-particle coefficients
    pub friction: Vec<f32>,
    pub ease: Vec<f32>,

    // Opaque RGB sampled from the glyph pixel
    pub color: Vec<[u8; 3]>,
}

impl Particles {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            origin_x: Vec::new(),
            origin_y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            friction: Vec::new(),
            ease: Vec::new(),
            color: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.origin_x.clear();
        self.origin_y.clear();
        self.vx.clear();
        self.vy.clear();
        self.friction.clear();
        self.ease.clear();
        self.color.clear();
    }

    /// Spawn one particle targeting (origin_x, origin_y). Its current
    /// position starts anywhere on the surface.
    pub fn spawn(
        &mut self,
        origin_x: f32,
        origin_y: f32,
        color: [u8; 3],
        surface_w: f32,
        surface_h: f32,
        rng: &mut u32,
    ) {
        self.x.push(ParticleField::rand(rng) * surface_w);
        self.y.push(ParticleField::rand(rng) * surface_h);
        self.origin_x.push(origin_x);
        self.origin_y.push(origin_y);
        self.vx.push(0.0);
        self.vy.push(0.0);
        self.friction
            .push(FRICTION_MIN + ParticleField::rand(rng) * FRICTION_SPAN);
        self.ease.push(EASE_MIN + ParticleField::rand(rng) * EASE_SPAN);
        self.color.push(color);
    }

    /// Advance every particle one frame: pointer repulsion impulse, then
    /// friction damping, then spring-like return toward origin.
    ///
    /// `distance` stays squared and gates against the un-squared radius;
    /// the repulsion falloff shape depends on both.
    pub fn update(&mut self, pointer: &Pointer) {
        for i in 0..self.len() {
            let dx = pointer.x - self.x[i];
            let dy = pointer.y - self.y[i];
            let distance = (dx * dx + dy * dy).max(MIN_DISTANCE);
            let force = -pointer.radius / distance;

            if distance < pointer.radius {
                let angle = dy.atan2(dx);
                self.vx[i] += force * angle.cos();
                self.vy[i] += force * angle.sin();
            }

            self.vx[i] *= self.friction[i];
            self.vy[i] *= self.friction[i];
            self.x[i] += self.vx[i] + (self.origin_x[i] - self.x[i]) * self.ease[i];
            self.y[i] += self.vy[i] + (self.origin_y[i] - self.y[i]) * self.ease[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_one(rng: &mut u32) -> Particles {
        let mut particles = Particles::new();
        particles.spawn(100.0, 100.0, [255, 0, 0], 800.0, 600.0, rng);
        particles
    }

    #[test]
    fn spawn_randomizes_within_ranges() {
        let mut rng = 0xDEADBEEFu32;
        let mut particles = Particles::new();
        for _ in 0..100 {
            particles.spawn(10.0, 20.0, [1, 2, 3], 800.0, 600.0, &mut rng);
        }
        for i in 0..particles.len() {
            assert!(particles.x[i] >= 0.0 && particles.x[i] < 800.0);
            assert!(particles.y[i] >= 0.0 && particles.y[i] < 600.0);
            assert!(particles.friction[i] >= 0.15 && particles.friction[i] < 0.75);
            assert!(particles.ease[i] >= 0.005 && particles.ease[i] < 0.105);
            assert_eq!(particles.vx[i], 0.0);
            assert_eq!(particles.vy[i], 0.0);
        }
    }

    #[test]
    fn near_pointer_pushes_particle_away() {
        let mut rng = 7u32;
        let mut particles = spawn_one(&mut rng);
        particles.x[0] = 100.0;
        particles.y[0] = 100.0;

        // Pointer just right of the particle: repulsion points left.
        let pointer = Pointer {
            x: 110.0,
            y: 100.0,
            radius: 8000.0,
        };
        particles.update(&pointer);
        assert!(particles.vx[0] < 0.0, "vx = {}", particles.vx[0]);
        assert_eq!(particles.vy[0], 0.0);
    }

    #[test]
    fn outside_radius_no_impulse_is_applied() {
        let mut rng = 7u32;
        let mut particles = spawn_one(&mut rng);
        particles.x[0] = 100.0;
        particles.y[0] = 100.0;

        // Squared distance 1_000_000 >= radius, so only the spring acts.
        let pointer = Pointer {
            x: 1100.0,
            y: 100.0,
            radius: 8000.0,
        };
        particles.update(&pointer);
        assert_eq!(particles.vx[0], 0.0);
        assert_eq!(particles.vy[0], 0.0);
        // Spring pulled the particle toward its origin (x stays, no force).
        assert_eq!(particles.x[0], 100.0);
    }

    #[test]
    fn pointer_on_particle_stays_finite() {
        let mut rng = 7u32;
        let mut particles = spawn_one(&mut rng);
        let pointer = Pointer {
            x: particles.x[0],
            y: particles.y[0],
            radius: 8000.0,
        };
        for _ in 0..10 {
            particles.update(&pointer);
        }
        assert!(particles.x[0].is_finite());
        assert!(particles.y[0].is_finite());
        assert!(particles.vx[0].is_finite());
        assert!(particles.vy[0].is_finite());
    }

    #[test]
    fn relaxes_to_origin_without_pointer_force() {
        let mut rng = 99u32;
        let mut particles = spawn_one(&mut rng);
        let pointer = Pointer {
            x: 100_000.0,
            y: 100_000.0,
            radius: 8000.0,
        };
        for _ in 0..4000 {
            particles.update(&pointer);
        }
        assert!((particles.x[0] - particles.origin_x[0]).abs() < 0.5);
        assert!((particles.y[0] - particles.origin_y[0]).abs() < 0.5);
        assert!(particles.vx[0].abs() < 1e-3);
        assert!(particles.vy[0].abs() < 1e-3);
    }
}

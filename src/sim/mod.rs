// sim/ - Particle field simulation
//
// Owns the particle batch and the shared pointer state. Particles are
// repopulated wholesale whenever the text changes; between changes the
// only per-frame work is the update pass.

mod particle;

pub use particle::Particles;

use crate::raster::Seed;

// Repulsion radius scale: radius = surface width * 10. Squared pixel
// distances on normal surfaces sit far below this, so the force gate in
// the update pass is almost always open.
const RADIUS_SCALE: f32 = 10.0;

const FALLBACK_SEED: u32 = 0xDEADBEEF;

/// Shared pointer state, written by the host on pointer-move and read by
/// every particle during update.
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Pointer {
    pub fn new(surface_w: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: surface_w * RADIUS_SCALE,
        }
    }
}

/// Particle field for one surface
pub struct ParticleField {
    surface_w: f32,
    surface_h: f32,
    pub particles: Particles,
    pub pointer: Pointer,

    // RNG state
    rng: u32,
}

impl ParticleField {
    pub fn new(width: u32, height: u32, seed: u32) -> Self {
        Self {
            surface_w: width as f32,
            surface_h: height as f32,
            particles: Particles::new(),
            pointer: Pointer::new(width as f32),
            // xorshift has a fixed point at zero
            rng: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.x = x;
        self.pointer.y = y;
    }

    /// Discard the whole batch and spawn one particle per seed
    pub fn repopulate(&mut self, seeds: &[Seed]) {
        self.particles.clear();
        for seed in seeds {
            self.particles.spawn(
                seed.x,
                seed.y,
                seed.color,
                self.surface_w,
                self.surface_h,
                &mut self.rng,
            );
        }
    }

    /// Advance every particle one frame against the current pointer
    pub fn update(&mut self) {
        self.particles.update(&self.pointer);
    }

    // Random number generator (xorshift32)
    #[inline(always)]
    pub fn rand(rng: &mut u32) -> f32 {
        *rng ^= *rng << 13;
        *rng ^= *rng >> 17;
        *rng ^= *rng << 5;
        (*rng >> 8) as f32 * (1.0 / 16777216.0)
    }
}

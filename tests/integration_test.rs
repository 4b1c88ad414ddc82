// Pipeline tests that skip the font stage: seeds go straight into the
// field, the field ticks against a pointer, and the framebuffer is
// checked for the particles' colors.

use glyphdust_engine::{ParticleField, Seed, Surface};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 150;

fn seeds_in_a_row(count: usize, color: [u8; 3]) -> Vec<Seed> {
    (0..count)
        .map(|i| Seed {
            x: 20.0 + i as f32 * 4.0,
            y: 75.0,
            color,
        })
        .collect()
}

fn opaque_pixels(surface: &Surface) -> Vec<(u32, u32, [u8; 3])> {
    let rgba = surface.as_rgba();
    let mut found = Vec::new();
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let idx = ((y * surface.width() + x) * 4) as usize;
            if rgba[idx + 3] > 0 {
                found.push((x, y, [rgba[idx], rgba[idx + 1], rgba[idx + 2]]));
            }
        }
    }
    found
}

#[test]
fn text_change_fully_replaces_particles() {
    let mut field = ParticleField::new(WIDTH, HEIGHT, 42);

    field.repopulate(&seeds_in_a_row(30, [255, 0, 0]));
    assert_eq!(field.particles.len(), 30);

    // New batch size is independent of the old one.
    field.repopulate(&seeds_in_a_row(7, [255, 255, 0]));
    assert_eq!(field.particles.len(), 7);
    assert!(field.particles.color.iter().all(|&c| c == [255, 255, 0]));
}

#[test]
fn field_settles_onto_seed_origins() {
    let mut field = ParticleField::new(WIDTH, HEIGHT, 42);
    let seeds = seeds_in_a_row(5, [255, 165, 0]);
    field.repopulate(&seeds);

    // Pointer parked far outside the surface: squared distance is always
    // at least radius, so only the spring acts.
    field.set_pointer(-100_000.0, -100_000.0);
    for _ in 0..4000 {
        field.update();
    }

    for i in 0..field.particles.len() {
        let dx = field.particles.x[i] - field.particles.origin_x[i];
        let dy = field.particles.y[i] - field.particles.origin_y[i];
        assert!(dx.abs() < 0.5 && dy.abs() < 0.5, "particle {i} at ({dx}, {dy}) from origin");
        assert!(field.particles.vx[i].abs() < 1e-3);
        assert!(field.particles.vy[i].abs() < 1e-3);
    }
}

#[test]
fn settled_frame_shows_seed_colors_near_origins() {
    let mut field = ParticleField::new(WIDTH, HEIGHT, 7);
    let seeds = seeds_in_a_row(5, [255, 165, 0]);
    field.repopulate(&seeds);

    field.set_pointer(-100_000.0, -100_000.0);
    for _ in 0..4000 {
        field.update();
    }

    let mut surface = Surface::new(WIDTH, HEIGHT).unwrap();
    surface.clear();
    surface.encode_particles(&field.particles, 1);

    let drawn = opaque_pixels(&surface);
    assert!(!drawn.is_empty());
    assert!(drawn.iter().all(|&(_, _, c)| c == [255, 165, 0]));

    // Every seed origin has a drawn pixel within a pixel of it.
    for seed in &seeds {
        let hit = drawn.iter().any(|&(x, y, _)| {
            (x as f32 - seed.x).abs() <= 1.0 && (y as f32 - seed.y).abs() <= 1.0
        });
        assert!(hit, "no pixel near seed ({}, {})", seed.x, seed.y);
    }
}

#[test]
fn pointer_sweep_keeps_every_particle_finite() {
    let mut field = ParticleField::new(WIDTH, HEIGHT, 3);
    field.repopulate(&seeds_in_a_row(20, [255, 0, 0]));

    // Drag the pointer straight through the row of origins, including
    // frames where it sits exactly on particle positions.
    for step in 0..600 {
        let t = step as f32 / 600.0;
        field.set_pointer(t * WIDTH as f32, 75.0);
        field.update();
    }

    for i in 0..field.particles.len() {
        assert!(field.particles.x[i].is_finite());
        assert!(field.particles.y[i].is_finite());
        assert!(field.particles.vx[i].is_finite());
        assert!(field.particles.vy[i].is_finite());
    }
}

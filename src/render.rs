// render.rs - RGBA framebuffer shared with the host
//
// The surface is a plain width*height*4 byte buffer. The wasm host wraps
// it in an ImageData and blits it to a canvas every frame; the native bin
// hands it to the image crate. Layout matches ImageData: row-major RGBA.

use crate::EngineError;
use crate::sim::Particles;

pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    /// Clear to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Fill an opaque axis-aligned square of side `size` at (x, y)
    pub fn fill_rect(&mut self, x: f32, y: f32, size: u32, color: [u8; 3]) {
        let x0 = x as i32;
        let y0 = y as i32;
        let (w, h) = (self.width as i32, self.height as i32);

        for dy in 0..size as i32 {
            for dx in 0..size as i32 {
                let px = x0 + dx;
                let py = y0 + dy;
                if px < 0 || px >= w || py < 0 || py >= h {
                    continue;
                }
                let idx = ((py * w + px) * 4) as usize;
                self.pixels[idx] = color[0];
                self.pixels[idx + 1] = color[1];
                self.pixels[idx + 2] = color[2];
                self.pixels[idx + 3] = 0xFF;
            }
        }
    }

    /// Draw every particle as a gap-sized square at its current position
    pub fn encode_particles(&mut self, particles: &Particles, gap: u32) {
        for i in 0..particles.len() {
            self.fill_rect(particles.x[i], particles.y[i], gap, particles.color[i]);
        }
    }

    pub fn ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

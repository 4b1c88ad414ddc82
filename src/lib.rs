// glyphdust-engine - Interactive text-disintegration effect
//
// A string is rasterized into a cloud of colored particles that scatter
// away from the pointer and spring back to the glyph pixels they were
// sampled from. The engine is pure Rust: the JS host owns the canvas,
// the input box and the rAF loop, feeds pointer/text events in through
// DustWorld, and blits the RGBA framebuffer out every frame.

use wasm_bindgen::prelude::*;

mod raster;
mod render;
mod sim;

pub use raster::{Seed, TextRasterizer};
pub use render::Surface;
pub use sim::{ParticleField, Particles, Pointer};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("font data contains no usable face")]
    FontLoad,
}

#[wasm_bindgen]
pub struct DustWorld {
    raster: TextRasterizer,
    field: ParticleField,
    surface: Surface,
}

#[wasm_bindgen]
impl DustWorld {
    /// Build an engine for a fixed surface size. The host passes the raw
    /// bytes of the display font; surface dimensions are fixed for the
    /// session (viewport resize is a host-side full reload).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, font_data: &[u8]) -> Result<DustWorld, JsError> {
        let raster = TextRasterizer::new(width, height, font_data)?;
        let surface = Surface::new(width, height)?;
        let field = ParticleField::new(width, height, time_seed());
        log::info!("dust world {width}x{height} ready");
        Ok(Self {
            raster,
            field,
            surface,
        })
    }

    /// Rasterize new text and replace the whole particle batch.
    /// Synchronous; called from the host's input handler on every change.
    pub fn set_text(&mut self, text: &str) {
        let seeds = self.raster.render(text);
        self.field.repopulate(&seeds);
    }

    /// Update the shared pointer position, in surface coordinates
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.field.set_pointer(x, y);
    }

    /// One animation frame: update every particle, then redraw the
    /// framebuffer from scratch
    pub fn tick(&mut self) {
        self.field.update();
        self.surface.clear();
        self.surface
            .encode_particles(&self.field.particles, self.raster.gap());
    }

    // Accessors for the host
    pub fn frame_ptr(&self) -> *const u8 {
        self.surface.ptr()
    }

    pub fn frame_len(&self) -> usize {
        self.surface.len()
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles.len()
    }

    pub fn text(&self) -> String {
        self.raster.text().to_string()
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }
}

#[cfg(target_arch = "wasm32")]
fn time_seed() -> u32 {
    js_sys::Date::now() as u64 as u32
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u32 {
    0xDEADBEEF
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

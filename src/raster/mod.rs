// raster/ - Text to particle seeds
//
// Shapes the input string with cosmic-text, draws glyph coverage into a
// private scratch RGBA buffer (the visible frame surface never shows the
// glyphs), then samples every covered pixel into a particle seed.

mod gradient;
mod layout;

pub use gradient::Gradient;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Wrap};

use crate::EngineError;

// Extra advance per character / per space, in pixels.
const LETTER_SPACING: f32 = 5.0;
const WORD_SPACING: f32 = 5.0;

// Sampling stride and particle square size.
const DEFAULT_GAP: u32 = 1;

/// One sampled glyph pixel: a particle's fixed origin and color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
}

pub struct TextRasterizer {
    width: u32,
    height: u32,
    font_size: f32,
    line_height: f32,
    max_text_width: f32,
    gap: u32,
    text: String,
    gradient: Gradient,
    family: String,
    font_system: FontSystem,
    swash: SwashCache,
    // Scratch RGBA buffer the glyphs are drawn into and sampled from.
    pixels: Vec<u8>,
}

impl TextRasterizer {
    /// Build a rasterizer for a fixed surface size. `font_data` must hold
    /// at least one parseable ttf/otf face; the first face's family is
    /// used for all shaping. Sizing is computed here once and never again.
    pub fn new(width: u32, height: u32, font_data: &[u8]) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidSurface { width, height });
        }

        let mut db = cosmic_text::fontdb::Database::new();
        db.load_font_data(font_data.to_vec());
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or(EngineError::FontLoad)?;
        let font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);

        let font_size = if width > height {
            width as f32 / 15.0
        } else {
            height as f32 / 16.0
        };

        Ok(Self {
            width,
            height,
            font_size,
            line_height: font_size,
            max_text_width: width as f32 / 3.0 * 2.0,
            gap: DEFAULT_GAP,
            text: String::new(),
            gradient: Gradient::new(width as f32, height as f32),
            family,
            font_system,
            swash: SwashCache::new(),
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    /// Rasterize `text` and return one seed per covered pixel, in raster
    /// order (top-to-bottom, left-to-right) at stride `gap`. Every call
    /// fully replaces the previous result; the empty string yields none.
    pub fn render(&mut self, text: &str) -> Vec<Seed> {
        self.text.clear();
        self.text.push_str(text);
        self.pixels.fill(0);

        let center_x = self.width as f32 / 2.0;
        let center_y = self.height as f32 / 2.0;

        if self.measure(text).round() > self.max_text_width {
            let max_width = self.max_text_width;
            let lines = layout::wrap_text(text, max_width, &mut |s| self.measure(s));
            // Vertical offset counts forced breaks, not lines: a one-break
            // block is centered halfway between its two rows.
            let block_height = (lines.len() - 1) as f32 * self.line_height;
            for (i, line) in lines.iter().enumerate() {
                let y = center_y - block_height / 2.0 + i as f32 * self.line_height;
                self.draw_line(line, center_x, y);
            }
        } else {
            self.draw_line(text, center_x, center_y);
        }

        let seeds = sample_pixels(&self.pixels, self.width, self.height, self.gap);
        log::debug!("rasterized {:?} into {} seeds", text, seeds.len());
        seeds
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shaped width of a single line plus the fixed spacing advances.
    fn measure(&mut self, line: &str) -> f32 {
        if line.is_empty() {
            return 0.0;
        }
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics::new(self.font_size, self.line_height),
        );
        buffer.set_wrap(&mut self.font_system, Wrap::None);
        buffer.set_text(
            &mut self.font_system,
            line,
            Attrs::new().family(Family::Name(&self.family)),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let natural = buffer
            .layout_runs()
            .next()
            .map(|run| run.line_w)
            .unwrap_or(0.0);
        natural + spacing_extra(line)
    }

    /// Draw one line with its horizontal center at `center_x` and its
    /// vertical middle at `target_y`.
    fn draw_line(&mut self, line: &str, center_x: f32, target_y: f32) {
        if line.is_empty() {
            return;
        }
        let metrics = Metrics::new(self.font_size, self.line_height);
        let Self {
            width,
            height,
            line_height,
            gradient,
            family,
            font_system,
            swash,
            pixels,
            ..
        } = self;
        let (w, h) = (*width, *height);

        let mut buffer = Buffer::new(font_system, metrics);
        buffer.set_wrap(font_system, Wrap::None);
        buffer.set_text(
            font_system,
            line,
            Attrs::new().family(Family::Name(family.as_str())),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(font_system, false);

        let Some(run) = buffer.layout_runs().next() else {
            return;
        };
        let drawn_width = run.line_w + spacing_extra(line);
        let x_offset = center_x - drawn_width / 2.0;
        // Middle baseline: center the line box on the target row.
        let y_offset = target_y - *line_height / 2.0;
        let line_y = run.line_y;

        for glyph in run.glyphs.iter() {
            let prefix = &line[..glyph.start];
            let advance = LETTER_SPACING * prefix.chars().count() as f32
                + WORD_SPACING * prefix.matches(' ').count() as f32;
            let physical = glyph.physical((x_offset + advance, y_offset), 1.0);

            swash.with_pixels(
                font_system,
                physical.cache_key,
                cosmic_text::Color::rgb(0xFF, 0xFF, 0xFF),
                |px, py, coverage| {
                    let x = physical.x + px;
                    let y = line_y as i32 + physical.y + py;
                    if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                        return;
                    }
                    let alpha = coverage.a();
                    if alpha == 0 {
                        return;
                    }
                    let idx = ((y as u32 * w + x as u32) * 4) as usize;
                    let [r, g, b] = gradient.color_at(x as f32, y as f32);
                    pixels[idx] = r;
                    pixels[idx + 1] = g;
                    pixels[idx + 2] = b;
                    pixels[idx + 3] = pixels[idx + 3].max(alpha);
                },
            );
        }
    }
}

#[inline]
fn spacing_extra(line: &str) -> f32 {
    LETTER_SPACING * line.chars().count() as f32
        + WORD_SPACING * line.matches(' ').count() as f32
}

/// Sample an RGBA buffer at stride `gap`: every pixel with alpha > 0
/// becomes a seed carrying that pixel's opaque RGB.
pub(crate) fn sample_pixels(pixels: &[u8], width: u32, height: u32, gap: u32) -> Vec<Seed> {
    let mut seeds = Vec::new();
    for y in (0..height).step_by(gap as usize) {
        for x in (0..width).step_by(gap as usize) {
            let idx = ((y * width + x) * 4) as usize;
            if pixels[idx + 3] > 0 {
                seeds.push(Seed {
                    x: x as f32,
                    y: y as f32,
                    color: [pixels[idx], pixels[idx + 1], pixels[idx + 2]],
                });
            }
        }
    }
    seeds
}

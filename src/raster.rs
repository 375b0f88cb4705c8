// Software rasterizer: the `Surface` the window host hands to the star field.
// Stars become anti-aliased discs, relations become anti-aliased thick lines.
// Everything is alpha-blended in linear light (see gamma.rs).

use crate::config::Color;
use crate::gamma::{GammaLut, pack_rgb};
use crate::surface::Surface;
use crate::types::FrameBuffer;

pub struct Canvas<'a> {
    fb: &'a mut FrameBuffer,
    lut: &'a GammaLut,
}

impl<'a> Canvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer, lut: &'a GammaLut) -> Self {
        Self { fb, lut }
    }

    /// Blend one pixel; anything outside the buffer is ignored.
    #[inline]
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, a: f32) {
        if x >= self.fb.width || y >= self.fb.height {
            return;
        }
        let idx = y * self.fb.width + x;
        self.fb.pixels[idx] = self.lut.blend(self.fb.pixels[idx], color, a);
    }
}

/// Pixel index range covering [lo, hi), clipped to [0, limit).
fn span(lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
    let start = lo.floor().clamp(0.0, limit as f32) as usize;
    let end = hi.ceil().clamp(0.0, limit as f32) as usize;
    start..end
}

/// Distance from (px, py) to the segment (x1, y1)-(x2, y2).
fn segment_distance(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let (vx, vy) = (x2 - x1, y2 - y1);
    let len2 = vx * vx + vy * vy;
    let t = if len2 > 0.0 { (((px - x1) * vx + (py - y1) * vy) / len2).clamp(0.0, 1.0) } else { 0.0 };
    (px - (x1 + t * vx)).hypot(py - (y1 + t * vy))
}

impl Surface for Canvas<'_> {
    fn fill_background(&mut self, color: Color) {
        self.fb.pixels.fill(pack_rgb(color));
    }

    fn draw_filled_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 || color[3] == 0 {
            return;
        }
        let opacity = f32::from(color[3]) / 255.0;
        let rows = span(cy - radius - 1.0, cy + radius + 1.0, self.fb.height);
        let cols = span(cx - radius - 1.0, cx + radius + 1.0, self.fb.width);

        for y in rows {
            for x in cols.clone() {
                let dist = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
                // 1px soft edge
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, opacity * coverage);
                }
            }
        }
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, stroke_width: f32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let opacity = f32::from(alpha) / 255.0;
        // Zero width means hairline.
        let half = stroke_width.max(1.0) / 2.0;
        let pad = half + 1.0;
        let rows = span(y1.min(y2) - pad, y1.max(y2) + pad, self.fb.height);
        let cols = span(x1.min(x2) - pad, x1.max(x2) + pad, self.fb.width);

        for y in rows {
            for x in cols.clone() {
                let dist = segment_distance(x as f32 + 0.5, y as f32 + 0.5, x1, y1, x2, y2);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, opacity * coverage);
                }
            }
        }
    }
}

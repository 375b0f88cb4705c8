// The drawing interface the star field renders through.
// The window host implements it over a pixel buffer (see raster.rs);
// tests implement it with a call recorder.

use crate::config::Color;

pub trait Surface {
    /// Cover the whole surface with `color`.
    fn fill_background(&mut self, color: Color);

    /// Filled disc centered at (x, y). Uses the color's own alpha.
    fn draw_filled_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    /// Stroke from (x1, y1) to (x2, y2). `alpha` replaces the color's alpha channel.
    #[allow(clippy::too_many_arguments)]
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, stroke_width: f32, alpha: u8);
}

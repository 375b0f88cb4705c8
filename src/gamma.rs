// Gamma-correct alpha blending with table lookups instead of powf.
// Faint relation lines blended in sRGB space look too dark at their tails;
// mixing in linear light keeps the fade even.

use crate::config::Color;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), quantized to 4096 steps
    to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    fn mix_channel(&self, dst: u8, src: u8, a: f32) -> u8 {
        let l = self.to_linear[dst as usize] * (1.0 - a) + self.to_linear[src as usize] * a;
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.to_srgb[idx]
    }

    /// Lay `src` over the packed 0x00RRGGBB pixel `dst` with opacity `a` in [0,1].
    #[inline]
    pub fn blend(&self, dst: u32, src: Color, a: f32) -> u32 {
        let a = a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return dst;
        }
        if a >= 1.0 {
            return pack_rgb(src);
        }
        let r = self.mix_channel(((dst >> 16) & 0xFF) as u8, src[0], a);
        let g = self.mix_channel(((dst >> 8) & 0xFF) as u8, src[1], a);
        let b = self.mix_channel((dst & 0xFF) as u8, src[2], a);
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack a color into minifb's 0x00RRGGBB, dropping alpha.
#[inline]
pub fn pack_rgb(c: Color) -> u32 {
    (u32::from(c[0]) << 16) | (u32::from(c[1]) << 8) | u32::from(c[2])
}

//! The star field simulation.
//!
//! DESIGN
//! ======
//! `StarField` owns every star, including the optional finger star that
//! follows the pointer. One call to `on_render_tick` is one frame: clear all
//! connection sets, then for each star move it, draw it and scan every other
//! star for proximity, drawing each new connection as soon as it is found.
//!
//! Stars are identified by index within a frame. The finger star is always
//! the last element while it exists: it is appended on press, nothing else
//! appends, and regeneration drops the finger reference.
//!
//! TRADE-OFFS
//! ==========
//! The proximity scan is O(n²). At a few dozen stars that is a few thousand
//! comparisons per frame; counts in the hundreds would want a spatial grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, ZodiacConfig};
use crate::input::PointerEvent;
use crate::surface::Surface;

/// Opacity is full at distance 0 and reaches zero at this multiple of the threshold.
const FADE_REACH: f32 = 1.4;

// =============================================================================
// STAR
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
    /// Radius in pixels.
    pub size: f32,
    /// Indices of stars this one connected to in the current frame.
    connections: Vec<usize>,
}

impl Star {
    #[must_use]
    pub fn new(x: f32, y: f32, dir_x: f32, dir_y: f32, size: f32) -> Self {
        Self { x, y, dir_x, dir_y, size, connections: Vec::new() }
    }

    #[must_use]
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }
}

/// Counts from one frame, for the host's periodic log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub stars: usize,
    pub connections: usize,
}

// =============================================================================
// MOTION + OPACITY
// =============================================================================

/// Advance `star` one tick, then re-aim at most one axis if it crossed an edge.
///
/// The edge checks are a single ordered chain: bottom, top, right, left. Near a
/// corner only the first matching edge is corrected this tick.
pub fn move_star<R: Rng + ?Sized>(star: &mut Star, speed: f32, width: f32, height: f32, rng: &mut R) {
    star.x += star.dir_x * speed;
    star.y += star.dir_y * speed;

    if star.y + star.size > height {
        star.dir_y = rng.random_range(-1.0..0.0);
    } else if star.y - star.size < 0.0 {
        star.dir_y = rng.random_range(0.0..1.0);
    } else if star.x + star.size > width {
        star.dir_x = rng.random_range(-1.0..0.0);
    } else if star.x - star.size < 0.0 {
        star.dir_x = rng.random_range(0.0..1.0);
    }
}

/// Line alpha for two stars `euclid` pixels apart, given the connection threshold.
#[must_use]
pub fn relation_alpha(euclid: f32, threshold: f32) -> u8 {
    let opacity = ((FADE_REACH - euclid / threshold) * 255.0).round();
    opacity.clamp(0.0, 255.0) as u8
}

// =============================================================================
// STAR FIELD
// =============================================================================

pub struct StarField {
    config: ZodiacConfig,
    width: f32,
    height: f32,
    stars: Vec<Star>,
    /// Index of the pointer-controlled star in `stars`.
    finger: Option<usize>,
    rng: StdRng,
}

impl StarField {
    /// Build an empty field. Stars appear on the first `on_surface_size`.
    pub fn new(config: ZodiacConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { config, width: 0.0, height: 0.0, stars: Vec::new(), finger: None, rng })
    }

    #[must_use]
    pub fn config(&self) -> &ZodiacConfig {
        &self.config
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[must_use]
    pub fn finger(&self) -> Option<&Star> {
        self.finger.map(|idx| &self.stars[idx])
    }

    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// New surface dimensions: record them and regenerate every star.
    pub fn on_surface_size(&mut self, width: usize, height: usize) {
        self.width = width as f32;
        self.height = height as f32;
        self.regenerate();
    }

    /// Replace all stars (finger star included) with a fresh random set.
    pub fn regenerate(&mut self) {
        if self.finger.take().is_some() {
            tracing::debug!("finger star discarded by regeneration");
        }
        self.create_stars(self.config.star_count);
        tracing::debug!(count = self.stars.len(), width = self.width, height = self.height, "stars regenerated");
    }

    fn create_stars(&mut self, count: usize) {
        self.stars.clear();
        self.stars.reserve(count);
        for _ in 0..count {
            let star = self.create_star();
            self.stars.push(star);
        }
    }

    /// A random star inside the current bounds. Does not add it to the field.
    pub fn create_star(&mut self) -> Star {
        let rng = &mut self.rng;
        let x = if self.width > 0.0 { rng.random_range(0.0..self.width) } else { 0.0 };
        let y = if self.height > 0.0 { rng.random_range(0.0..self.height) } else { 0.0 };
        let dir_x = rng.random_range(-0.5..0.5);
        let dir_y = rng.random_range(-0.5..0.5);
        let (min, max) = (self.config.star_size_min, self.config.star_size_max);
        let size = if max > min { rng.random_range(min..max) } else { min };
        Star::new(x, y, dir_x, dir_y, size)
    }

    /// Simulate and draw one frame.
    pub fn on_render_tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickStats {
        surface.fill_background(self.config.color_background);

        for star in &mut self.stars {
            star.connections.clear();
        }

        let threshold = self.config.distance;
        let count = self.stars.len();
        let mut connections = 0;

        for i in 0..count {
            move_star(&mut self.stars[i], self.config.speed, self.width, self.height, &mut self.rng);

            let star = &self.stars[i];
            surface.draw_filled_circle(star.x, star.y, star.size, self.config.color_star);

            for j in 0..count {
                if i == j || self.stars[j].connections.contains(&i) {
                    continue;
                }

                let (a, b) = (&self.stars[i], &self.stars[j]);
                let dx = (a.x - b.x).abs();
                let dy = (a.y - b.y).abs();
                if dx < threshold && dy < threshold {
                    let alpha = relation_alpha(dx.hypot(dy), threshold);
                    surface.draw_line(
                        a.x,
                        a.y,
                        b.x,
                        b.y,
                        self.config.color_relation,
                        self.config.relation_size,
                        alpha,
                    );
                    self.stars[i].connections.push(j);
                    connections += 1;
                }
            }
        }

        TickStats { stars: count, connections }
    }

    // -------------------------------------------------------------------------
    // Pointer
    // -------------------------------------------------------------------------

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { x, y } => self.on_pointer_press(x, y),
            PointerEvent::Move { x, y } => self.on_pointer_move(x, y),
            PointerEvent::Release => self.on_pointer_release(),
        }
    }

    /// Spawn a finger star at (x, y). A second press replaces the first finger star.
    pub fn on_pointer_press(&mut self, x: f32, y: f32) {
        if !self.config.interaction_enabled {
            return;
        }
        if let Some(idx) = self.finger.take() {
            self.stars.remove(idx);
            tracing::debug!("finger star replaced by new press");
        }

        let mut star = self.create_star();
        star.x = x;
        star.y = y;
        self.stars.push(star);
        self.finger = Some(self.stars.len() - 1);
        tracing::debug!(x, y, "finger star pressed");
    }

    /// Pin the finger star to (x, y). No-op without an active finger star.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !self.config.interaction_enabled {
            return;
        }
        if let Some(idx) = self.finger {
            let star = &mut self.stars[idx];
            star.x = x;
            star.y = y;
        }
    }

    pub fn on_pointer_release(&mut self) {
        if !self.config.interaction_enabled {
            return;
        }
        if let Some(idx) = self.finger.take() {
            self.stars.remove(idx);
            tracing::debug!("finger star released");
        }
    }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;

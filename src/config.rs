//! Star field configuration.
//!
//! Three sources, all ending in the same validated `ZodiacConfig`:
//! - `ZodiacConfig::default()`: the stock look (30 violet stars on a dark background);
//! - `ZodiacConfig::builder()`: fluent setters, checked in `build()`;
//! - `ZodiacConfig::from_env()`: `ZODIAC_*` variables over the defaults.
//!
//! Bad values are rejected here so the draw path never sees undefined geometry.

use std::str::FromStr;

use image::Rgba;

/// Opaque RGBA color used for background, stars and relation lines.
pub type Color = Rgba<u8>;

const DEFAULT_STAR_COUNT: usize = 30;
const DEFAULT_STAR_SIZE_MIN: f32 = 10.0;
const DEFAULT_STAR_SIZE_MAX: f32 = 20.0;
const DEFAULT_RELATION_SIZE: f32 = 5.0;
const DEFAULT_SPEED: f32 = 0.7;
const DEFAULT_DISTANCE: f32 = 200.0;
const DEFAULT_COLOR_BACKGROUND: Color = Rgba([0x16, 0x15, 0x1f, 0xff]);
const DEFAULT_COLOR_STAR: Color = Rgba([0x49, 0x34, 0x8b, 0xff]);
const DEFAULT_COLOR_RELATION: Color = Rgba([0x49, 0x34, 0x8b, 0xff]);

const DEFAULT_WINDOW_WIDTH: usize = 800;
const DEFAULT_WINDOW_HEIGHT: usize = 600;
const DEFAULT_TARGET_FPS: usize = 60;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("star size range is inverted (min {min} > max {max})")]
    StarSizeRange { min: f32, max: f32 },
    #[error("star size must be a non-negative number, got {0}")]
    InvalidStarSize(f32),
    #[error("relation stroke width must be a non-negative number, got {0}")]
    InvalidRelationSize(f32),
    #[error("connection distance must be positive, got {0}")]
    InvalidDistance(f32),
    #[error("speed must be a finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("invalid color {0:?} (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// STAR FIELD CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ZodiacConfig {
    /// Ambient stars created on every resize (the finger star is extra).
    pub star_count: usize,
    pub star_size_min: f32,
    pub star_size_max: f32,
    /// Stroke width of connection lines.
    pub relation_size: f32,
    /// Per-tick scalar applied to both direction components.
    pub speed: f32,
    /// Box threshold for connecting two stars; also scales line opacity.
    pub distance: f32,
    pub color_background: Color,
    pub color_star: Color,
    pub color_relation: Color,
    pub interaction_enabled: bool,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ZodiacConfig {
    fn default() -> Self {
        Self {
            star_count: DEFAULT_STAR_COUNT,
            star_size_min: DEFAULT_STAR_SIZE_MIN,
            star_size_max: DEFAULT_STAR_SIZE_MAX,
            relation_size: DEFAULT_RELATION_SIZE,
            speed: DEFAULT_SPEED,
            distance: DEFAULT_DISTANCE,
            color_background: DEFAULT_COLOR_BACKGROUND,
            color_star: DEFAULT_COLOR_STAR,
            color_relation: DEFAULT_COLOR_RELATION,
            interaction_enabled: false,
            seed: None,
        }
    }
}

impl ZodiacConfig {
    #[must_use]
    pub fn builder() -> ZodiacBuilder {
        ZodiacBuilder { config: Self::default() }
    }

    /// Load from `ZODIAC_*` environment variables; unset ones keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but reads through `lookup` instead of the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut c = Self::default();
        if let Some(v) = parse_var(&lookup, "ZODIAC_STAR_COUNT")? {
            c.star_count = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_STAR_SIZE_MIN")? {
            c.star_size_min = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_STAR_SIZE_MAX")? {
            c.star_size_max = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_RELATION_SIZE")? {
            c.relation_size = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_SPEED")? {
            c.speed = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_DISTANCE")? {
            c.distance = v;
        }
        if let Some(v) = lookup("ZODIAC_COLOR_BACKGROUND") {
            c.color_background = parse_hex_color(&v)?;
        }
        if let Some(v) = lookup("ZODIAC_COLOR_STAR") {
            c.color_star = parse_hex_color(&v)?;
        }
        if let Some(v) = lookup("ZODIAC_COLOR_RELATION") {
            c.color_relation = parse_hex_color(&v)?;
        }
        if let Some(v) = lookup("ZODIAC_INTERACTION_ENABLED") {
            c.interaction_enabled = parse_bool("ZODIAC_INTERACTION_ENABLED", &v)?;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_SEED")? {
            c.seed = Some(v);
        }
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for size in [self.star_size_min, self.star_size_max] {
            if !size.is_finite() || size < 0.0 {
                return Err(ConfigError::InvalidStarSize(size));
            }
        }
        if self.star_size_min > self.star_size_max {
            return Err(ConfigError::StarSizeRange { min: self.star_size_min, max: self.star_size_max });
        }
        if !self.relation_size.is_finite() || self.relation_size < 0.0 {
            return Err(ConfigError::InvalidRelationSize(self.relation_size));
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(ConfigError::InvalidDistance(self.distance));
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Fluent setters over the defaults. Nothing is checked until `build()`.
#[derive(Debug, Clone)]
pub struct ZodiacBuilder {
    config: ZodiacConfig,
}

impl ZodiacBuilder {
    pub fn build(self) -> Result<ZodiacConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    #[must_use]
    pub fn star_count(mut self, count: usize) -> Self {
        self.config.star_count = count;
        self
    }

    #[must_use]
    pub fn star_size_min(mut self, size: f32) -> Self {
        self.config.star_size_min = size;
        self
    }

    #[must_use]
    pub fn star_size_max(mut self, size: f32) -> Self {
        self.config.star_size_max = size;
        self
    }

    #[must_use]
    pub fn relation_size(mut self, size: f32) -> Self {
        self.config.relation_size = size;
        self
    }

    #[must_use]
    pub fn speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    #[must_use]
    pub fn distance(mut self, distance: f32) -> Self {
        self.config.distance = distance;
        self
    }

    #[must_use]
    pub fn color_background(mut self, color: Color) -> Self {
        self.config.color_background = color;
        self
    }

    #[must_use]
    pub fn color_star(mut self, color: Color) -> Self {
        self.config.color_star = color;
        self
    }

    #[must_use]
    pub fn color_relation(mut self, color: Color) -> Self {
        self.config.color_relation = color;
        self
    }

    #[must_use]
    pub fn interaction_enabled(mut self, enabled: bool) -> Self {
        self.config.interaction_enabled = enabled;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }
}

// =============================================================================
// HOST WINDOW CONFIG
// =============================================================================

/// Window settings for the desktop host. Not seen by the star field.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub width: usize,
    pub height: usize,
    /// Host-side frame limiter; 0 means unlimited.
    pub target_fps: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WINDOW_WIDTH, height: DEFAULT_WINDOW_HEIGHT, target_fps: DEFAULT_TARGET_FPS }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut c = Self::default();
        if let Some(v) = parse_var(&lookup, "ZODIAC_WIDTH")? {
            c.width = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_HEIGHT")? {
            c.height = v;
        }
        if let Some(v) = parse_var(&lookup, "ZODIAC_TARGET_FPS")? {
            c.target_fps = v;
        }
        Ok(c)
    }
}

// =============================================================================
// PARSING HELPERS
// =============================================================================

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key.to_owned(), value: raw }),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key: key.to_owned(), value: raw.to_owned() }),
    }
}

/// Parse `#RRGGBB` (opaque) or `#AARRGGBB` (alpha first).
pub fn parse_hex_color(raw: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor(raw.to_owned());
    let hex = raw.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    let [a, r, g, b] = value.to_be_bytes();
    match hex.len() {
        6 => Ok(Rgba([r, g, b, 0xff])),
        8 => Ok(Rgba([r, g, b, a])),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

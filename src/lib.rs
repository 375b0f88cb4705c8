//! Animated constellation star field.
//!
//! `field::StarField` is the simulation: it owns the stars, moves them each
//! tick and links the ones that come close. It draws through the
//! `surface::Surface` trait, so any host with circles and lines can show it.
//! `raster::Canvas` is the software implementation the bundled window uses.

pub mod config;
pub mod draw;
pub mod error;
pub mod field;
pub mod gamma;
pub mod input;
pub mod raster;
pub mod surface;
pub mod types;

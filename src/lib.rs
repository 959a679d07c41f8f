//! Astrodynamics perturbation force models.
//!
//! Drag, solar radiation pressure, third-body gravity and the supporting
//! pieces (celestial bodies, low-precision ephemerides, shadow geometry,
//! atmosphere density, Earth orientation) needed to evaluate them from a
//! spacecraft state.

pub mod bodies;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod integrators;
pub mod models;
pub mod physics;

pub use errors::ForceModelError;

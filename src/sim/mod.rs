//! Orbital simulation module
//!
//! Pure state and math, no rendering or platform dependencies:
//! - Orbit geometry on rotated ellipses
//! - Body and sun state built from a fact sheet
//! - Variable timestep integrator driven by animation frames

pub mod orbit;
pub mod state;
pub mod tick;

pub use orbit::Orbit;
pub use state::{BodyId, CelestialBody, Decoration, SolarSystem, Sun};
pub use tick::{FrameClock, TickInput, tick};

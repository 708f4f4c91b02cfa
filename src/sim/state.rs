//! Solar system state and body types
//!
//! Built once from a validated fact sheet; afterwards only body angles and
//! the pause flag change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::orbit::Orbit;
use crate::config::SystemConfig;
use crate::consts::TICKS_PER_SECOND;
use crate::error::ConfigError;
use crate::normalize_degrees;

/// Index of a body in declaration order
pub type BodyId = usize;

/// Body-specific cosmetic drawn on top of the base disc
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// Flat fill
    #[default]
    Plain,
    /// Radial gradient from a highlight colour (upper-left) to the body colour
    Shaded { highlight: String },
    /// Tilted ring ellipse
    Ringed,
    /// Glowing atmosphere ring just outside the disc
    Halo,
}

/// A planet moving along its orbit
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub orbit: Orbit,
    /// Disc radius (pixels at scale 1)
    pub size: f32,
    pub color: String,
    /// Degrees per 60 fps tick on the major axis
    pub base_speed: f32,
    pub decoration: Decoration,
    pub facts: Vec<String>,
    /// Current anomaly (degrees, always in [0, 360))
    angle: f32,
}

impl CelestialBody {
    pub fn new(
        name: impl Into<String>,
        orbit: Orbit,
        size: f32,
        color: impl Into<String>,
        base_speed: f32,
    ) -> Self {
        Self {
            name: name.into(),
            orbit,
            size,
            color: color.into(),
            base_speed,
            decoration: Decoration::Plain,
            facts: Vec::new(),
            angle: 0.0,
        }
    }

    /// Current anomaly in degrees
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Place the body at `angle` (wrapped into [0, 360))
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_degrees(angle);
    }

    /// Advance along the orbit for `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let speed_mod = self.orbit.speed_modifier(self.angle);
        self.set_angle(self.angle + self.base_speed * speed_mod * dt * TICKS_PER_SECOND);
    }

    /// Screen position around `origin` at display `scale`
    pub fn position(&self, origin: Vec2, scale: f32) -> Vec2 {
        self.orbit.position(self.angle, origin, scale)
    }
}

/// The fixed central star
#[derive(Debug, Clone)]
pub struct Sun {
    pub name: String,
    /// Disc radius (pixels at scale 1)
    pub radius: f32,
    pub color: String,
    pub facts: Vec<String>,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub sun: Sun,
    /// Orbiting bodies in declaration order (hit-test priority)
    pub bodies: Vec<CelestialBody>,
    /// Freezes autonomous motion (dragging still works)
    pub paused: bool,
    /// Canvas size the fact sheet was laid out for, if it scales
    pub reference_size: Option<f32>,
}

impl SolarSystem {
    /// Build the system from a fact sheet, validating it first
    pub fn from_config(config: &SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bodies = config
            .bodies
            .iter()
            .map(|b| {
                let mut body = CelestialBody::new(
                    b.name.clone(),
                    Orbit::new(b.a, b.e, b.orbit_rotation),
                    b.size,
                    b.color.clone(),
                    b.base_speed,
                );
                body.decoration = b.decoration.clone();
                body.facts = b.facts.clone();
                body.set_angle(b.angle);
                body
            })
            .collect();

        Ok(Self {
            sun: Sun {
                name: config.sun.name.clone(),
                radius: config.sun.radius,
                color: config.sun.color.clone(),
                facts: config.sun.facts.clone(),
            },
            bodies,
            paused: false,
            reference_size: config.reference_size,
        })
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id)
    }

    /// Flip the pause flag, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Orrery {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }
}

//! Body fact sheets
//!
//! A fact sheet is the only data the orrery consumes: the sun, the ordered
//! list of orbiting bodies and their facts. Two sheets are bundled; any other
//! JSON document with the same shape can be loaded with
//! [`SystemConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Decoration;

/// Bundled fact sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FactSheet {
    /// Textbook facts, fixed pixel layout
    #[default]
    Detailed,
    /// Simpler wording, layout scales with the canvas
    Kids,
}

impl FactSheet {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactSheet::Detailed => "detailed",
            FactSheet::Kids => "kids",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "detailed" | "educational" => Some(FactSheet::Detailed),
            "kids" | "simple" => Some(FactSheet::Kids),
            _ => None,
        }
    }

    fn source(&self) -> &'static str {
        match self {
            FactSheet::Detailed => include_str!("../data/detailed.json"),
            FactSheet::Kids => include_str!("../data/kids.json"),
        }
    }
}

/// The central star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunConfig {
    pub name: String,
    pub radius: f32,
    pub color: String,
    #[serde(default)]
    pub facts: Vec<String>,
}

/// One orbiting body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    pub name: String,
    /// Semi-major axis (pixels at scale 1)
    pub a: f32,
    /// Eccentricity
    pub e: f32,
    /// Disc radius (pixels at scale 1)
    pub size: f32,
    pub color: String,
    /// Degrees per 60 fps tick on the major axis
    pub base_speed: f32,
    /// Ellipse rotation (degrees)
    #[serde(default)]
    pub orbit_rotation: f32,
    /// Starting anomaly (degrees)
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub decoration: Decoration,
    #[serde(default)]
    pub facts: Vec<String>,
}

/// A complete fact sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub sun: SunConfig,
    pub bodies: Vec<BodyConfig>,
    /// When set, sizes are multiplied by `min(width, height) / reference_size`
    #[serde(default)]
    pub reference_size: Option<f32>,
}

impl SystemConfig {
    /// Parse and validate a fact sheet
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SystemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load one of the bundled fact sheets
    pub fn bundled(sheet: FactSheet) -> Result<Self, ConfigError> {
        let config = Self::from_json(sheet.source())?;
        log::info!(
            "Loaded {} fact sheet ({} bodies)",
            sheet.as_str(),
            config.bodies.len()
        );
        Ok(config)
    }

    /// Reject anything that would put NaN or a degenerate ellipse on screen
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(&self.sun.name, "radius", self.sun.radius)?;
        if let Some(size) = self.reference_size {
            positive("referenceSize", "value", size)?;
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        for body in &self.bodies {
            positive(&body.name, "a", body.a)?;
            positive(&body.name, "size", body.size)?;
            if !(0.0..1.0).contains(&body.e) {
                return Err(ConfigError::Eccentricity {
                    body: body.name.clone(),
                    value: body.e,
                });
            }
            finite(&body.name, "baseSpeed", body.base_speed)?;
            finite(&body.name, "orbitRotation", body.orbit_rotation)?;
            finite(&body.name, "angle", body.angle)?;
        }
        Ok(())
    }
}

fn positive(body: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            body: body.to_string(),
            field,
            value,
        })
    }
}

fn finite(body: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            body: body.to_string(),
            field,
            value,
        })
    }
}

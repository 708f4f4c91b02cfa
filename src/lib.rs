//! Space Explorer - an interactive solar system orrery
//!
//! Core modules:
//! - `sim`: Orbit geometry, bodies, and the Kepler-style motion integrator
//! - `view`: Canvas viewport, projection and display scaling
//! - `interaction`: Pointer/touch controller (hit tests, drag, info overlay)
//! - `renderer`: 2D canvas drawing through the `Surface` trait
//! - `config`: Body fact sheets (JSON) and validation
//! - `settings`: Runtime settings and input modality presets

pub mod config;
pub mod error;
pub mod interaction;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use config::{FactSheet, SystemConfig};
pub use error::{ConfigError, InitError};
pub use interaction::{InfoCard, InteractionController, OverlayCommand, Target};
pub use settings::{InfoAnchor, InputModality, InteractionSettings, Settings};
pub use view::Viewport;

/// Orrery configuration constants
pub mod consts {
    /// Angular speeds in the fact sheets are "degrees per tick at 60 fps"
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Largest frame delta the integrator accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Extra pick radius around bodies and the sun (pixels)
    pub const HIT_MARGIN: f32 = 5.0;
    /// Offset of the info overlay from the pointer (pixels)
    pub const INFO_OFFSET: f32 = 15.0;

    /// Orbit ellipse stroke
    pub const ORBIT_COLOR: &str = "rgba(255,255,255,0.15)";
    pub const ORBIT_LINE_WIDTH: f32 = 1.0;

    /// Glow around the sun and bodies
    pub const SUN_GLOW_BLUR: f32 = 20.0;
    pub const BODY_GLOW_BLUR: f32 = 10.0;

    /// Saturn-style ring overlay
    pub const RING_COLOR: &str = "rgba(210, 180, 140, 0.6)";
    pub const RING_TILT_DEG: f32 = 20.0;
    pub const RING_RADII: (f32, f32) = (1.8, 0.7);

    /// Earth-style atmosphere halo
    pub const HALO_COLOR: &str = "rgba(100, 150, 255, 0.6)";
    pub const HALO_GLOW: &str = "rgba(100, 150, 255, 0.7)";
    pub const HALO_GAP: f32 = 3.0;

    /// Shared stroke width for rings and halos
    pub const DECORATION_LINE_WIDTH: f32 = 3.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed angular difference in degrees, in (-180, 180]
#[inline]
pub fn wrap_delta_degrees(delta: f32) -> f32 {
    let wrapped = normalize_degrees(delta);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-1e-9), 0.0);
    }

    #[test]
    fn test_wrap_delta_degrees() {
        assert_eq!(wrap_delta_degrees(370.0), 10.0);
        assert_eq!(wrap_delta_degrees(190.0), -170.0);
        assert_eq!(wrap_delta_degrees(-190.0), 170.0);
        // Half turn resolves to the positive side
        assert_eq!(wrap_delta_degrees(180.0), 180.0);
        assert_eq!(wrap_delta_degrees(-180.0), 180.0);
    }
}

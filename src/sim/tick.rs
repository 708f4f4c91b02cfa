//! Variable timestep motion integrator
//!
//! Each animation frame advances every free body by its own Kepler-like
//! angular speed, scaled by the real time elapsed since the previous frame.

use super::state::{BodyId, SolarSystem};
use crate::consts::MAX_FRAME_DT;

/// Per-frame input to the integrator
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Body currently held by the pointer (frozen this frame)
    pub held: Option<BodyId>,
}

/// Advance the orbits by `dt` seconds
pub fn tick(system: &mut SolarSystem, input: &TickInput, dt: f32) {
    if system.paused || dt <= 0.0 {
        return;
    }

    for (id, body) in system.bodies.iter_mut().enumerate() {
        if input.held == Some(id) {
            continue;
        }
        body.advance(dt);
    }
}

/// Converts animation-frame timestamps into integrator deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`.
    /// The first frame has no predecessor and yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

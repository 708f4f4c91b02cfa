//! Canvas viewport and projection
//!
//! The sun sits at the canvas center. Fact sheets with a reference size are
//! laid out for a `reference × reference` canvas and scale uniformly with the
//! smaller canvas dimension; other sheets are drawn at their pixel sizes.

use glam::Vec2;

use crate::sim::{CelestialBody, SolarSystem, Sun};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    reference_size: Option<f32>,
}

impl Viewport {
    pub fn new(width: f32, height: f32, reference_size: Option<f32>) -> Self {
        Self {
            width,
            height,
            reference_size,
        }
    }

    /// Viewport for `system`'s layout at the given canvas size
    pub fn for_system(system: &SolarSystem, width: f32, height: f32) -> Self {
        Self::new(width, height, system.reference_size)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        log::info!("Viewport resized to {}x{} (scale {:.3})", width, height, self.scale());
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Multiplier applied to every orbit and disc size
    pub fn scale(&self) -> f32 {
        match self.reference_size {
            Some(reference) => self.width.min(self.height) / reference,
            None => 1.0,
        }
    }

    /// Canvas position of a body
    pub fn body_position(&self, body: &CelestialBody) -> Vec2 {
        body.position(self.center(), self.scale())
    }

    /// Drawn disc radius of a body
    pub fn body_radius(&self, body: &CelestialBody) -> f32 {
        body.size * self.scale()
    }

    /// Drawn disc radius of the sun
    pub fn sun_radius(&self, sun: &Sun) -> f32 {
        sun.radius * self.scale()
    }

    /// Convert client (page) coordinates to canvas-local coordinates given
    /// the canvas bounding rectangle origin.
    pub fn to_local(client: Vec2, rect_origin: Vec2) -> Vec2 {
        client - rect_origin
    }
}

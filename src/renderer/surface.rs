//! Drawing surface abstraction
//!
//! The scene only needs a handful of 2D primitives. The browser implements
//! them on `CanvasRenderingContext2d`; tests record the calls instead.

use glam::Vec2;

/// A colour stop on a gradient, `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop<'a> {
    pub offset: f32,
    pub color: &'a str,
}

/// Fill paint for the current path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint<'a> {
    Solid(&'a str),
    /// Two-circle radial gradient (canvas `createRadialGradient` semantics)
    Radial {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &'a [ColorStop<'a>],
    },
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);

    /// Push the transform and style state
    fn save(&mut self);
    /// Pop the transform and style state
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);

    fn begin_path(&mut self);
    /// Full circle
    fn circle(&mut self, center: Vec2, radius: f32);
    /// Full axis-aligned ellipse (apply rotation with `rotate`)
    fn ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32);

    fn set_fill(&mut self, paint: Paint<'_>);
    fn set_stroke(&mut self, color: &str, width: f32);
    /// Glow behind subsequent fills/strokes; blur 0 turns it off
    fn set_shadow(&mut self, color: &str, blur: f32);

    fn fill(&mut self);
    fn stroke(&mut self);
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use glam::Vec2;
    use web_sys::CanvasRenderingContext2d;

    use super::{Paint, Surface};

    impl Surface for CanvasRenderingContext2d {
        fn clear(&mut self, width: f32, height: f32) {
            self.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn save(&mut self) {
            CanvasRenderingContext2d::save(self);
        }

        fn restore(&mut self) {
            CanvasRenderingContext2d::restore(self);
        }

        fn translate(&mut self, offset: Vec2) {
            let _ = CanvasRenderingContext2d::translate(self, offset.x as f64, offset.y as f64);
        }

        fn rotate(&mut self, radians: f32) {
            let _ = CanvasRenderingContext2d::rotate(self, radians as f64);
        }

        fn begin_path(&mut self) {
            CanvasRenderingContext2d::begin_path(self);
        }

        fn circle(&mut self, center: Vec2, radius: f32) {
            let _ = self.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        }

        fn ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32) {
            let _ = CanvasRenderingContext2d::ellipse(
                self,
                center.x as f64,
                center.y as f64,
                radius_x as f64,
                radius_y as f64,
                0.0,
                0.0,
                TAU,
            );
        }

        fn set_fill(&mut self, paint: Paint<'_>) {
            match paint {
                Paint::Solid(color) => self.set_fill_style_str(color),
                Paint::Radial {
                    inner,
                    inner_radius,
                    outer,
                    outer_radius,
                    stops,
                } => {
                    let gradient = match self.create_radial_gradient(
                        inner.x as f64,
                        inner.y as f64,
                        inner_radius as f64,
                        outer.x as f64,
                        outer.y as f64,
                        outer_radius as f64,
                    ) {
                        Ok(gradient) => gradient,
                        Err(e) => {
                            log::warn!("Radial gradient failed: {:?}", e);
                            return;
                        }
                    };
                    for stop in stops {
                        let _ = gradient.add_color_stop(stop.offset, stop.color);
                    }
                    self.set_fill_style_canvas_gradient(&gradient);
                }
            }
        }

        fn set_stroke(&mut self, color: &str, width: f32) {
            self.set_stroke_style_str(color);
            self.set_line_width(width as f64);
        }

        fn set_shadow(&mut self, color: &str, blur: f32) {
            self.set_shadow_color(color);
            self.set_shadow_blur(blur as f64);
        }

        fn fill(&mut self) {
            CanvasRenderingContext2d::fill(self);
        }

        fn stroke(&mut self) {
            CanvasRenderingContext2d::stroke(self);
        }
    }
}

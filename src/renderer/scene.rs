//! Scene drawing
//!
//! Full redraw every frame: orbits, the sun, then the bodies on top.

use glam::Vec2;

use super::surface::{ColorStop, Paint, Surface};
use crate::consts::*;
use crate::sim::{CelestialBody, Decoration, SolarSystem, Sun};
use crate::view::Viewport;

/// Redraw the whole scene
pub fn render<S: Surface>(surface: &mut S, system: &SolarSystem, view: &Viewport) {
    surface.clear(view.width, view.height);
    draw_orbits(surface, system, view);
    draw_sun(surface, &system.sun, view.center(), view.sun_radius(&system.sun));
    for body in &system.bodies {
        draw_body(surface, body, view.body_position(body), view.body_radius(body));
    }
}

/// Faint orbit ellipses, each in its own rotated frame
pub fn draw_orbits<S: Surface>(surface: &mut S, system: &SolarSystem, view: &Viewport) {
    let scale = view.scale();
    surface.set_stroke(ORBIT_COLOR, ORBIT_LINE_WIDTH);
    for body in &system.bodies {
        surface.save();
        surface.translate(view.center());
        surface.rotate(body.orbit.rotation.to_radians());
        surface.begin_path();
        surface.ellipse(
            Vec2::ZERO,
            body.orbit.semi_major * scale,
            body.orbit.semi_minor() * scale,
        );
        surface.stroke();
        surface.restore();
    }
}

/// The sun with its glow
pub fn draw_sun<S: Surface>(surface: &mut S, sun: &Sun, center: Vec2, radius: f32) {
    surface.begin_path();
    surface.circle(center, radius);
    surface.set_fill(Paint::Solid(&sun.color));
    surface.set_shadow(&sun.color, SUN_GLOW_BLUR);
    surface.fill();
    surface.set_shadow(&sun.color, 0.0);
}

/// One body disc plus its decoration, centered at `pos`
pub fn draw_body<S: Surface>(surface: &mut S, body: &CelestialBody, pos: Vec2, radius: f32) {
    surface.begin_path();
    match &body.decoration {
        Decoration::Shaded { highlight } => {
            let stops = [
                ColorStop {
                    offset: 0.0,
                    color: highlight,
                },
                ColorStop {
                    offset: 1.0,
                    color: &body.color,
                },
            ];
            surface.set_fill(Paint::Radial {
                inner: pos - Vec2::splat(radius / 3.0),
                inner_radius: radius / 5.0,
                outer: pos,
                outer_radius: radius,
                stops: &stops,
            });
        }
        _ => surface.set_fill(Paint::Solid(&body.color)),
    }
    surface.set_shadow(&body.color, BODY_GLOW_BLUR);
    surface.circle(pos, radius);
    surface.fill();
    surface.set_shadow(&body.color, 0.0);

    match body.decoration {
        Decoration::Ringed => draw_ring(surface, pos, radius),
        Decoration::Halo => draw_halo(surface, pos, radius),
        Decoration::Plain | Decoration::Shaded { .. } => {}
    }
}

fn draw_ring<S: Surface>(surface: &mut S, pos: Vec2, radius: f32) {
    surface.save();
    surface.translate(pos);
    surface.rotate(RING_TILT_DEG.to_radians());
    surface.set_stroke(RING_COLOR, DECORATION_LINE_WIDTH);
    surface.begin_path();
    surface.ellipse(Vec2::ZERO, radius * RING_RADII.0, radius * RING_RADII.1);
    surface.stroke();
    surface.restore();
}

fn draw_halo<S: Surface>(surface: &mut S, pos: Vec2, radius: f32) {
    surface.begin_path();
    surface.set_stroke(HALO_COLOR, DECORATION_LINE_WIDTH);
    surface.set_shadow(HALO_GLOW, BODY_GLOW_BLUR);
    surface.circle(pos, radius + HALO_GAP);
    surface.stroke();
    surface.set_shadow(HALO_GLOW, 0.0);
}

/// Legend icon size (square canvas side) and the disc radius drawn on it
pub const LEGEND_ICON_SIZE: f32 = 40.0;
pub const LEGEND_BODY_RADIUS: f32 = 8.0;
pub const LEGEND_SUN_RADIUS: f32 = 12.0;

/// Draw a body centered on a legend icon
pub fn draw_legend_body<S: Surface>(surface: &mut S, body: &CelestialBody) {
    surface.clear(LEGEND_ICON_SIZE, LEGEND_ICON_SIZE);
    draw_body(
        surface,
        body,
        Vec2::splat(LEGEND_ICON_SIZE / 2.0),
        LEGEND_BODY_RADIUS,
    );
}

/// Draw the sun centered on a legend icon (no glow, it would clip)
pub fn draw_legend_sun<S: Surface>(surface: &mut S, sun: &Sun) {
    surface.clear(LEGEND_ICON_SIZE, LEGEND_ICON_SIZE);
    surface.begin_path();
    surface.circle(Vec2::splat(LEGEND_ICON_SIZE / 2.0), LEGEND_SUN_RADIUS);
    surface.set_fill(Paint::Solid(&sun.color));
    surface.fill();
}

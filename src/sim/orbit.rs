//! Rotated ellipse geometry for planetary orbits
//!
//! An orbit is an ellipse centered on the sun, defined by:
//! - semi_major: half the long axis (pixels at scale 1)
//! - eccentricity: 0 for a circle, must stay below 1
//! - rotation: rigid rotation of the whole ellipse (degrees)
//!
//! Positions are parameterized by an anomaly angle θ in degrees:
//! the unrotated point is `(a·cosθ, b·sinθ)`.

use glam::Vec2;

/// A rotated ellipse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Semi-major axis `a`
    pub semi_major: f32,
    /// Eccentricity `e`, in [0, 1)
    pub eccentricity: f32,
    /// Rotation of the ellipse (degrees)
    pub rotation: f32,
}

impl Orbit {
    pub fn new(semi_major: f32, eccentricity: f32, rotation: f32) -> Self {
        Self {
            semi_major,
            eccentricity,
            rotation,
        }
    }

    /// Semi-minor axis `b = a·sqrt(1 - e²)`
    #[inline]
    pub fn semi_minor(&self) -> f32 {
        self.semi_major * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Point on the unrotated ellipse at anomaly `angle` (degrees)
    pub fn local_point(&self, angle: f32) -> Vec2 {
        let theta = angle.to_radians();
        Vec2::new(
            self.semi_major * theta.cos(),
            self.semi_minor() * theta.sin(),
        )
    }

    /// Distance from the ellipse center at anomaly `angle` (degrees)
    ///
    /// Always within `[b, a]`.
    pub fn radial_distance(&self, angle: f32) -> f32 {
        self.local_point(angle).length()
    }

    /// Kepler-like speed factor `(a / r)²`: 1 on the major axis, larger
    /// where the body passes closest to the center.
    pub fn speed_modifier(&self, angle: f32) -> f32 {
        let ratio = self.semi_major / self.radial_distance(angle);
        ratio * ratio
    }

    /// Position on the rotated ellipse around `origin`, with both axes
    /// multiplied by `scale`.
    pub fn position(&self, angle: f32, origin: Vec2, scale: f32) -> Vec2 {
        let local = self.local_point(angle) * scale;
        origin + Vec2::from_angle(self.rotation.to_radians()).rotate(local)
    }

    /// Angle (degrees, in (-180, 180]) of `point` as seen from `origin`,
    /// measured in the orbit's unrotated frame.
    pub fn pointer_angle(&self, point: Vec2, origin: Vec2) -> f32 {
        let local = Vec2::from_angle(-self.rotation.to_radians()).rotate(point - origin);
        local.y.atan2(local.x).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn earth() -> Orbit {
        Orbit::new(140.0, 0.2, 60.0)
    }

    #[test]
    fn test_semi_minor_axis() {
        let orbit = earth();
        assert!((orbit.semi_minor() - 137.171).abs() < 0.01);
        assert_eq!(Orbit::new(100.0, 0.0, 0.0).semi_minor(), 100.0);
    }

    #[test]
    fn test_major_axis_distance_and_speed() {
        let orbit = earth();
        assert!((orbit.radial_distance(0.0) - 140.0).abs() < 1e-4);
        assert!((orbit.speed_modifier(0.0) - 1.0).abs() < 1e-5);
        // On the minor axis the body is closest and fastest
        let b = orbit.semi_minor();
        assert!((orbit.radial_distance(90.0) - b).abs() < 1e-3);
        assert!(orbit.speed_modifier(90.0) > 1.0);
    }

    #[test]
    fn test_position_applies_rotation_and_origin() {
        let orbit = Orbit::new(100.0, 0.0, 90.0);
        let origin = Vec2::new(400.0, 300.0);
        // Anomaly 0 lies on +x before rotation, on +y after a quarter turn
        let p = orbit.position(0.0, origin, 1.0);
        assert!((p - Vec2::new(400.0, 400.0)).length() < 1e-3);

        let half = orbit.position(0.0, origin, 0.5);
        assert!((half - Vec2::new(400.0, 350.0)).length() < 1e-3);
    }

    #[test]
    fn test_pointer_angle_undoes_rotation() {
        let orbit = Orbit::new(100.0, 0.3, 45.0);
        let origin = Vec2::new(10.0, 20.0);
        // A point along the rotated major axis reads as anomaly 0
        let on_axis = origin + Vec2::from_angle(45f32.to_radians()) * 50.0;
        assert!(orbit.pointer_angle(on_axis, origin).abs() < 1e-3);

        let behind = origin - Vec2::from_angle(45f32.to_radians()) * 50.0;
        assert!((orbit.pointer_angle(behind, origin).abs() - 180.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn radial_distance_between_axes(
            a in 1.0f32..1000.0,
            e in 0.0f32..0.99,
            angle in -720.0f32..720.0,
        ) {
            let orbit = Orbit::new(a, e, 0.0);
            let r = orbit.radial_distance(angle);
            let b = orbit.semi_minor();
            let eps = a * 1e-5;
            prop_assert!(r >= b - eps && r <= a + eps, "r={} b={} a={}", r, b, a);
        }

        #[test]
        fn speed_modifier_at_least_one(
            a in 1.0f32..1000.0,
            e in 0.0f32..0.95,
            angle in 0.0f32..360.0,
        ) {
            let orbit = Orbit::new(a, e, 0.0);
            prop_assert!(orbit.speed_modifier(angle) >= 1.0 - 1e-4);
        }
    }
}

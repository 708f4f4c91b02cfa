//! Pointer and touch interaction
//!
//! One controller serves mouse and touch input; the differences live in
//! [`InteractionSettings`]. Coordinates are canvas-local pixels, timestamps
//! are milliseconds from any monotonic-enough clock.
//!
//! States:
//! - Idle: nothing pressed
//! - Pressed: pointer is down; if the press started on a body it is a drag
//!   and the body follows the pointer around its orbit
//! - ShowingInfo: independent flag, set while the overlay is visible

use glam::Vec2;

use crate::consts::{HIT_MARGIN, INFO_OFFSET};
use crate::settings::{InfoAnchor, InteractionSettings};
use crate::sim::{BodyId, SolarSystem};
use crate::view::Viewport;
use crate::wrap_delta_degrees;

/// Something the pointer can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Body(BodyId),
    Sun,
}

/// Contents and placement of the info overlay
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub title: String,
    pub facts: Vec<String>,
    /// Canvas-local position of the overlay's anchor point
    pub anchor: Vec2,
    pub placement: InfoAnchor,
}

/// What the shell should do with the info overlay
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    Show(InfoCard),
    Hide,
}

/// Coarse controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging(BodyId),
}

/// Find what lies under `pos`: bodies in declaration order, then the sun
pub fn hit_test(system: &SolarSystem, view: &Viewport, pos: Vec2) -> Option<Target> {
    for (id, body) in system.bodies.iter().enumerate() {
        let center = view.body_position(body);
        if pos.distance(center) <= view.body_radius(body) + HIT_MARGIN {
            return Some(Target::Body(id));
        }
    }
    if pos.distance(view.center()) <= view.sun_radius(&system.sun) + HIT_MARGIN {
        return Some(Target::Sun);
    }
    None
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    body: BodyId,
    start_angle: f32,
    start_pointer_angle: f32,
    /// Set once the grace period and jitter filter have been passed
    engaged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    down_pos: Vec2,
    down_ms: f64,
    /// Largest distance from `down_pos` seen so far
    travelled: f32,
    drag: Option<Drag>,
}

/// Drag-to-reposition and tap-for-facts controller
#[derive(Debug, Clone)]
pub struct InteractionController {
    settings: InteractionSettings,
    press: Option<Press>,
    /// What the overlay currently shows
    info: Option<Target>,
    last_tap_ms: Option<f64>,
    last_release_ms: Option<f64>,
}

impl InteractionController {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            press: None,
            info: None,
            last_tap_ms: None,
            last_release_ms: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        match self.held_body() {
            Some(body) => InteractionState::Dragging(body),
            None => InteractionState::Idle,
        }
    }

    /// Body under the pointer, frozen for the integrator
    pub fn held_body(&self) -> Option<BodyId> {
        self.press.and_then(|p| p.drag).map(|d| d.body)
    }

    pub fn showing_info(&self) -> bool {
        self.info.is_some()
    }

    /// Target whose facts are on screen
    pub fn info_target(&self) -> Option<Target> {
        self.info
    }

    /// Pointer or touch pressed. Starts a drag when a body is hit.
    pub fn pointer_down(
        &mut self,
        system: &SolarSystem,
        view: &Viewport,
        pos: Vec2,
        now_ms: f64,
    ) -> Option<OverlayCommand> {
        let drag = match hit_test(system, view, pos) {
            Some(Target::Body(id)) => system.body(id).map(|body| {
                log::debug!("Drag start on {} at {:.1}°", body.name, body.angle());
                Drag {
                    body: id,
                    start_angle: body.angle(),
                    start_pointer_angle: body.orbit.pointer_angle(pos, view.center()),
                    engaged: false,
                }
            }),
            _ => None,
        };

        self.press = Some(Press {
            down_pos: pos,
            down_ms: now_ms,
            travelled: 0.0,
            drag,
        });
        None
    }

    /// Pointer or touch moved. Only acts while dragging.
    pub fn pointer_move(
        &mut self,
        system: &mut SolarSystem,
        view: &Viewport,
        pos: Vec2,
        now_ms: f64,
    ) -> Option<OverlayCommand> {
        let press = self.press.as_mut()?;
        press.travelled = press.travelled.max(pos.distance(press.down_pos));
        let drag = press.drag.as_mut()?;

        if !drag.engaged {
            if now_ms - press.down_ms < self.settings.drag_grace_ms
                || press.travelled < self.settings.drag_jitter_px
            {
                return None;
            }
            drag.engaged = true;
        }

        let body = system.body_mut(drag.body)?;
        let pointer_angle = body.orbit.pointer_angle(pos, view.center());
        let delta = wrap_delta_degrees(pointer_angle - drag.start_pointer_angle);
        body.set_angle(drag.start_angle + delta);

        if self.settings.facts_follow_drag {
            let id = drag.body;
            self.info = Some(Target::Body(id));
            return Some(OverlayCommand::Show(self.card(system, view, Target::Body(id), pos)?));
        }
        None
    }

    /// Pointer or touch released. A short, still press is a tap.
    pub fn pointer_up(
        &mut self,
        system: &SolarSystem,
        view: &Viewport,
        pos: Vec2,
        now_ms: f64,
    ) -> Option<OverlayCommand> {
        let press = self.press.take()?;

        let travelled = press.travelled.max(pos.distance(press.down_pos));
        let quick = now_ms - press.down_ms < self.settings.tap_max_ms;
        if quick && travelled < self.settings.tap_slop_px {
            self.last_release_ms = Some(now_ms);
            return self.tap(system, view, pos, now_ms);
        }

        // A slow press off any body is left to the click that follows
        let drag = press.drag?;
        self.last_release_ms = Some(now_ms);
        log::debug!("Drag end on body {}", drag.body);
        self.end_drag_overlay()
    }

    /// Press abandoned (pointer left the canvas, touch cancelled)
    pub fn cancel(&mut self) -> Option<OverlayCommand> {
        let press = self.press.take()?;
        press.drag.and_then(|_| self.end_drag_overlay())
    }

    /// Close the overlay without a tap (keyboard dismissal)
    pub fn dismiss(&mut self) -> Option<OverlayCommand> {
        self.info.take().map(|_| OverlayCommand::Hide)
    }

    /// Click from a device without press/release events. Clicks the
    /// browser synthesizes right after a handled release are ignored.
    pub fn click(
        &mut self,
        system: &SolarSystem,
        view: &Viewport,
        pos: Vec2,
        now_ms: f64,
    ) -> Option<OverlayCommand> {
        if let Some(release) = self.last_release_ms.take() {
            if now_ms - release < self.settings.double_tap_window_ms {
                return None;
            }
        }
        self.tap(system, view, pos, now_ms)
    }

    /// Show facts for whatever is under `pos`, or hide the overlay on a miss
    fn tap(
        &mut self,
        system: &SolarSystem,
        view: &Viewport,
        pos: Vec2,
        now_ms: f64,
    ) -> Option<OverlayCommand> {
        if let Some(last) = self.last_tap_ms {
            if now_ms - last < self.settings.double_tap_window_ms {
                log::debug!("Ignoring double tap");
                return None;
            }
        }
        self.last_tap_ms = Some(now_ms);

        match hit_test(system, view, pos) {
            Some(target) => {
                let card = self.card(system, view, target, pos)?;
                log::debug!("Showing facts for {}", card.title);
                self.info = Some(target);
                Some(OverlayCommand::Show(card))
            }
            None => {
                self.info = None;
                Some(OverlayCommand::Hide)
            }
        }
    }

    fn end_drag_overlay(&mut self) -> Option<OverlayCommand> {
        if self.settings.facts_follow_drag {
            self.info = None;
            Some(OverlayCommand::Hide)
        } else {
            None
        }
    }

    fn card(
        &self,
        system: &SolarSystem,
        view: &Viewport,
        target: Target,
        pos: Vec2,
    ) -> Option<InfoCard> {
        let (title, facts) = match target {
            Target::Body(id) => {
                let body = system.body(id)?;
                (body.name.clone(), body.facts.clone())
            }
            Target::Sun => (system.sun.name.clone(), system.sun.facts.clone()),
        };
        let anchor = match self.settings.info_anchor {
            InfoAnchor::NearPointer => pos + Vec2::splat(INFO_OFFSET),
            InfoAnchor::CanvasCenter => view.center(),
        };
        Some(InfoCard {
            title,
            facts,
            anchor,
            placement: self.settings.info_anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FactSheet, SystemConfig};
    use crate::settings::InputModality;
    use crate::sim::{TickInput, tick};
    use proptest::prelude::*;

    fn setup(modality: InputModality) -> (SolarSystem, Viewport, InteractionController) {
        let config = SystemConfig::bundled(FactSheet::Detailed).unwrap();
        let system = SolarSystem::from_config(&config).unwrap();
        let view = Viewport::for_system(&system, 1000.0, 1000.0);
        let controller = InteractionController::new(InteractionSettings::for_modality(modality));
        (system, view, controller)
    }

    /// Point on `id`'s orbit ray at anomaly-like pointer angle `deg`
    fn pointer_at(system: &SolarSystem, view: &Viewport, id: BodyId, deg: f32) -> Vec2 {
        let orbit = system.bodies[id].orbit;
        let local = Vec2::from_angle(deg.to_radians()) * orbit.semi_major;
        view.center() + Vec2::from_angle(orbit.rotation.to_radians()).rotate(local)
    }

    #[test]
    fn test_hit_test_order_and_sun() {
        let (system, view, _) = setup(InputModality::Pointer);
        let earth = view.body_position(&system.bodies[2]);
        assert_eq!(hit_test(&system, &view, earth), Some(Target::Body(2)));
        // Within size + margin
        let edge = earth + Vec2::new(system.bodies[2].size + HIT_MARGIN - 0.5, 0.0);
        assert_eq!(hit_test(&system, &view, edge), Some(Target::Body(2)));
        assert_eq!(hit_test(&system, &view, view.center()), Some(Target::Sun));
        assert_eq!(hit_test(&system, &view, Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_hit_test_first_declared_wins() {
        let (mut system, view, _) = setup(InputModality::Pointer);
        // Stack Venus on top of Earth's position
        let earth_pos = view.body_position(&system.bodies[2]);
        system.bodies[1].orbit = system.bodies[2].orbit;
        let angle = system.bodies[2].angle();
        system.bodies[1].set_angle(angle);
        assert_eq!(hit_test(&system, &view, earth_pos), Some(Target::Body(1)));
    }

    #[test]
    fn test_drag_moves_body_along_orbit() {
        let (mut system, view, mut ctl) = setup(InputModality::Pointer);
        let start = view.body_position(&system.bodies[2]);
        ctl.pointer_down(&system, &view, start, 0.0);
        assert_eq!(ctl.state(), InteractionState::Dragging(2));

        let to = pointer_at(&system, &view, 2, 30.0);
        let cmd = ctl.pointer_move(&mut system, &view, to, 400.0);
        assert!((system.bodies[2].angle() - 30.0).abs() < 0.01);
        // Pointer preset shows the dragged body's facts
        match cmd {
            Some(OverlayCommand::Show(card)) => assert_eq!(card.title, "Earth"),
            other => panic!("expected facts, got {:?}", other),
        }

        let cmd = ctl.pointer_up(&system, &view, to, 600.0);
        assert_eq!(cmd, Some(OverlayCommand::Hide));
        assert_eq!(ctl.state(), InteractionState::Idle);
        assert!(!ctl.showing_info());
    }

    #[test]
    fn test_drag_across_wraparound() {
        let (mut system, view, mut ctl) = setup(InputModality::Pointer);
        system.bodies[2].set_angle(10.0);
        let down = pointer_at(&system, &view, 2, 10.0);
        ctl.pointer_down(&system, &view, down, 0.0);

        // Pointer goes 30° backwards across 0°
        let to = pointer_at(&system, &view, 2, -20.0);
        ctl.pointer_move(&mut system, &view, to, 500.0);
        assert!((system.bodies[2].angle() - 340.0).abs() < 0.01);
    }

    #[test]
    fn test_drag_delta_wraps_full_turns() {
        // A pointer delta of +370° lands 10° past the start
        let start = 10.0;
        let angle = crate::normalize_degrees(start + wrap_delta_degrees(370.0));
        assert!((angle - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_freezes_body_under_tick() {
        let (mut system, view, mut ctl) = setup(InputModality::Pointer);
        let pos = view.body_position(&system.bodies[0]);
        ctl.pointer_down(&system, &view, pos, 0.0);
        let before = system.bodies[0].angle();
        for _ in 0..30 {
            tick(&mut system, &TickInput { held: ctl.held_body() }, 1.0 / 60.0);
        }
        assert_eq!(system.bodies[0].angle(), before);
        assert!(system.bodies[1].angle() > 0.0);
    }

    #[test]
    fn test_quick_release_is_tap() {
        let (system, view, mut ctl) = setup(InputModality::Pointer);
        let pos = view.body_position(&system.bodies[3]);
        ctl.pointer_down(&system, &view, pos, 1000.0);
        match ctl.pointer_up(&system, &view, pos + Vec2::new(1.0, 1.0), 1100.0) {
            Some(OverlayCommand::Show(card)) => {
                assert_eq!(card.title, "Mars");
                assert_eq!(card.facts.len(), 3);
                assert_eq!(card.anchor, pos + Vec2::new(1.0, 1.0) + Vec2::splat(INFO_OFFSET));
            }
            other => panic!("expected tap, got {:?}", other),
        }
        assert_eq!(ctl.info_target(), Some(Target::Body(3)));
    }

    #[test]
    fn test_slow_release_is_silent_for_touch() {
        let (system, view, mut ctl) = setup(InputModality::Touch);
        let pos = view.body_position(&system.bodies[3]);
        ctl.pointer_down(&system, &view, pos, 0.0);
        assert_eq!(ctl.pointer_up(&system, &view, pos, 900.0), None);
        assert!(!ctl.showing_info());
    }

    #[test]
    fn test_tap_on_sun_and_miss() {
        let (system, view, mut ctl) = setup(InputModality::Touch);
        let center = view.center();
        ctl.pointer_down(&system, &view, center, 0.0);
        match ctl.pointer_up(&system, &view, center, 50.0) {
            Some(OverlayCommand::Show(card)) => {
                assert_eq!(card.title, "Sun");
                // Touch preset centers the overlay
                assert_eq!(card.anchor, view.center());
                assert_eq!(card.placement, InfoAnchor::CanvasCenter);
            }
            other => panic!("expected sun facts, got {:?}", other),
        }

        let empty = Vec2::new(5.0, 5.0);
        ctl.pointer_down(&system, &view, empty, 1000.0);
        assert_eq!(ctl.pointer_up(&system, &view, empty, 1050.0), Some(OverlayCommand::Hide));
        assert!(!ctl.showing_info());
    }

    #[test]
    fn test_double_tap_suppressed() {
        let (system, view, mut ctl) = setup(InputModality::Touch);
        let center = view.center();
        ctl.pointer_down(&system, &view, center, 0.0);
        assert!(ctl.pointer_up(&system, &view, center, 50.0).is_some());
        ctl.pointer_down(&system, &view, center, 150.0);
        assert_eq!(ctl.pointer_up(&system, &view, center, 200.0), None);
        // Outside the window taps work again
        ctl.pointer_down(&system, &view, center, 600.0);
        assert!(ctl.pointer_up(&system, &view, center, 650.0).is_some());
    }

    #[test]
    fn test_touch_grace_and_jitter() {
        let (mut system, view, mut ctl) = setup(InputModality::Touch);
        let down = pointer_at(&system, &view, 2, 0.0);
        ctl.pointer_down(&system, &view, down, 0.0);

        // Inside the grace period nothing moves
        let far = pointer_at(&system, &view, 2, 40.0);
        ctl.pointer_move(&mut system, &view, far, 50.0);
        assert_eq!(system.bodies[2].angle(), 0.0);

        // After the grace period a real move applies
        ctl.pointer_move(&mut system, &view, far, 150.0);
        assert!((system.bodies[2].angle() - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_touch_jitter_filter() {
        let (mut system, view, mut ctl) = setup(InputModality::Touch);
        let down = pointer_at(&system, &view, 2, 0.0);
        ctl.pointer_down(&system, &view, down, 0.0);
        // 3 px wobble after the grace period is ignored
        ctl.pointer_move(&mut system, &view, down + Vec2::new(0.0, 3.0), 200.0);
        assert_eq!(system.bodies[2].angle(), 0.0);
        // Touch preset never shows facts while dragging
        let far = pointer_at(&system, &view, 2, 20.0);
        assert_eq!(ctl.pointer_move(&mut system, &view, far, 250.0), None);
        assert!(system.bodies[2].angle() > 0.0);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let (mut system, view, mut ctl) = setup(InputModality::Pointer);
        let pos = view.body_position(&system.bodies[2]);
        assert_eq!(ctl.pointer_move(&mut system, &view, pos + Vec2::X * 50.0, 10.0), None);
        assert_eq!(system.bodies[2].angle(), 0.0);
    }

    #[test]
    fn test_cancel_ends_drag_without_tap() {
        let (system, view, mut ctl) = setup(InputModality::Pointer);
        let pos = view.body_position(&system.bodies[2]);
        ctl.pointer_down(&system, &view, pos, 0.0);
        assert_eq!(ctl.cancel(), Some(OverlayCommand::Hide));
        assert_eq!(ctl.state(), InteractionState::Idle);
        assert_eq!(ctl.cancel(), None);
    }

    #[test]
    fn test_click_after_release_is_ignored() {
        let (system, view, mut ctl) = setup(InputModality::Pointer);
        let pos = view.body_position(&system.bodies[2]);
        ctl.pointer_down(&system, &view, pos, 0.0);
        ctl.pointer_up(&system, &view, pos, 800.0);
        assert_eq!(ctl.click(&system, &view, pos, 805.0), None);

        // A standalone click shows facts
        match ctl.click(&system, &view, view.center(), 5000.0) {
            Some(OverlayCommand::Show(card)) => assert_eq!(card.title, "Sun"),
            other => panic!("expected sun facts, got {:?}", other),
        }
        assert_eq!(
            ctl.click(&system, &view, Vec2::new(2.0, 2.0), 6000.0),
            Some(OverlayCommand::Hide)
        );
    }

    #[test]
    fn test_click_after_slow_press_off_bodies() {
        let (system, view, mut ctl) = setup(InputModality::Pointer);
        let sun = view.center();

        // Too slow for a tap and not a drag, so the click decides
        assert_eq!(ctl.pointer_down(&system, &view, sun, 0.0), None);
        assert_eq!(ctl.pointer_up(&system, &view, sun, 400.0), None);
        match ctl.click(&system, &view, sun, 401.0) {
            Some(OverlayCommand::Show(card)) => assert_eq!(card.title, "Sun"),
            other => panic!("expected sun facts, got {:?}", other),
        }
        assert_eq!(ctl.info_target(), Some(Target::Sun));

        let empty = Vec2::new(2.0, 2.0);
        ctl.pointer_down(&system, &view, empty, 1000.0);
        assert_eq!(ctl.pointer_up(&system, &view, empty, 1400.0), None);
        assert_eq!(ctl.click(&system, &view, empty, 1401.0), Some(OverlayCommand::Hide));
        assert!(!ctl.showing_info());
    }

    #[test]
    fn test_dismiss_clears_info() {
        let (system, view, mut ctl) = setup(InputModality::Touch);
        assert_eq!(ctl.dismiss(), None);

        let sun = view.center();
        ctl.pointer_down(&system, &view, sun, 0.0);
        assert!(matches!(
            ctl.pointer_up(&system, &view, sun, 50.0),
            Some(OverlayCommand::Show(_))
        ));
        assert!(ctl.showing_info());

        assert_eq!(ctl.dismiss(), Some(OverlayCommand::Hide));
        assert!(!ctl.showing_info());
        assert_eq!(ctl.dismiss(), None);
    }

    #[test]
    fn test_drag_works_while_paused() {
        let (mut system, view, mut ctl) = setup(InputModality::Pointer);
        system.paused = true;
        let down = view.body_position(&system.bodies[2]);
        ctl.pointer_down(&system, &view, down, 0.0);
        let to = pointer_at(&system, &view, 2, 90.0);
        ctl.pointer_move(&mut system, &view, to, 300.0);
        assert!((system.bodies[2].angle() - 90.0).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn body_center_always_hits(id in 0usize..8, angle in 0.0f32..360.0) {
            let (mut system, view, _) = setup(InputModality::Pointer);
            system.bodies[id].set_angle(angle);
            let pos = view.body_position(&system.bodies[id]);
            // An earlier body may overlap; it must still be a body hit no later than `id`
            match hit_test(&system, &view, pos) {
                Some(Target::Body(hit)) => prop_assert!(hit <= id),
                other => prop_assert!(false, "expected a body hit, got {:?}", other),
            }
        }

        #[test]
        fn dragged_angle_stays_normalized(
            x in 0.0f32..1000.0,
            y in 0.0f32..1000.0,
        ) {
            let (mut system, view, mut ctl) = setup(InputModality::Pointer);
            let down = view.body_position(&system.bodies[5]);
            ctl.pointer_down(&system, &view, down, 0.0);
            ctl.pointer_move(&mut system, &view, Vec2::new(x, y), 300.0);
            prop_assert!((0.0..360.0).contains(&system.bodies[5].angle()));
        }

        #[test]
        fn short_still_press_is_tap(
            held in 0.0f64..199.0,
            dx in -3.0f32..3.0,
            dy in -3.0f32..3.0,
        ) {
            let (system, view, mut ctl) = setup(InputModality::Touch);
            let pos = view.body_position(&system.bodies[6]);
            ctl.pointer_down(&system, &view, pos, 1000.0);
            let cmd = ctl.pointer_up(&system, &view, pos + Vec2::new(dx, dy), 1000.0 + held);
            prop_assert!(matches!(cmd, Some(OverlayCommand::Show(_))));
        }
    }
}

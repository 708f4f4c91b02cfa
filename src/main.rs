//! Space Explorer entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(not(target_arch = "wasm32"))]
use space_explorer::{ConfigError, FactSheet};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, EventTarget,
        HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent, TouchEvent,
    };

    use space_explorer::interaction::{InfoCard, InteractionController, OverlayCommand};
    use space_explorer::renderer::{self, scene::LEGEND_ICON_SIZE};
    use space_explorer::settings::{InfoAnchor, InputModality, Settings};
    use space_explorer::sim::{FrameClock, SolarSystem, TickInput, tick};
    use space_explorer::{InitError, SystemConfig, Viewport};

    const CANVAS_ID: &str = "solarCanvas";
    const INFO_ID: &str = "infoBox";
    const PAUSE_ID: &str = "pauseBtn";
    const LEGEND_ID: &str = "legend";

    /// App instance holding all state
    struct App {
        system: SolarSystem,
        view: Viewport,
        controller: InteractionController,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        info_box: HtmlElement,
        pause_btn: Option<Element>,
    }

    impl App {
        /// Advance the orbits and redraw
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = TickInput {
                held: self.controller.held_body(),
            };
            tick(&mut self.system, &input, dt);
            renderer::render(&mut self.ctx, &self.system, &self.view);
        }

        /// Match the canvas bitmap to its CSS size
        fn resize(&mut self) {
            let w = self.canvas.client_width().max(1);
            let h = self.canvas.client_height().max(1);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.view.resize(w as f32, h as f32);
        }

        /// Canvas-local position of a client-space point
        fn local(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Viewport::to_local(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            )
        }

        fn toggle_pause(&mut self) {
            let paused = self.system.toggle_pause();
            if let Some(btn) = &self.pause_btn {
                btn.set_text_content(Some(if paused { "Play" } else { "Pause" }));
            }
        }

        fn apply(&self, command: Option<OverlayCommand>) {
            match command {
                Some(OverlayCommand::Show(card)) => {
                    if let Err(e) = self.show_info(&card) {
                        log::warn!("Failed to show info overlay: {:?}", e);
                    }
                }
                Some(OverlayCommand::Hide) => self.hide_info(),
                None => {}
            }
        }

        /// Fill the overlay with a title and a fact list, then place it
        fn show_info(&self, card: &InfoCard) -> Result<(), JsValue> {
            let document = self
                .info_box
                .owner_document()
                .ok_or_else(|| JsValue::from_str("overlay is detached"))?;

            self.info_box.set_text_content(None);
            let title = document.create_element("strong")?;
            title.set_text_content(Some(&card.title));
            self.info_box.append_child(&title)?;

            let list = document.create_element("ul")?;
            for fact in &card.facts {
                let item = document.create_element("li")?;
                item.set_text_content(Some(fact));
                list.append_child(&item)?;
            }
            self.info_box.append_child(&list)?;

            let rect = self.canvas.get_bounding_client_rect();
            let left = rect.left() as f32 + card.anchor.x;
            let top = rect.top() as f32 + card.anchor.y;
            let transform = match card.placement {
                InfoAnchor::NearPointer => "none",
                InfoAnchor::CanvasCenter => "translate(-50%, -50%)",
            };

            let style = self.info_box.style();
            style.set_property("position", "fixed")?;
            style.set_property("left", &format!("{}px", left))?;
            style.set_property("top", &format!("{}px", top))?;
            style.set_property("transform", transform)?;
            style.set_property("display", "block")?;
            Ok(())
        }

        fn hide_info(&self) {
            let _ = self.info_box.style().set_property("display", "none");
        }
    }

    pub fn run() -> Result<(), InitError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Space Explorer starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let fallback = if window.navigator().max_touch_points() > 0 {
            InputModality::Touch
        } else {
            InputModality::Pointer
        };
        let query = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&query, fallback);

        let config = SystemConfig::bundled(settings.facts)?;
        let system = SolarSystem::from_config(&config)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(InitError::MissingElement(CANVAS_ID))?
            .dyn_into()
            .map_err(|_| InitError::WrongElement {
                id: CANVAS_ID,
                expected: "canvas",
            })?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(InitError::NoContext)?
            .dyn_into()
            .map_err(|_| InitError::NoContext)?;
        let info_box: HtmlElement = document
            .get_element_by_id(INFO_ID)
            .ok_or(InitError::MissingElement(INFO_ID))?
            .dyn_into()
            .map_err(|_| InitError::WrongElement {
                id: INFO_ID,
                expected: "HTML element",
            })?;
        let pause_btn = document.get_element_by_id(PAUSE_ID);

        if let Err(e) = build_legend(&document, &system) {
            log::warn!("Legend unavailable: {:?}", e);
        }

        let view = Viewport::for_system(&system, 1.0, 1.0);
        let app = Rc::new(RefCell::new(App {
            system,
            view,
            controller: InteractionController::new(settings.interaction),
            clock: FrameClock::new(),
            canvas: canvas.clone(),
            ctx,
            info_box,
            pause_btn,
        }));
        {
            let mut app = app.borrow_mut();
            app.resize();
            app.hide_info();
        }

        setup_input_handlers(&canvas, settings.modality, app.clone());
        setup_controls(&document, app.clone());

        request_animation_frame(app);

        log::info!("Space Explorer running!");
        Ok(())
    }

    /// Register `handler` for `event` on `target` for the page lifetime
    fn listen<E>(
        target: &EventTarget,
        event: &str,
        passive: bool,
        handler: impl FnMut(E) + 'static,
    ) where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        modality: InputModality,
        app: Rc<RefCell<App>>,
    ) {
        match modality {
            InputModality::Pointer => setup_pointer_handlers(canvas, app.clone()),
            InputModality::Touch => setup_touch_handlers(canvas, app.clone()),
        }

        // Click (keyboard activation, mouse on touch-tuned devices)
        listen(canvas, "click", false, move |event: MouseEvent| {
            event.prevent_default();
            let now = js_sys::Date::now();
            let mut guard = app.borrow_mut();
            let app = &mut *guard;
            let pos = app.local(event.client_x(), event.client_y());
            let command = app.controller.click(&app.system, &app.view, pos, now);
            app.apply(command);
        });

        log::info!("Input handlers ready ({})", modality.as_str());
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            listen(canvas, "pointerdown", false, move |event: PointerEvent| {
                event.prevent_default();
                let now = js_sys::Date::now();
                let mut guard = app.borrow_mut();
                let app = &mut *guard;
                let pos = app.local(event.client_x(), event.client_y());
                let command = app.controller.pointer_down(&app.system, &app.view, pos, now);
                app.apply(command);
            });
        }

        {
            let app = app.clone();
            listen(canvas, "pointermove", false, move |event: PointerEvent| {
                let now = js_sys::Date::now();
                let mut guard = app.borrow_mut();
                let app = &mut *guard;
                if app.controller.held_body().is_none() {
                    return;
                }
                event.prevent_default();
                let pos = app.local(event.client_x(), event.client_y());
                let command = app.controller.pointer_move(&mut app.system, &app.view, pos, now);
                app.apply(command);
            });
        }

        {
            let app = app.clone();
            listen(canvas, "pointerup", false, move |event: PointerEvent| {
                let now = js_sys::Date::now();
                let mut guard = app.borrow_mut();
                let app = &mut *guard;
                let pos = app.local(event.client_x(), event.client_y());
                let command = app.controller.pointer_up(&app.system, &app.view, pos, now);
                app.apply(command);
            });
        }

        for event in ["pointerleave", "pointercancel"] {
            let app = app.clone();
            listen(canvas, event, false, move |_event: PointerEvent| {
                let mut guard = app.borrow_mut();
                let command = guard.controller.cancel();
                guard.apply(command);
            });
        }
    }

    fn setup_touch_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch start
        {
            let app = app.clone();
            listen(canvas, "touchstart", false, move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let now = js_sys::Date::now();
                    let mut guard = app.borrow_mut();
                    let app = &mut *guard;
                    let pos = app.local(touch.client_x(), touch.client_y());
                    let command = app.controller.pointer_down(&app.system, &app.view, pos, now);
                    app.apply(command);
                }
            });
        }

        // Touch move
        {
            let app = app.clone();
            listen(canvas, "touchmove", false, move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let now = js_sys::Date::now();
                    let mut guard = app.borrow_mut();
                    let app = &mut *guard;
                    let pos = app.local(touch.client_x(), touch.client_y());
                    let command = app.controller.pointer_move(&mut app.system, &app.view, pos, now);
                    app.apply(command);
                }
            });
        }

        // Touch end - the lifted finger is only in changedTouches
        {
            let app = app.clone();
            listen(canvas, "touchend", false, move |event: TouchEvent| {
                event.prevent_default();
                let now = js_sys::Date::now();
                let mut guard = app.borrow_mut();
                let app = &mut *guard;
                let command = match event.changed_touches().get(0) {
                    Some(touch) => {
                        let pos = app.local(touch.client_x(), touch.client_y());
                        app.controller.pointer_up(&app.system, &app.view, pos, now)
                    }
                    None => app.controller.cancel(),
                };
                app.apply(command);
            });
        }

        {
            let app = app.clone();
            listen(canvas, "touchcancel", false, move |_event: TouchEvent| {
                let mut guard = app.borrow_mut();
                let command = guard.controller.cancel();
                guard.apply(command);
            });
        }

        // Safari pinch gestures would zoom the page
        for event in ["gesturestart", "gesturechange", "gestureend"] {
            listen(canvas, event, false, |event: web_sys::Event| {
                event.prevent_default();
            });
        }
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pause button
        if let Some(btn) = document.get_element_by_id(PAUSE_ID) {
            let app = app.clone();
            listen(&btn, "click", true, move |_event: MouseEvent| {
                app.borrow_mut().toggle_pause();
            });
        }

        // Keyboard
        {
            let app = app.clone();
            listen(&window, "keydown", false, move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "p" | "P" => {
                        event.prevent_default();
                        app.borrow_mut().toggle_pause();
                    }
                    "Escape" => {
                        let mut guard = app.borrow_mut();
                        let command = guard.controller.dismiss();
                        guard.apply(command);
                    }
                    _ => {}
                }
            });
        }

        // Resize
        listen(&window, "resize", true, move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
    }

    /// One icon and label per body, sun first
    fn build_legend(document: &Document, system: &SolarSystem) -> Result<(), JsValue> {
        let Some(legend) = document.get_element_by_id(LEGEND_ID) else {
            return Ok(());
        };

        let items = document.create_element("div")?;
        items.set_class_name("legend-items");
        legend.append_child(&items)?;

        let (mut ctx, icon) = legend_icon(document)?;
        renderer::draw_legend_sun(&mut ctx, &system.sun);
        items.append_child(&legend_item(document, &icon, &system.sun.name)?)?;

        for body in &system.bodies {
            let (mut ctx, icon) = legend_icon(document)?;
            renderer::draw_legend_body(&mut ctx, body);
            items.append_child(&legend_item(document, &icon, &body.name)?)?;
        }
        Ok(())
    }

    fn legend_icon(
        document: &Document,
    ) -> Result<(CanvasRenderingContext2d, HtmlCanvasElement), JsValue> {
        let icon: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        icon.set_width(LEGEND_ICON_SIZE as u32);
        icon.set_height(LEGEND_ICON_SIZE as u32);
        icon.set_class_name("legend-planet");
        let ctx: CanvasRenderingContext2d = icon
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok((ctx, icon))
    }

    fn legend_item(
        document: &Document,
        icon: &HtmlCanvasElement,
        name: &str,
    ) -> Result<Element, JsValue> {
        let item = document.create_element("div")?;
        item.set_class_name("legend-item");
        item.append_child(icon)?;
        let label = document.create_element("span")?;
        label.set_text_content(Some(name));
        item.append_child(&label)?;
        Ok(item)
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            animation_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().map_err(|e| {
        log::error!("Startup failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Explorer (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` for the web version");

    let sheet = std::env::args()
        .nth(1)
        .and_then(|arg| FactSheet::from_str(&arg))
        .unwrap_or_default();

    if let Err(e) = simulate(sheet, 10.0) {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run `seconds` of 60 fps frames and print where every body ends up
#[cfg(not(target_arch = "wasm32"))]
fn simulate(sheet: FactSheet, seconds: f64) -> Result<(), ConfigError> {
    use space_explorer::sim::{FrameClock, SolarSystem, TickInput, tick};
    use space_explorer::{SystemConfig, Viewport};

    let config = SystemConfig::bundled(sheet)?;
    let mut system = SolarSystem::from_config(&config)?;
    let view = Viewport::for_system(&system, 1000.0, 1000.0);
    let mut clock = FrameClock::new();

    let frames = (seconds * 60.0) as u32;
    for frame in 0..=frames {
        let dt = clock.delta(frame as f64 * 1000.0 / 60.0);
        tick(&mut system, &TickInput::default(), dt);
    }

    println!("\nAfter {:.0}s ({} sheet):", seconds, sheet.as_str());
    for body in &system.bodies {
        let pos = view.body_position(body);
        println!(
            "  {:<8} {:>6.1}°  at ({:>6.1}, {:>6.1})",
            body.name,
            body.angle(),
            pos.x,
            pos.y
        );
    }
    Ok(())
}

//! Spin Wheel entry point
//!
//! Browser host drives the wheel from DOM events and `setTimeout`; the native
//! host is a small terminal front-end over the same controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use spin_wheel::Settings;
    use spin_wheel::render::{ROTOR_ID, WheelSvg, rotor_transform};
    use spin_wheel::rng::OsEntropy;
    use spin_wheel::session::SessionSeed;
    use spin_wheel::wheel::{DemoMode, ForcedValue, SpinController, SpinOutcome};
    use spin_wheel::SpinError;

    /// App instance holding all state
    struct App {
        wheel: SpinController<OsEntropy>,
        settings: Settings,
        /// Session-only; reset on reload
        demo: DemoMode,
        document: Document,
    }

    impl App {
        fn new(settings: Settings, document: Document) -> Self {
            let wheel = SpinController::new(settings.spin_config(), OsEntropy)
                .expect("default wheel settings are valid");
            Self {
                wheel,
                settings,
                demo: DemoMode::default(),
                document,
            }
        }

        fn set_class(&self, id: &str, class: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", class);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_spin_enabled(&self, enabled: bool) {
            if let Some(btn) = self.document.get_element_by_id("spin-button") {
                if enabled {
                    let _ = btn.remove_attribute("disabled");
                } else {
                    let _ = btn.set_attribute("disabled", "");
                }
            }
        }

        /// Sync demo badge and input visibility with demo mode
        fn update_demo_ui(&self) {
            let class = if self.demo.enabled { "" } else { "hidden" };
            self.set_class("demo-badge", class);
            self.set_class("demo-value", class);
        }

        /// Animate the rotor to `rotation`
        fn animate_rotor(&self, rotation: f64) {
            if let Some(rotor) = self.document.get_element_by_id(ROTOR_ID) {
                let style = format!(
                    "transform: {}; transform-origin: 0 0; transition: transform {}ms {}",
                    rotor_transform(rotation),
                    self.settings.animation_ms,
                    self.settings.easing.to_css()
                );
                let _ = rotor.set_attribute("style", &style);
            }
        }

        /// Show the settled result
        fn show_result(&self) {
            match self.wheel.result() {
                Some(value) => {
                    self.set_text("result-value", &value.to_string());
                    self.set_class("result", "");
                }
                None => self.set_class("result", "hidden"),
            }
            self.set_spin_enabled(!self.wheel.is_spinning());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spin Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::default();
        let app = Rc::new(RefCell::new(App::new(settings, document.clone())));

        // Draw the wheel
        {
            let a = app.borrow();
            let svg = WheelSvg::new(a.settings.pointer_angle, a.wheel.rotation());
            if let Some(container) = document.get_element_by_id("wheel") {
                container.set_inner_html(&svg.render());
            }
        }

        // Session seed (display only)
        {
            let mut a = app.borrow_mut();
            match SessionSeed::generate(a.wheel.selector_mut()) {
                Ok(seed) => a.set_text("session-seed", seed.as_str()),
                Err(e) => log::error!("Session seed unavailable: {}", e),
            }
        }

        // Demo controls always start off
        {
            let a = app.borrow();
            if let Some(input) = input_by_id(&document, "demo-toggle") {
                input.set_checked(false);
            }
            if let Some(input) = input_by_id(&document, "demo-value") {
                input.set_value("");
            }
            a.update_demo_ui();
            a.show_result();
        }

        setup_spin_button(app.clone());
        setup_demo_controls(app);

        log::info!("Spin Wheel running!");
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn on_spin(app: &Rc<RefCell<App>>) {
        let outcome = {
            let mut a = app.borrow_mut();
            let forced = a.demo.forced_value().cloned();
            a.wheel.trigger(forced.as_ref())
        };

        match outcome {
            Ok(SpinOutcome::Started(plan)) => {
                let a = app.borrow();
                a.show_result();
                a.animate_rotor(plan.to);
                schedule_settle(app.clone(), a.wheel.time_until_settled().unwrap_or(0));
            }
            Ok(SpinOutcome::Busy) => {}
            Err(e @ SpinError::InvalidForcedValue { .. }) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&e.to_string());
                }
            }
            Err(e) => {
                log::error!("Spin failed: {}", e);
                let a = app.borrow();
                a.set_text("error", &e.to_string());
                a.set_class("error", "");
                a.set_spin_enabled(false);
            }
        }
    }

    /// Fire the controller's settle timer after `delay_ms` of real time
    fn schedule_settle(app: Rc<RefCell<App>>, delay_ms: u64) {
        let callback = Closure::once_into_js(move || {
            let mut a = app.borrow_mut();
            a.wheel.advance(delay_ms);
            a.wheel.drain_events();
            a.show_result();
        });

        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            );
        }
    }

    fn setup_spin_button(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        if let Some(btn) = document.get_element_by_id("spin-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                on_spin(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_demo_controls(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();

        // DEMO checkbox
        if let Some(toggle) = input_by_id(&document, "demo-toggle") {
            let app = app.clone();
            let input = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.demo.enabled = input.checked();
                a.update_demo_ui();
                log::info!("Demo mode {}", if a.demo.enabled { "on" } else { "off" });
            });
            let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Forced value input
        if let Some(value_input) = input_by_id(&document, "demo-value") {
            let input = value_input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.demo.value = ForcedValue::new(input.value());
            });
            let _ = value_input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{self, BufRead, Write};
    use std::thread;
    use std::time::Duration;

    use spin_wheel::Settings;
    use spin_wheel::SpinError;
    use spin_wheel::rng::OsEntropy;
    use spin_wheel::session::SessionSeed;
    use spin_wheel::wheel::{
        DemoMode, ForcedValue, SpinController, SpinOutcome, wedge_under_pointer,
    };

    /// Terminal redraw interval
    const FRAME_MS: u64 = 50;

    const HELP: &str = "Enter: spin | demo <1-100>: fix result | demo off | q: quit";

    pub fn run() -> Result<(), Box<dyn Error>> {
        let settings = Settings::load();
        settings.validate()?;

        let mut wheel = SpinController::new(settings.spin_config(), OsEntropy)?;
        let mut demo = DemoMode::default();
        let seed = SessionSeed::generate(wheel.selector_mut())?;

        println!("Spin Wheel 1-100");
        println!("Session seed: {}", seed);
        println!("{}", HELP);

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (None, _) => spin(&mut wheel, &settings, &demo)?,
                (Some("q" | "quit"), _) => break,
                (Some("demo"), Some("off")) => {
                    demo.enabled = false;
                    println!("Demo mode off");
                }
                (Some("demo"), value) => {
                    demo.enabled = true;
                    demo.value = ForcedValue::new(value.unwrap_or_default());
                    println!("DEMO (fixed result): {:?}", demo.value.raw());
                }
                _ => println!("{}", HELP),
            }
        }
        Ok(())
    }

    fn spin(
        wheel: &mut SpinController<OsEntropy>,
        settings: &Settings,
        demo: &DemoMode,
    ) -> Result<(), Box<dyn Error>> {
        match wheel.trigger(demo.forced_value()) {
            Ok(SpinOutcome::Started(plan)) => {
                log::debug!("Spinning {} turns to {:.3}", plan.turns, plan.to);
            }
            Ok(SpinOutcome::Busy) => return Ok(()),
            Err(e @ SpinError::InvalidForcedValue { .. }) => {
                println!("{}", e);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        let mut out = io::stdout();
        while wheel.is_spinning() {
            thread::sleep(Duration::from_millis(FRAME_MS));
            wheel.advance(FRAME_MS);
            let shown = wheel.displayed_rotation(&settings.easing);
            let under = wedge_under_pointer(shown, settings.pointer_angle);
            write!(out, "\r  spinning... {:>3}", under.label())?;
            out.flush()?;
        }
        wheel.drain_events();

        if let Some(value) = wheel.result() {
            println!("\rResult: {:<12}", value);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Wheel (native) starting...");

    if let Err(e) = native::run() {
        log::error!("Fatal: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

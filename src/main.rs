//! Coin Flip entry point
//!
//! Handles platform-specific initialization and runs the render loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use coin_flip::persistence::SaveEnvelope;
    use coin_flip::platform::{self, FLIP_PULSE_MS, LAND_PULSE_MS, TOGGLE_PULSE_MS, TimerSlot};
    use coin_flip::renderer::CanvasSurface;
    use coin_flip::stats::FlipStats;
    use coin_flip::{CoinEngine, Face, FlipSession, Material, Settings, SpeedProfile};

    const CANVAS_ID: &str = "coinCanvas";
    const TOAST_MS: i32 = 1400;

    /// App instance holding all state
    struct App {
        engine: CoinEngine<CanvasSurface>,
        session: FlipSession,
        last_time: f64,
        auto_timer: TimerSlot,
        auto_tick: Option<Closure<dyn FnMut()>>,
        toast_timer: TimerSlot,
    }

    type Shared = Rc<RefCell<App>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input(id: &str) -> Option<HtmlInputElement> {
        element(id)?.dyn_into().ok()
    }

    fn select(id: &str) -> Option<HtmlSelectElement> {
        element(id)?.dyn_into().ok()
    }

    /// Run `f` once after `ms` milliseconds
    fn set_timeout(ms: u32, f: impl FnOnce() + 'static) {
        if let Some(window) = web_sys::window() {
            let callback = Closure::once_into_js(f);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                ms as i32,
            );
        }
    }

    fn on(target: &web_sys::EventTarget, event: &str, f: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(f);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_id(id: &str, event: &str, f: impl FnMut(web_sys::Event) + 'static) {
        if let Some(el) = element(id) {
            on(&el, event, f);
        }
    }

    /// Show a transient message; a newer toast cancels the older hide timer
    fn toast(app: &Shared, msg: &str) {
        let (Some(window), Some(el)) = (web_sys::window(), element("toast")) else {
            return;
        };
        if let Some(handle) = app.borrow_mut().toast_timer.take() {
            window.clear_timeout_with_handle(handle);
        }
        el.set_text_content(Some(msg));
        let _ = el.class_list().add_1("show");

        let hide = Closure::once_into_js(move || {
            let _ = el.class_list().remove_1("show");
        });
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), TOAST_MS)
            .ok();
        app.borrow_mut().toast_timer.replace(handle);
    }

    fn set_switch(id: &str, on: bool) {
        if let Some(el) = element(id) {
            let value = if on { "true" } else { "false" };
            let _ = el.set_attribute("data-on", value);
            let _ = el.set_attribute("aria-checked", value);
        }
    }

    fn haptic(app: &Shared, ms: u32) {
        if app.borrow().session.settings.haptics {
            platform::vibrate(ms);
        }
    }

    fn apply_theme(app: &Shared) {
        let theme = app.borrow().session.settings.theme;
        if let Some(body) = document().and_then(|d| d.body()) {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
        app.borrow_mut().engine.request_render();
    }

    fn set_busy_ui(busy: bool) {
        if let Some(btn) = element("btnFlip") {
            if busy {
                let _ = btn.set_attribute("disabled", "");
            } else {
                let _ = btn.remove_attribute("disabled");
            }
        }
        set_text("stateText", if busy { "Flipping..." } else { "Ready" });
        if let Some(dot) = element("dotState") {
            let _ = dot.set_attribute("data-busy", if busy { "true" } else { "false" });
        }
    }

    /// Push statistics and settings into the DOM, then persist
    fn update_ui(app: &Shared) {
        let a = app.borrow();
        let settings = &a.session.settings;
        let stats = &a.session.stats;

        set_text("probLabel", &format!("{}%", settings.heads_percent));
        set_text("pillProb", &format!("{}% heads", settings.heads_percent));
        set_text("pillSkin", settings.material.as_str());

        let count = stats.count.to_string();
        set_text("count", &count);
        set_text("sCount", &count);
        set_text("heads", &stats.heads.to_string());
        set_text("tails", &stats.tails.to_string());
        set_text("sLast", stats.last.map(|f| f.as_str()).unwrap_or("-"));
        set_text("sBestHeads", &stats.best_heads_streak.to_string());
        set_text("sBestTails", &stats.best_tails_streak.to_string());
        set_text("ratioHeads", &format!("{}%", stats.heads_ratio_percent()));

        set_text("hudMode", a.session.mode_label());
        set_text("hudStreak", &stats.streak_label());
        set_text(
            "btnAuto",
            if a.session.is_auto() { "Auto: On" } else { "Auto: Off" },
        );

        render_history(stats);
        a.session.persist();
    }

    fn render_history(stats: &FlipStats) {
        let (Some(doc), Some(list)) = (document(), element("history")) else {
            return;
        };
        list.set_inner_html("");

        if stats.history.is_empty() {
            if let Ok(empty) = doc.create_element("div") {
                empty.set_class_name("hEmpty");
                empty.set_text_content(Some("No flips yet."));
                let _ = list.append_child(&empty);
            }
            return;
        }

        let total = stats.history.len();
        for (i, record) in stats.history.iter().enumerate() {
            let Ok(row) = doc.create_element("div") else {
                continue;
            };
            row.set_class_name("hItem");
            let icon = match record.face {
                Face::Heads => "\u{1F451}",
                Face::Tails => "\u{1F522}",
            };
            row.set_inner_html(&format!(
                "<div class=\"hLeft\"><div class=\"hIcon\">{}</div><div class=\"hText\"><b>{}</b><span>Time: {}</span></div></div><div class=\"hRight\">#{}</div>",
                icon,
                record.face.as_str(),
                record.clock,
                total - i
            ));
            let _ = list.append_child(&row);
        }
    }

    fn do_flip(app: &Shared) {
        let pending = {
            let mut a = app.borrow_mut();
            let App {
                engine, session, ..
            } = &mut *a;
            session.begin_flip(engine)
        };
        let Some(pending) = pending else { return };

        set_busy_ui(true);
        haptic(app, FLIP_PULSE_MS);

        {
            let app = app.clone();
            set_timeout(pending.reveal_ms, move || {
                let now = platform::now_ms();
                app.borrow_mut()
                    .session
                    .reveal(pending.face, now, platform::local_clock(now));
                set_text("resultText", &format!("Result: {}", pending.face.as_str()));
                haptic(&app, LAND_PULSE_MS);
                update_ui(&app);
            });
        }
        {
            let app = app.clone();
            set_timeout(pending.release_ms, move || {
                app.borrow_mut().session.release();
                set_busy_ui(false);
            });
        }
    }

    fn start_auto(app: &Shared) {
        let Some(window) = web_sys::window() else { return };
        let ms = app.borrow().session.settings.auto_interval_ms();

        let tick = {
            let app = app.clone();
            Closure::<dyn FnMut()>::new(move || {
                let busy = app.borrow().session.is_busy();
                if !busy {
                    do_flip(&app);
                }
            })
        };
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok();

        {
            let mut a = app.borrow_mut();
            a.session.set_auto(true);
            a.auto_timer.replace(handle);
            a.auto_tick = Some(tick);
        }
        toast(app, &format!("Auto on ({}s)", ms / 1000));
        update_ui(app);
    }

    fn stop_auto(app: &Shared) {
        {
            let mut a = app.borrow_mut();
            if let (Some(handle), Some(window)) = (a.auto_timer.take(), web_sys::window()) {
                window.clear_interval_with_handle(handle);
            }
            a.auto_tick = None;
            a.session.set_auto(false);
        }
        update_ui(app);
    }

    fn toggle_auto(app: &Shared) {
        if app.borrow().session.is_auto() {
            stop_auto(app);
        } else {
            start_auto(app);
        }
    }

    fn toggle_theme(app: &Shared) {
        let theme = {
            let mut a = app.borrow_mut();
            a.session.settings.theme = a.session.settings.theme.toggled();
            a.session.settings.theme
        };
        set_switch("swTheme", theme == coin_flip::Theme::Light);
        apply_theme(app);
        toast(app, &format!("Theme: {}", theme.as_str()));
        update_ui(app);
    }

    fn copy_result(app: &Shared) {
        let text = {
            let a = app.borrow();
            a.session.stats.summary_text(a.session.settings.heads_percent)
        };
        let Some(window) = web_sys::window() else { return };
        let promise = window.navigator().clipboard().write_text(&text);
        let app = app.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => toast(&app, "Copied"),
                Err(_) => toast(&app, "Clipboard blocked"),
            }
        });
    }

    fn reset_all(app: &Shared) {
        stop_auto(app);
        {
            let mut a = app.borrow_mut();
            let App {
                engine, session, ..
            } = &mut *a;
            session.reset(engine);
        }
        set_text("resultText", "Ready.");
        update_ui(app);
        toast(app, "Reset done");
    }

    /// Reflect loaded settings into the form controls
    fn sync_controls(settings: &Settings) {
        if let Some(el) = input("prob") {
            el.set_value(&settings.heads_percent.to_string());
        }
        if let Some(el) = select("skin") {
            el.set_value(&settings.material.as_str().to_lowercase());
        }
        if let Some(el) = select("speed") {
            el.set_value(&settings.speed.as_str().to_lowercase());
        }
        if let Some(el) = input("autoSec") {
            el.set_value(&settings.auto_secs.to_string());
        }
        set_switch("swHaptic", settings.haptics);
        set_switch("swTheme", settings.theme == coin_flip::Theme::Light);
        set_switch("swPersist", settings.persist);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coin Flip starting...");

        let surface = match CanvasSurface::from_element_id(CANVAS_ID) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Cannot start coin engine: {}", e);
                return;
            }
        };
        let dpr = platform::device_pixel_ratio();
        surface.resize_backing(dpr);

        let seed = platform::now_ms() as u64;
        let session = FlipSession::restore(SaveEnvelope::load(), seed);
        let mut engine = CoinEngine::new(surface, seed.rotate_left(17), dpr);
        engine.set_material(session.settings.material);
        engine.set_speed(session.settings.speed);
        engine.set_idle(session.resting_face());
        sync_controls(&session.settings);

        let app = Rc::new(RefCell::new(App {
            engine,
            session,
            last_time: 0.0,
            auto_timer: TimerSlot::default(),
            auto_tick: None,
            toast_timer: TimerSlot::default(),
        }));

        setup_handlers(&app);
        apply_theme(&app);
        set_busy_ui(false);
        update_ui(&app);

        request_animation_frame(app);
        {
            let app = app.clone();
            set_timeout(650, move || toast(&app, "Tip: press Space to flip"));
        }

        log::info!("Coin Flip running!");
    }

    fn setup_handlers(app: &Shared) {
        {
            let app = app.clone();
            on_id("btnFlip", "click", move |_| do_flip(&app));
        }
        {
            let app = app.clone();
            on_id("btnAuto", "click", move |_| toggle_auto(&app));
        }
        {
            let app = app.clone();
            on_id("btnCopy", "click", move |_| copy_result(&app));
        }
        {
            let app = app.clone();
            on_id("btnReset", "click", move |_| reset_all(&app));
        }

        // Probability slider
        {
            let app = app.clone();
            on_id("prob", "input", move |_| {
                if let Some(el) = input("prob") {
                    let value = el.value().parse::<i32>().unwrap_or(50);
                    app.borrow_mut().session.settings.set_heads_percent(value);
                }
                update_ui(&app);
            });
        }

        // Material
        {
            let app = app.clone();
            on_id("skin", "change", move |_| {
                let material = select("skin")
                    .and_then(|el| Material::from_str(&el.value()))
                    .unwrap_or_default();
                {
                    let mut a = app.borrow_mut();
                    a.session.settings.material = material;
                    a.engine.set_material(material);
                }
                toast(&app, &format!("Material: {}", material.as_str()));
                update_ui(&app);
            });
        }

        // Speed
        {
            let app = app.clone();
            on_id("speed", "change", move |_| {
                let speed = select("speed")
                    .and_then(|el| SpeedProfile::from_str(&el.value()))
                    .unwrap_or_default();
                app.borrow_mut().session.settings.speed = speed;
                toast(&app, &format!("Speed: {}", speed.as_str()));
                update_ui(&app);
            });
        }

        // Auto interval
        {
            let app = app.clone();
            on_id("autoSec", "change", move |_| {
                let secs = {
                    let mut a = app.borrow_mut();
                    if let Some(el) = input("autoSec") {
                        a.session.settings.set_auto_secs_from_str(&el.value());
                        el.set_value(&a.session.settings.auto_secs.to_string());
                    }
                    a.session.settings.auto_secs
                };
                if app.borrow().session.is_auto() {
                    stop_auto(&app);
                    start_auto(&app);
                } else {
                    toast(&app, &format!("Auto: {}s", secs));
                    update_ui(&app);
                }
            });
        }

        // Switches
        {
            let app = app.clone();
            on_id("swHaptic", "click", move |_| {
                let on = {
                    let mut a = app.borrow_mut();
                    a.session.settings.haptics = !a.session.settings.haptics;
                    a.session.settings.haptics
                };
                set_switch("swHaptic", on);
                if on {
                    platform::vibrate(TOGGLE_PULSE_MS);
                }
                toast(&app, if on { "Haptics: on" } else { "Haptics: off" });
                update_ui(&app);
            });
        }
        {
            let app = app.clone();
            on_id("swTheme", "click", move |_| toggle_theme(&app));
        }
        {
            let app = app.clone();
            on_id("swPersist", "click", move |_| {
                let on = !app.borrow().session.settings.persist;
                app.borrow_mut().session.set_persist(on);
                set_switch("swPersist", on);
                toast(&app, if on { "Saving: on" } else { "Saving: off" });
                update_ui(&app);
            });
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let app = app.clone();
            on(&window, "keydown", move |event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                if event.repeat() {
                    return;
                }
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        do_flip(&app);
                    }
                    "a" | "A" => toggle_auto(&app),
                    "t" | "T" => toggle_theme(&app),
                    _ => {}
                }
            });
        }

        // Resize: re-fit the backing store for the current pixel ratio
        if let Some(window) = web_sys::window() {
            let app = app.clone();
            on(&window, "resize", move |_| {
                let dpr = platform::device_pixel_ratio();
                let mut a = app.borrow_mut();
                a.engine.surface().resize_backing(dpr);
                a.engine.set_device_pixel_ratio(dpr);
            });
        }
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            render_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn render_loop(app: Shared, time: f64) {
        {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;
            a.engine.frame(dt);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use coin_flip::persistence::SaveEnvelope;
    use coin_flip::platform;
    use coin_flip::renderer::RecordingSurface;
    use coin_flip::{CoinEngine, FlipSession};

    env_logger::init();
    log::info!("Coin Flip (native) starting...");
    log::info!("Native mode renders headless - run with `trunk serve` for the web version");

    let seed = platform::now_ms() as u64;
    let mut session = FlipSession::restore(SaveEnvelope::load(), seed);
    let mut engine = CoinEngine::new(RecordingSurface::new(), seed.rotate_left(17), 1.0);
    engine.set_idle(session.resting_face());

    const FRAME_DT: f32 = 1.0 / 60.0;
    for _ in 0..5 {
        let Some(pending) = session.begin_flip(&mut engine) else {
            break;
        };
        let mut frames = 0u32;
        while engine.is_animating() {
            engine.frame(FRAME_DT);
            frames += 1;
        }
        let now = platform::now_ms();
        session.reveal(pending.face, now, platform::local_clock(now));
        session.release();
        log::info!(
            "Landed on {} after {} frames ({} draw ops)",
            engine.displayed_face().as_str(),
            frames,
            engine.surface_mut().take().len()
        );
    }

    let stats = &session.stats;
    println!(
        "{} | {} | heads {}%",
        stats.summary_text(session.settings.heads_percent),
        stats.streak_label(),
        stats.heads_ratio_percent()
    );
}

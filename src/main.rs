//! Honey Smash entry point
//!
//! Wires the simulation to the page on wasm; runs a headless demo natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        HtmlMediaElement, MouseEvent, TouchEvent,
    };

    use honey_smash::backend::{ApiError, BackendClient, RedemptionCode, SubmitScoreRequest};
    use honey_smash::consts::RAFA_PHRASE_DISPLAY_MS;
    use honey_smash::platform::{Debounce, now_ms};
    use honey_smash::ranking::{HallOfFame, Leaderboard, Placement};
    use honey_smash::sim::{
        Feedback, GameEvent, GameMode, Layout, ObjectKind, Session, SessionState, TickStatus, tick,
    };
    use honey_smash::{Settings, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// How often session timers are pumped, independent of frame rate
    const TIMER_PUMP_MS: i32 = 50;

    /// Every top-level screen; showing one hides the rest
    const SCREENS: [&str; 5] = [
        "play-options-screen",
        "code-entry-screen",
        "game-container",
        "game-over-normal",
        "ranking-form",
    ];

    /// Game instance holding all state
    struct Game {
        session: Option<Session>,
        layout: Layout,
        tuning: Tuning,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        leaderboard: Leaderboard,
        ranking_page: usize,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, settings: Settings) -> Self {
            let layout = Layout::from_canvas(canvas.width() as f32, canvas.height() as f32);
            Self {
                session: None,
                layout,
                tuning: Tuning::default(),
                settings,
                canvas,
                ctx,
                leaderboard: Leaderboard::default(),
                ranking_page: 1,
            }
        }

        /// Match the canvas to its container and recompute sizes
        fn resize(&mut self) {
            let Some(container) = element::<HtmlElement>("console-screen-container") else {
                return;
            };
            let width = container.offset_width().max(1) as u32;
            let height = container.offset_height().max(1) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.layout.resize(width as f32, height as f32);
            log::debug!("Canvas resized to {}x{}", width, height);
        }

        fn start(&mut self, state: SessionState) {
            self.resize();
            let seed = js_sys::Date::now() as u64;
            let mut session = Session::new(state, seed, self.tuning.clone());
            session.start(now_ms());
            log::info!("Session started ({:?}) with seed {}", session.state.mode(), seed);
            self.session = Some(session);
            set_display("rafa", "none");
            self.update_hud();
        }

        fn frame(&mut self, time: f64) -> TickStatus {
            let status = match self.session.as_mut() {
                Some(session) => tick(session, time, &self.layout),
                None => return TickStatus::Inactive,
            };
            self.render();
            self.flush_events();
            self.update_hud();
            status
        }

        fn pump(&mut self) {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if session.pump_timers(now_ms()) > 0 {
                self.flush_events();
                self.update_hud();
            }
        }

        fn swat(&mut self) {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if session.swat_rafa(now_ms()).is_some() {
                self.play("palmadaSound");
                self.flush_events();
                self.update_hud();
            }
        }

        fn update_hud(&self) {
            let Some(session) = &self.session else {
                return;
            };
            set_text("score", &session.score().to_string());
            set_text("timer", &format!("{}", session.state.time_left.ceil() as i64));
        }

        fn flush_events(&mut self) {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            for event in session.drain_events() {
                match event {
                    GameEvent::Caught { feedback, .. } => match feedback {
                        Feedback::Positive => self.play("aciertoSound"),
                        Feedback::Negative => self.play("falloSound"),
                    },
                    GameEvent::RafaAppeared { appearance } => {
                        log::debug!("Rafa appearance #{}", appearance);
                        set_display("rafa", "block");
                        set_text("rafa-notification", "");
                    }
                    GameEvent::RafaPenaltyPending { points } => {
                        set_text("rafa-notification", &format!("-{points} Puntos"));
                        set_display("rafa-notification", "block");
                    }
                    GameEvent::RafaDismissed {
                        penalty, phrase, ..
                    } => {
                        set_display("rafa", "none");
                        set_display("rafa-notification", "none");
                        set_text("points-lost-notification", &format!("-{penalty}"));
                        if let Some(phrase) = phrase {
                            set_text("rafa-phrase", &phrase);
                            set_display("rafa-phrase", "block");
                            after(RAFA_PHRASE_DISPLAY_MS as i32, || {
                                set_display("rafa-phrase", "none")
                            });
                        }
                    }
                    GameEvent::SessionEnded { score, mode } => {
                        log::info!("Final score {} ({:?})", score, mode);
                        set_display("rafa", "none");
                        set_display("rafa-notification", "none");
                    }
                    GameEvent::Spawned { .. } => {}
                }
            }
        }

        fn play(&self, id: &str) {
            if self.settings.muted {
                return;
            }
            if let Some(audio) = element::<HtmlMediaElement>(id) {
                audio.set_volume(self.settings.effective_sfx_volume() as f64);
                audio.set_current_time(0.0);
                let _ = audio.play();
            }
        }

        fn apply_volume(&self) {
            for id in ["gameMusic", "loadingMusic"] {
                if let Some(audio) = element::<HtmlMediaElement>(id) {
                    audio.set_volume(self.settings.effective_music_volume() as f64);
                }
            }
            let label = if self.settings.muted { "🔇" } else { "🔊" };
            set_text("mute-btn", label);
        }

        fn render(&self) {
            let Some(session) = &self.session else {
                return;
            };
            let ctx = &self.ctx;
            let viewport = self.layout.viewport;
            ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

            for object in &session.state.objects {
                let half = object.size as f64 / 2.0;
                ctx.save();
                let _ = ctx.translate(object.pos.x as f64 + half, object.pos.y as f64 + half);
                let _ = ctx.rotate(object.rotation as f64);
                ctx.set_fill_style_str(object_color(object.kind));
                ctx.fill_rect(-half, -half, object.size as f64, object.size as f64);
                ctx.restore();
            }

            let tray = self.layout.tray;
            ctx.set_fill_style_str("#f5b400");
            ctx.fill_rect(
                tray.x as f64,
                tray.top(&viewport) as f64,
                tray.width as f64,
                tray.height as f64,
            );
        }

        fn show_ranking_page(&self) {
            let Some(list) = element::<HtmlElement>("ranking-list") else {
                return;
            };
            list.set_inner_html("");
            let Some(document) = document() else {
                return;
            };
            for (position, entry) in self.leaderboard.page(self.ranking_page) {
                if let Ok(item) = document.create_element("li") {
                    item.set_text_content(Some(&format!(
                        "#{position} {} - {}",
                        entry.name, entry.score
                    )));
                    let _ = list.append_child(&item);
                }
            }
            let pages = self.leaderboard.total_pages().max(1);
            set_text("ranking-page", &format!("{}/{}", self.ranking_page, pages));
        }
    }

    fn object_color(kind: ObjectKind) -> &'static str {
        match kind {
            ObjectKind::Honey => "#ffb300",
            kind if kind.points() > 0 => "#8d5524",
            _ => "#555555",
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(id: &str) -> Option<T> {
        document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, display: &str) {
        if let Some(el) = element::<HtmlElement>(id) {
            let _ = el.style().set_property("display", display);
        }
    }

    fn show_screen(id: &str) {
        for screen in SCREENS {
            set_display(screen, if screen == id { "block" } else { "none" });
        }
    }

    fn input_value(id: &str) -> String {
        element::<HtmlInputElement>(id)
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn clear_inputs(ids: &[&str]) {
        for id in ids {
            if let Some(input) = element::<HtmlInputElement>(id) {
                input.set_value("");
            }
        }
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Run `f` once after `delay_ms`
    fn after(delay_ms: i32, f: impl FnOnce() + 'static) {
        if let Some(window) = web_sys::window() {
            let closure = Closure::once_into_js(f);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.unchecked_ref(),
                delay_ms,
            );
        }
    }

    /// Attach a debounced handler to both click and touchstart
    fn on_button(id: &str, mut action: impl FnMut() + 'static) {
        let Some(button) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let mut debounce = Debounce::default();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            if debounce.accept(now_ms()) {
                action();
            }
        });
        for kind in ["click", "touchstart"] {
            let _ = button.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        let level = settings.log_level().to_level().unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Honey Smash starting...");

        let Some(canvas) = element::<HtmlCanvasElement>("game-canvas") else {
            log::error!("No #game-canvas on the page");
            return;
        };
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2d context has the wrong type");
                    return;
                }
            },
            _ => {
                log::error!("Canvas has no 2d context");
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(canvas, ctx, settings)));
        {
            let mut g = game.borrow_mut();
            g.resize();
            g.apply_volume();
        }

        setup_pointer(game.clone());
        setup_resize(game.clone());
        setup_timer_pump(game.clone());
        setup_buttons(game.clone());

        show_screen("play-options-screen");
        load_ranking(game);
        log::info!("Honey Smash ready");
    }

    fn setup_pointer(game: Rc<RefCell<Game>>) {
        let Some(container) = element::<HtmlElement>("console-screen-container") else {
            return;
        };

        // Mouse move
        {
            let game = game.clone();
            let target = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let left = target.get_bounding_client_rect().left();
                let mut g = game.borrow_mut();
                let width = g.layout.viewport.width;
                g.layout
                    .tray
                    .follow_pointer((event.client_x() as f64 - left) as f32, width);
            });
            let _ = container
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let target = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let left = target.get_bounding_client_rect().left();
                    let mut g = game.borrow_mut();
                    let width = g.layout.viewport.width;
                    g.layout
                        .tray
                        .follow_pointer((touch.client_x() as f64 - left) as f32, width);
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Swatting Rafa
        if let Some(rafa) = document().and_then(|d| d.get_element_by_id("rafa")) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                game.borrow_mut().swat();
            });
            for kind in ["click", "touchstart"] {
                let _ = rafa.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Session timers fire from here, not from the frame loop, so Rafa keeps
    /// counting while the tab throttles animation frames
    fn setup_timer_pump(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().pump();
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                TIMER_PUMP_MS,
            )
            .is_err()
        {
            log::error!("Could not start the timer pump");
        }
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_button("play-normal-btn", move || {
                start_session(&game, SessionState::normal());
            });
        }

        on_button("play-with-code-btn", || show_screen("code-entry-screen"));

        {
            let game = game.clone();
            on_button("validate-code-btn", move || validate_and_play(game.clone()));
        }

        on_button("back-to-menu-btn", || {
            clear_inputs(&["player-code-input"]);
            show_screen("play-options-screen");
        });

        {
            let game = game.clone();
            on_button("play-again-btn", move || {
                game.borrow_mut().session = None;
                show_screen("play-options-screen");
            });
        }

        {
            let game = game.clone();
            on_button("save-score-btn", move || save_score(game.clone()));
        }

        {
            let game = game.clone();
            on_button("mute-btn", move || {
                let mut g = game.borrow_mut();
                let muted = g.settings.toggle_mute();
                g.settings.save();
                g.apply_volume();
                log::info!("Muted: {}", muted);
            });
        }

        {
            let game = game.clone();
            on_button("ranking-prev-btn", move || {
                let mut g = game.borrow_mut();
                if g.ranking_page > 1 {
                    g.ranking_page -= 1;
                    g.show_ranking_page();
                }
            });
        }

        on_button("ranking-next-btn", move || {
            let mut g = game.borrow_mut();
            if g.ranking_page < g.leaderboard.total_pages() {
                g.ranking_page += 1;
                g.show_ranking_page();
            }
        });
    }

    fn start_session(game: &Rc<RefCell<Game>>, state: SessionState) {
        game.borrow_mut().start(state);
        show_screen("game-container");
        request_animation_frame(game.clone());
    }

    fn validate_and_play(game: Rc<RefCell<Game>>) {
        let code = match RedemptionCode::from_suffix(&input_value("player-code-input")) {
            Ok(code) => code,
            Err(err) => {
                alert(&ApiError::from(err).user_message());
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            let result = BackendClient::same_origin().validate_code(&code).await;
            clear_inputs(&["player-code-input"]);
            match result {
                Ok(_) => {
                    log::info!("Code {} accepted", code);
                    start_session(&game, SessionState::with_code(code));
                }
                Err(err) => {
                    log::warn!("Code {} rejected: {}", code, err);
                    alert(&err.user_message());
                }
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let status = game.borrow_mut().frame(time);
        match status {
            TickStatus::Running => request_animation_frame(game),
            TickStatus::Ended { score } => on_session_end(game, score),
            TickStatus::Inactive => {}
        }
    }

    fn on_session_end(game: Rc<RefCell<Game>>, score: i64) {
        let mode = game
            .borrow()
            .session
            .as_ref()
            .map(|s| s.state.mode())
            .unwrap_or(GameMode::Normal);

        match mode {
            GameMode::Normal => {
                set_text("final-score-normal", &score.to_string());
                show_screen("game-over-normal");
            }
            GameMode::Code => {
                set_text("final-score-with-code", &score.to_string());
                set_display("ranking-position-container", "none");
                show_screen("ranking-form");
                wasm_bindgen_futures::spawn_local(async move {
                    match BackendClient::same_origin().ranking().await {
                        Ok(leaderboard) => {
                            let mut rng = Pcg32::seed_from_u64(js_sys::Date::now() as u64);
                            let placement = Placement::compute(&leaderboard, score, &mut rng);
                            set_text("ranking-position", &placement.headline);
                            set_text("ranking-message", placement.message);
                            set_display("ranking-position-container", "block");
                        }
                        Err(err) => log::warn!("Could not compute ranking position: {}", err),
                    }
                });
            }
        }
    }

    fn save_score(game: Rc<RefCell<Game>>) {
        let pending = game.borrow().session.as_ref().and_then(|s| {
            s.state
                .validated_code()
                .cloned()
                .map(|code| (s.score(), code))
        });
        let Some((score, code)) = pending else {
            log::warn!("Save requested without a code-mode session");
            return;
        };

        let request = match SubmitScoreRequest::new(
            &input_value("player-name"),
            score,
            &input_value("player-email"),
            &input_value("player-phone"),
            code,
        ) {
            Ok(request) => request,
            Err(err) => {
                alert(&ApiError::from(err).user_message());
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            match BackendClient::same_origin().submit_score(&request).await {
                Ok(receipt) => {
                    alert(&format!(
                        "✅ ¡Puntuación guardada! {}, tu puntuación de {} puntos ha sido registrada.",
                        receipt.name, receipt.score
                    ));
                    finish_form(&game);
                    load_ranking(game);
                }
                Err(err) => {
                    log::warn!("Score submission failed: {}", err);
                    alert(&err.user_message());
                    if err.returns_to_menu() {
                        finish_form(&game);
                    }
                }
            }
        });
    }

    fn finish_form(game: &Rc<RefCell<Game>>) {
        clear_inputs(&["player-name", "player-email", "player-phone"]);
        game.borrow_mut().session = None;
        show_screen("play-options-screen");
    }

    /// Refresh the weekly ranking and the Hall of Fame
    fn load_ranking(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let client = BackendClient::same_origin();
            match client.ranking().await {
                Ok(leaderboard) => {
                    let mut g = game.borrow_mut();
                    g.leaderboard = leaderboard;
                    g.ranking_page = 1;
                    g.show_ranking_page();
                }
                Err(err) => log::warn!("Could not load ranking: {}", err),
            }
            match client.hall_of_fame().await {
                Ok(hall) => show_hall_of_fame(&hall),
                Err(err) => log::warn!("Could not load Hall of Fame: {}", err),
            }
        });
    }

    fn show_hall_of_fame(hall: &HallOfFame) {
        for (slot, entry) in hall.podium().iter().enumerate() {
            let text = entry
                .map(|e| format!("{} - {}", e.name, e.score))
                .unwrap_or_else(|| "---".to_string());
            set_text(&format!("podium-{}", slot + 1), &text);
        }

        let (Some(document), Some(list)) = (document(), element::<HtmlElement>("halloffame-list"))
        else {
            return;
        };
        list.set_inner_html("");
        for (i, entry) in hall.entries.iter().enumerate().skip(3) {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&format!("#{} {} - {}", i + 1, entry.name, entry.score)));
                let _ = list.append_child(&item);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Honey Smash (native) starting...");
    log::info!("The playable build targets the browser; running a headless demo");

    let score = headless::run(0x5eed);
    println!("Demo session finished with {} points", score);
}

/// Scripted session driven by a fake clock, for smoke-testing outside a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use honey_smash::Tuning;
    use honey_smash::sim::{GameEvent, Layout, Session, SessionState, TickStatus, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Let Rafa accrue this many penalty ticks before swatting him
    const SWAT_AFTER_TICKS: u32 = 3;

    pub fn run(seed: u64) -> i64 {
        let mut layout = Layout::from_canvas(480.0, 800.0);
        let mut session = Session::new(SessionState::normal(), seed, Tuning::default());
        let mut now = 0.0;
        session.start(now);

        loop {
            now += FRAME_MS;
            session.pump_timers(now);

            if session.rafa().penalty_counter() >= SWAT_AFTER_TICKS {
                session.swat_rafa(now);
            }

            // Autopilot: chase the lowest object worth catching
            let target = session
                .state
                .objects
                .iter()
                .filter(|o| o.kind.points() > 0)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|o| o.pos.x + o.size / 2.0);
            if let Some(x) = target {
                let width = layout.viewport.width;
                layout.tray.follow_pointer(x, width);
            }

            let status = tick(&mut session, now, &layout);
            for event in session.drain_events() {
                match event {
                    GameEvent::Caught { kind, points, .. } => {
                        log::debug!("Caught {} ({:+})", kind.as_str(), points)
                    }
                    GameEvent::RafaDismissed { penalty, reason, .. } => {
                        log::info!("Rafa gone ({:?}), -{}", reason, penalty)
                    }
                    other => log::trace!("{:?}", other),
                }
            }

            if let TickStatus::Ended { score } = status {
                return score;
            }
        }
    }
}

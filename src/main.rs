//! folio-fx entry point
//!
//! Wires page behavior on wasm: theme toggle, scroll-mapped timeline,
//! carousel, easter-egg triggers and the minigame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior,
        ScrollIntoViewOptions, Window,
    };

    use folio_fx::consts::*;
    use folio_fx::render::CanvasPainter;
    use folio_fx::scrollmap::{ScrollTracker, SectionMap, section_color};
    use folio_fx::sim::{GamePhase, GameState, Lane, TickInput, tick};
    use folio_fx::{Carousel, Tuning, fx};

    /// Minigame instance holding all state the frame loop touches
    struct Game {
        state: GameState,
        painter: CanvasPainter,
        input: TickInput,
        tuning: Tuning,
        last_time: f64,
    }

    impl Game {
        fn new(window: &Window, canvas: HtmlCanvasElement, tuning: Tuning) -> Result<Self, JsValue> {
            let mut painter = CanvasPainter::new(canvas, &tuning)?;
            painter.fit_to_display(window)?;
            let (w, h) = painter.field_size();
            // A hidden canvas measures zero; hold a positive placeholder
            // field until launch re-measures.
            let state = GameState::new(
                js_sys::Date::now() as u64,
                tuning.clone(),
                w.max(1.0),
                h.max(1.0),
            );
            Ok(Self {
                state,
                painter,
                input: TickInput::default(),
                tuning,
                last_time: 0.0,
            })
        }

        /// Start a fresh run over the canvas at its current display size
        fn restart(&mut self, window: &Window, seed: u64) -> Result<(), JsValue> {
            self.painter.fit_to_display(window)?;
            let (w, h) = self.painter.field_size();
            if w <= 0.0 || h <= 0.0 {
                return Err(JsValue::from_str("game canvas has zero size"));
            }
            self.state = GameState::new(seed, self.tuning.clone(), w, h);
            self.state.start();
            self.input = TickInput::default();
            self.last_time = 0.0;
            Ok(())
        }

        /// Advance the simulation by the wall-clock time since the last frame
        fn advance(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input;
            tick(&mut self.state, &input, elapsed);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Live score
            if let Some(el) = document.get_element_by_id("game-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;

        log::info!("folio-fx starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let tuning = Tuning::load(&document);

        setup_page_glue(&document)?;
        setup_scrollmap(&window, &document)?;
        setup_carousel(&document)?;
        setup_minigame(&window, &document, &tuning)?;
        setup_egg_triggers(&document);

        log::info!("folio-fx ready");
        Ok(())
    }

    fn setup_page_glue(document: &Document) -> Result<(), JsValue> {
        // Dark/light toggle
        let toggle = document
            .get_element_by_id("theme-toggle")
            .ok_or_else(|| JsValue::from_str("missing #theme-toggle"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let next = if root.get_attribute("data-theme").as_deref() == Some("dark") {
                    "light"
                } else {
                    "dark"
                };
                let _ = root.set_attribute("data-theme", next);
            });
            toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Scroll cue under the hero
        let cue = document
            .get_element_by_id("scroll-indicator")
            .ok_or_else(|| JsValue::from_str("missing #scroll-indicator"))?;
        {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let Some(about) = document.get_element_by_id("about") else {
                    log::warn!("scroll cue: no #about section to scroll to");
                    return;
                };
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                about.scroll_into_view_with_scroll_into_view_options(&opts);
            });
            cue.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Footer year
        if let Some(el) = document.get_element_by_id("footer-year") {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
        }

        Ok(())
    }

    /// Everything the scroll and resize handlers touch
    struct ScrollWiring {
        map: SectionMap,
        tracker: ScrollTracker,
        sections: Vec<HtmlElement>,
        dots: Vec<HtmlElement>,
        marker: HtmlElement,
        reveals: Vec<HtmlElement>,
    }

    impl ScrollWiring {
        fn on_scroll(&mut self, window: &Window, now_ms: f64) {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            let viewport_h = viewport_height(window);

            let direction = self.tracker.observe(scroll_y, now_ms);
            let classes = self.marker.class_list();
            let _ = classes.remove_3("up", "down", "idle");
            let _ = classes.add_1(direction.as_class());

            self.place_marker(scroll_y + viewport_h / 2.0);
            self.reveal(viewport_h);
        }

        /// Position the rocket marker and highlight the nearest dot
        fn place_marker(&self, viewport_center: f64) {
            let placement = self.map.locate(viewport_center);
            let top = self.map.marker_pos(&placement);
            let _ = self.marker.style().set_property("top", &format!("{top:.1}px"));

            let active = self.map.active_index(&placement);
            for (i, dot) in self.dots.iter().enumerate() {
                let classes = dot.class_list();
                let _ = if i == active {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        }

        /// Reveal fade-in elements whose top has entered the viewport
        fn reveal(&self, viewport_h: f64) {
            let threshold = viewport_h * f64::from(REVEAL_VIEWPORT_FRAC);
            for el in &self.reveals {
                if el.get_bounding_client_rect().top() < threshold {
                    let _ = el.class_list().add_1("visible");
                }
            }
        }

        /// Write per-section background colors from the ordinal gradient
        fn paint_sections(&self) {
            let count = self.sections.len();
            for (i, section) in self.sections.iter().enumerate() {
                let color = section_color(i, count, SECTION_COLOR_START, SECTION_COLOR_END);
                let _ = section
                    .style()
                    .set_property("background-color", &color.css());
            }
        }

        /// Give each timeline dot a tooltip from its section heading
        fn label_dots(&self) {
            for (dot, section) in self.dots.iter().zip(&self.sections) {
                if let Some(heading) = section.query_selector("h2, h3").ok().flatten() {
                    if let Some(text) = heading.text_content() {
                        let _ = dot.set_attribute("title", text.trim());
                    }
                }
            }
        }
    }

    fn setup_scrollmap(window: &Window, document: &Document) -> Result<(), JsValue> {
        let timeline: HtmlElement = document
            .get_element_by_id("timeline")
            .ok_or_else(|| JsValue::from_str("missing #timeline"))?
            .dyn_into()?;
        let marker: HtmlElement = document
            .get_element_by_id("timeline-marker")
            .ok_or_else(|| JsValue::from_str("missing #timeline-marker"))?
            .dyn_into()?;
        let sections = elements_from(document.query_selector_all("main section")?)?;
        let dots = elements_from(document.query_selector_all(".timeline-dot")?)?;
        let reveals = elements_from(document.query_selector_all(".fade-in")?)?;

        let map = measure_map(window, &timeline, &sections, &dots)?;
        log::info!("scrollmap wired over {} sections", map.len());

        let wiring = Rc::new(RefCell::new(ScrollWiring {
            map,
            tracker: ScrollTracker::new(SCROLL_IDLE_MS),
            sections,
            dots,
            marker,
            reveals,
        }));

        // Initial pass before the first scroll event arrives
        {
            let mut w = wiring.borrow_mut();
            w.paint_sections();
            w.label_dots();
            w.on_scroll(window, js_sys::Date::now());
        }

        // One idle callback reused by every debounce timeout; stale timeouts
        // see a fresh tracker timestamp and do nothing.
        let idle_cb: Rc<Closure<dyn FnMut()>> = {
            let wiring = wiring.clone();
            Rc::new(Closure::<dyn FnMut()>::new(move || {
                let w = wiring.borrow();
                if w.tracker.is_idle(js_sys::Date::now()) {
                    let _ = w.marker.class_list().add_1("idle");
                }
            }))
        };

        // Scroll
        {
            let wiring = wiring.clone();
            let window2 = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                wiring.borrow_mut().on_scroll(&window2, js_sys::Date::now());
                let _ = window2.set_timeout_with_callback_and_timeout_and_arguments_0(
                    (*idle_cb).as_ref().unchecked_ref(),
                    SCROLL_IDLE_MS as i32,
                );
            });
            window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize invalidates every measured box
        {
            let wiring = wiring.clone();
            let window2 = window.clone();
            let timeline = timeline.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut w = wiring.borrow_mut();
                match measure_map(&window2, &timeline, &w.sections, &w.dots) {
                    Ok(map) => w.map = map,
                    Err(e) => {
                        log::warn!("section re-measure failed: {e:?}");
                        return;
                    }
                }
                w.paint_sections();
                w.place_marker(window2.scroll_y().unwrap_or(0.0) + viewport_height(&window2) / 2.0);
                w.reveal(viewport_height(&window2));
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Measure section centers in document coordinates and dot anchors
    /// relative to the timeline track
    fn measure_map(
        window: &Window,
        timeline: &HtmlElement,
        sections: &[HtmlElement],
        dots: &[HtmlElement],
    ) -> Result<SectionMap, JsValue> {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let track_top = timeline.get_bounding_client_rect().top();

        let centers = sections
            .iter()
            .map(|s| {
                let r = s.get_bounding_client_rect();
                r.top() + scroll_y + r.height() / 2.0
            })
            .collect();
        let anchors = dots
            .iter()
            .map(|d| {
                let r = d.get_bounding_client_rect();
                r.top() - track_top + r.height() / 2.0
            })
            .collect();

        SectionMap::new(centers, anchors).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn viewport_height(window: &Window) -> f64 {
        window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn setup_carousel(document: &Document) -> Result<(), JsValue> {
        let Some(root) = document.get_element_by_id("carousel") else {
            log::info!("carousel: no #carousel element, skipping");
            return Ok(());
        };
        let viewport: HtmlElement = root
            .query_selector(".carousel-viewport")?
            .ok_or_else(|| JsValue::from_str("carousel has no .carousel-viewport"))?
            .dyn_into()?;
        let track: HtmlElement = root
            .query_selector(".carousel-track")?
            .ok_or_else(|| JsValue::from_str("carousel has no .carousel-track"))?
            .dyn_into()?;
        let slides = elements_from(root.query_selector_all(".carousel-slide")?)?;

        let widths = slides
            .iter()
            .map(|s| s.get_bounding_client_rect().width())
            .collect();
        let carousel = Carousel::new(widths).map_err(|e| JsValue::from_str(&e.to_string()))?;
        apply_carousel(&carousel, &viewport, &track);
        log::info!("carousel wired with {} slides", carousel.len());
        let carousel = Rc::new(RefCell::new(carousel));

        if let Some(btn) = root.query_selector(".carousel-prev")? {
            let carousel = carousel.clone();
            let viewport = viewport.clone();
            let track = track.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut c = carousel.borrow_mut();
                c.prev();
                apply_carousel(&c, &viewport, &track);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = root.query_selector(".carousel-next")? {
            let carousel = carousel.clone();
            let viewport = viewport.clone();
            let track = track.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut c = carousel.borrow_mut();
                c.next();
                apply_carousel(&c, &viewport, &track);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Slide widths settle as images decode; re-measure on each load
        for (i, slide) in slides.iter().enumerate() {
            if let Some(img) = slide.query_selector("img")? {
                let carousel = carousel.clone();
                let slide = slide.clone();
                let viewport = viewport.clone();
                let track = track.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let width = slide.get_bounding_client_rect().width();
                    let mut c = carousel.borrow_mut();
                    c.set_width(i, width);
                    apply_carousel(&c, &viewport, &track);
                });
                img.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    fn apply_carousel(carousel: &Carousel, viewport: &HtmlElement, track: &HtmlElement) {
        let _ = track
            .style()
            .set_property("transform", &format!("translateX(-{}px)", carousel.offset()));
        let _ = viewport
            .style()
            .set_property("width", &format!("{}px", carousel.current_width()));
    }

    fn setup_minigame(window: &Window, document: &Document, tuning: &Tuning) -> Result<(), JsValue> {
        let Some(canvas) = document.get_element_by_id("game-canvas") else {
            log::info!("minigame: no #game-canvas element, skipping");
            return Ok(());
        };
        let Some(launch) = document.get_element_by_id("game-start") else {
            log::info!("minigame: no #game-start button, skipping");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = canvas
            .dyn_into()
            .map_err(|_| JsValue::from_str("#game-canvas is not a canvas"))?;

        let game = Game::new(window, canvas, tuning.clone())?;
        game.painter.draw(&game.state);
        let game = Rc::new(RefCell::new(game));

        // Launch button starts a fresh run unless one is already going
        {
            let game = game.clone();
            let window = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        return;
                    }
                    let seed = js_sys::Date::now() as u64;
                    if let Err(e) = g.restart(&window, seed) {
                        log::error!("minigame failed to start: {e:?}");
                        return;
                    }
                    log::info!("minigame started with seed {seed}");
                }
                request_frame(game.clone());
            });
            launch.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Steering: key-down snaps to a lane, key-up releases it
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != GamePhase::Running {
                    return;
                }
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        event.prevent_default();
                        g.input.steer = Some(Lane::Left);
                    }
                    "ArrowRight" | "d" | "D" => {
                        event.prevent_default();
                        g.input.steer = Some(Lane::Right);
                    }
                    "Escape" => g.state.cancel(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let released = match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => Some(Lane::Left),
                    "ArrowRight" | "d" | "D" => Some(Lane::Right),
                    _ => None,
                };
                let mut g = game.borrow_mut();
                if released.is_some() && g.input.steer == released {
                    g.input.steer = None;
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        log::info!("minigame wired");
        Ok(())
    }

    fn request_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| game_loop(game, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.advance(time);
            g.painter.draw(&g.state);
            g.update_hud();
            g.state.phase == GamePhase::Running
        };

        // The chain ends at game over; the launch button starts a new one
        if running {
            request_frame(game);
        } else {
            log::info!("run ended with score {}", game.borrow().state.score);
        }
    }

    fn setup_egg_triggers(document: &Document) {
        let triggers: [(&str, fn(&Document) -> Result<(), JsValue>); 3] = [
            ("egg-winter", fx::winter::launch),
            ("egg-hike", fx::hike::launch),
            ("egg-gp", fx::gp::launch),
        ];

        for (id, launch) in triggers {
            let Some(el) = document.get_element_by_id(id) else {
                log::info!("egg trigger #{id} not present, skipping");
                continue;
            };
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Err(e) = launch(&document) {
                    log::warn!("easter egg failed to start: {e:?}");
                }
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn elements_from(list: web_sys::NodeList) -> Result<Vec<HtmlElement>, JsValue> {
        let mut out = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                out.push(node.dyn_into()?);
            }
        }
        Ok(out)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("folio-fx (native) starting...");
    log::info!("Page wiring needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use folio_fx::Tuning;
    use folio_fx::sim::{GamePhase, GameState, Lane, TickInput, tick};

    let mut state = GameState::new(7, Tuning::default(), 480.0, 640.0);
    state.start();

    let mut frames: u64 = 0;
    while state.phase == GamePhase::Running && frames < 600 {
        // Weave between lanes every 45 frames
        let lane = if (frames / 45) % 2 == 0 {
            Lane::Left
        } else {
            Lane::Right
        };
        let input = TickInput { steer: Some(lane) };
        tick(&mut state, &input, 1000.0 / 60.0);
        frames += 1;
    }

    assert_eq!(state.score, frames, "score counts running frames");
    println!("✓ Headless demo: {} frames, final score {}", frames, state.score);
}

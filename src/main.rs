//! Hazard Runner entry point
//!
//! In the browser this wires the game to the DOM and runs the frame loop.
//! Natively it plays a seeded headless session with a simple bot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent,
    };

    use hazard_runner::game::{Collaborators, Game, ScoreSink};
    use hazard_runner::leaderboard::PersistentLeaderboard;
    use hazard_runner::platform::{LocalStorage, format_relative, now_ms};
    use hazard_runner::questions::{Question, QuestionBank};
    use hazard_runner::renderer::CanvasRenderer;
    use hazard_runner::scheduler::{FrameScheduler, FrameToken};
    use hazard_runner::settings::{QualityPreset, Settings};
    use hazard_runner::tuning::Tuning;
    use hazard_runner::ui::{AnswerPanel, AnswerUi, ChoiceFeedback, Hud, HudSnapshot};

    type SharedGame = Rc<RefCell<Game>>;
    type SharedBoard = Rc<RefCell<PersistentLeaderboard<LocalStorage>>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    fn on_click<F: FnMut(MouseEvent) + 'static>(document: &Document, id: &str, handler: F) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// requestAnimationFrame-backed scheduler. Holds the game weakly so the
    /// game and its own scheduler do not keep each other alive.
    struct RafScheduler {
        game: Weak<RefCell<Game>>,
        pending: Option<(FrameToken, i32)>,
    }

    impl FrameScheduler for RafScheduler {
        fn request(&mut self, token: FrameToken) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let game = self.game.clone();
            let callback = Closure::once_into_js(move |_time: f64| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().frame(token);
                }
            });
            match window.request_animation_frame(callback.unchecked_ref()) {
                Ok(handle) => self.pending = Some((token, handle)),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }

        fn cancel(&mut self, token: FrameToken) {
            if let Some((pending, handle)) = self.pending {
                if pending == token {
                    self.pending = None;
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(handle);
                    }
                }
            }
        }
    }

    struct DomHud {
        document: Document,
    }

    impl Hud for DomHud {
        fn update(&mut self, hud: &HudSnapshot) {
            set_text(&self.document, "score", &hud.score_text());
            set_text(&self.document, "speed", &hud.speed_text());
            set_text(&self.document, "lives", &hud.lives_text());
        }
    }

    /// Quiz modal. Option buttons feed the shared `AnswerPanel`; the
    /// continue button (wired in `run`) sends the outcome to the game.
    struct DomAnswerUi {
        document: Document,
        panel: Rc<RefCell<AnswerPanel>>,
        handlers: Vec<Closure<dyn FnMut(MouseEvent)>>,
    }

    impl DomAnswerUi {
        fn option_buttons(&self) -> Vec<HtmlButtonElement> {
            let Some(options) = self.document.get_element_by_id("quiz-options") else {
                return Vec::new();
            };
            let children = options.children();
            (0..children.length())
                .filter_map(|i| children.item(i))
                .filter_map(|el| el.dyn_into::<HtmlButtonElement>().ok())
                .collect()
        }
    }

    fn show_feedback(document: &Document, feedback: &ChoiceFeedback) {
        if let Some(options) = document.get_element_by_id("quiz-options") {
            let children = options.children();
            for i in 0..children.length() {
                let Some(el) = children.item(i) else { continue };
                let index = i as usize;
                if Some(index) == feedback.correct_index {
                    let _ = el.class_list().add_1("correct");
                } else if index == feedback.chosen {
                    let _ = el.class_list().add_1("wrong");
                }
                if let Ok(button) = el.dyn_into::<HtmlButtonElement>() {
                    button.set_disabled(true);
                }
            }
        }
        set_text(document, "quiz-feedback", &feedback.message);
        if let Some(btn) = document.get_element_by_id("quiz-continue") {
            set_hidden(&btn, false);
        }
    }

    impl AnswerUi for DomAnswerUi {
        fn show_question(&mut self, quiz_id: u32, question: &Question) {
            self.panel.borrow_mut().open(quiz_id, question.clone());

            let document = &self.document;
            set_text(document, "quiz-prompt", &question.prompt);
            set_text(document, "quiz-feedback", "");
            if let Some(btn) = document.get_element_by_id("quiz-continue") {
                set_hidden(&btn, true);
            }

            let Some(options) = document.get_element_by_id("quiz-options") else {
                log::error!("Quiz options container missing");
                return;
            };
            options.set_inner_html("");
            self.handlers.clear();

            for (index, option) in question.options.iter().enumerate() {
                let Ok(button) = document.create_element("button") else {
                    continue;
                };
                button.set_class_name("quiz-option");
                button.set_text_content(Some(&option.text));

                let panel = self.panel.clone();
                let doc = document.clone();
                let handler = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let feedback = panel.borrow_mut().choose(index);
                    if let Some(feedback) = feedback {
                        show_feedback(&doc, &feedback);
                    }
                });
                let _ = button
                    .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
                let _ = options.append_child(&button);
                self.handlers.push(handler);
            }

            if let Some(modal) = document.get_element_by_id("quiz-modal") {
                set_hidden(&modal, false);
            }
            if let Some(first) = self.option_buttons().first() {
                let _ = first.focus();
            }
        }
    }

    /// Records finished runs and refreshes the leaderboard list
    struct BoardSink {
        board: SharedBoard,
        document: Document,
    }

    impl ScoreSink for BoardSink {
        fn record_run(&mut self, final_score: f32, at: f64) {
            self.board.borrow_mut().record_run(final_score, at);
            render_board(&self.document, &self.board);
        }
    }

    fn render_board(document: &Document, board: &SharedBoard) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_inner_html("");

        let now = now_ms();
        let board = board.borrow();
        let entries = board.board().entries();
        if entries.is_empty() {
            if let Ok(li) = document.create_element("li") {
                li.set_class_name("empty");
                li.set_text_content(Some("No scores yet"));
                let _ = list.append_child(&li);
            }
            return;
        }
        for entry in entries {
            if let Ok(li) = document.create_element("li") {
                let text = format!(
                    "{} - {} ({})",
                    entry.name,
                    entry.score,
                    format_relative(now, entry.at)
                );
                li.set_text_content(Some(&text));
                let _ = list.append_child(&li);
            }
        }
    }

    fn setup_input(document: &Document, canvas: &HtmlCanvasElement, game: &SharedGame) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().jump();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let g = game.clone();
        on_click(document, "jump-btn", move |_| {
            g.borrow_mut().jump();
        });
        let g = game.clone();
        on_click(document, "restart-btn", move |_| {
            if g.borrow_mut().restart() {
                log::info!("Restarted by player");
            }
        });
    }

    fn setup_quiz_continue(document: &Document, game: &SharedGame, panel: &Rc<RefCell<AnswerPanel>>) {
        let game = game.clone();
        let panel = panel.clone();
        let doc = document.clone();
        on_click(document, "quiz-continue", move |_| {
            let confirmed = panel.borrow_mut().confirm();
            let Some((quiz_id, outcome)) = confirmed else {
                return;
            };
            if let Some(modal) = doc.get_element_by_id("quiz-modal") {
                set_hidden(&modal, true);
            }
            // Rejections are logged by the game
            let _ = game.borrow_mut().answer(quiz_id, outcome);
        });
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("player-name")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn setup_leaderboard(document: &Document, game: &SharedGame, board: &SharedBoard) {
        if let Some(input) = name_input(document) {
            input.set_value(board.borrow().board().remembered_name());
        }

        let b = board.clone();
        let doc = document.clone();
        on_click(document, "remember-name-btn", move |_| {
            if let Some(input) = name_input(&doc) {
                b.borrow_mut().remember_name(&input.value());
                log::info!("Remembered player name");
            }
        });

        let (b, g, doc) = (board.clone(), game.clone(), document.clone());
        on_click(document, "save-score-btn", move |_| {
            if let Some(input) = name_input(&doc) {
                b.borrow_mut().remember_name(&input.value());
            }
            let score = g.borrow().state().score;
            if let Some(rank) = b.borrow_mut().save_now(score, now_ms()) {
                log::info!("Saved score at rank {}", rank);
            }
            render_board(&doc, &b);
        });

        let (b, doc) = (board.clone(), document.clone());
        on_click(document, "clear-board-btn", move |_| {
            b.borrow_mut().clear();
            render_board(&doc, &b);
        });

        let (b, doc) = (board.clone(), document.clone());
        on_click(document, "export-btn", move |_| {
            let json = b.borrow().export_json();
            if let Err(e) = download_json(&doc, "hazard_runner_leaderboard.json", &json) {
                log::warn!("Export failed: {:?}", e);
            }
        });

        if let Some(el) = document.get_element_by_id("import-file") {
            let (b, doc) = (board.clone(), document.clone());
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                input.set_value("");
                let (b, doc) = (b.clone(), doc.clone());
                wasm_bindgen_futures::spawn_local(async move {
                    let text = match JsFuture::from(file.text()).await {
                        Ok(value) => value.as_string().unwrap_or_default(),
                        Err(e) => {
                            log::warn!("Could not read import file: {:?}", e);
                            return;
                        }
                    };
                    let result = b.borrow_mut().import_json(&text);
                    match result {
                        Ok(summary) => {
                            log::info!("Imported leaderboard: {:?}", summary);
                            if let Some(input) = name_input(&doc) {
                                input.set_value(b.borrow().board().remembered_name());
                            }
                            render_board(&doc, &b);
                        }
                        Err(e) => log::warn!("Import rejected: {}", e),
                    }
                });
            });
            let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keep an unfinished run when the page goes away
        if let Some(window) = web_sys::window() {
            let (b, g) = (board.clone(), game.clone());
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let score = g.borrow().state().score;
                b.borrow_mut().save_on_unload(score, now_ms());
            });
            let _ = window
                .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        render_board(document, board);
    }

    fn download_json(document: &Document, filename: &str, json: &str) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&JsValue::from_str(json));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/json");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)?;

        let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
        web_sys::Url::revoke_object_url(&url)
    }

    fn setup_settings(document: &Document, renderer: &Rc<RefCell<CanvasRenderer>>, settings: Settings) {
        let settings = Rc::new(RefCell::new(settings));

        if let Some(select) = document
            .get_element_by_id("quality-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.borrow().quality.as_str());
            let (s, r) = (settings.clone(), renderer.clone());
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(select) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                else {
                    return;
                };
                if let Some(preset) = QualityPreset::from_name(&select.value()) {
                    s.borrow_mut().quality = preset;
                    apply_settings(&s.borrow(), &r);
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(checkbox) = document
            .get_element_by_id("reduced-motion")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            checkbox.set_checked(settings.borrow().reduced_motion);
            let (s, r) = (settings.clone(), renderer.clone());
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(checkbox) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                s.borrow_mut().reduced_motion = checkbox.checked();
                apply_settings(&s.borrow(), &r);
            });
            let _ = checkbox.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn apply_settings(settings: &Settings, renderer: &Rc<RefCell<CanvasRenderer>>) {
        renderer.borrow_mut().set_settings(settings.clone());
        settings.save(&mut LocalStorage::open());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hazard Runner starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let settings = Settings::load(&LocalStorage::open());
        let Some(renderer) = CanvasRenderer::new(&canvas, window.device_pixel_ratio(), settings.clone())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };
        let renderer = Rc::new(RefCell::new(renderer));

        let board: SharedBoard = Rc::new(RefCell::new(PersistentLeaderboard::open(
            LocalStorage::open(),
        )));
        let panel = Rc::new(RefCell::new(AnswerPanel::new()));

        let seed = js_sys::Date::now() as u64;
        let game: SharedGame = Rc::new_cyclic(|weak| {
            let io = Collaborators {
                renderer: Box::new(renderer.clone()),
                hud: Box::new(DomHud {
                    document: document.clone(),
                }),
                answer_ui: Box::new(DomAnswerUi {
                    document: document.clone(),
                    panel: panel.clone(),
                    handlers: Vec::new(),
                }),
                score_sink: Box::new(BoardSink {
                    board: board.clone(),
                    document: document.clone(),
                }),
                scheduler: Box::new(RafScheduler {
                    game: weak.clone(),
                    pending: None,
                }),
                clock: now_ms,
            };
            RefCell::new(Game::new(seed, Tuning::default(), QuestionBank::default(), io))
        });

        setup_input(&document, &canvas, &game);
        setup_quiz_continue(&document, &game, &panel);
        setup_leaderboard(&document, &game, &board);
        setup_settings(&document, &renderer, settings);

        if let Some(loading) = document.get_element_by_id("loading") {
            set_hidden(&loading, true);
        }

        game.borrow_mut().start();
        log::info!("Hazard Runner running with seed {}", seed);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hazard_runner::game::{Collaborators, Game};
    use hazard_runner::leaderboard::PersistentLeaderboard;
    use hazard_runner::platform::{MemoryStorage, now_ms};
    use hazard_runner::questions::{Question, QuestionBank};
    use hazard_runner::renderer::{Frame, Renderer};
    use hazard_runner::scheduler::ManualScheduler;
    use hazard_runner::sim::{GameState, QuizOutcome, Resolution};
    use hazard_runner::tuning::Tuning;
    use hazard_runner::ui::{AnswerUi, Hud, HudSnapshot};

    /// Command-line options
    #[derive(Debug)]
    pub struct Options {
        pub seed: u64,
        pub frames: u64,
        /// Chance the bot picks the right answer
        pub accuracy: f64,
        pub tuning: Option<PathBuf>,
        pub questions: Option<PathBuf>,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seed: 42,
                frames: 20_000,
                accuracy: 0.75,
                tuning: None,
                questions: None,
            }
        }
    }

    pub const USAGE: &str = "usage: hazard-runner [--seed N] [--frames N] [--accuracy P] \
                             [--questions FILE] [TUNING.json]";

    impl Options {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut options = Self::default();
            while let Some(arg) = args.next() {
                let mut value = |name: &str| {
                    args.next()
                        .ok_or_else(|| format!("{name} needs a value"))
                };
                match arg.as_str() {
                    "--seed" => {
                        options.seed = value("--seed")?
                            .parse()
                            .map_err(|e| format!("bad seed: {e}"))?
                    }
                    "--frames" => {
                        options.frames = value("--frames")?
                            .parse()
                            .map_err(|e| format!("bad frame count: {e}"))?
                    }
                    "--accuracy" => {
                        let p: f64 = value("--accuracy")?
                            .parse()
                            .map_err(|e| format!("bad accuracy: {e}"))?;
                        if p.is_nan() {
                            return Err("accuracy must be a number".to_string());
                        }
                        options.accuracy = p.clamp(0.0, 1.0);
                    }
                    "--questions" => options.questions = Some(value("--questions")?.into()),
                    flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
                    path => options.tuning = Some(path.into()),
                }
            }
            Ok(options)
        }
    }

    struct HeadlessRenderer;

    impl Renderer for HeadlessRenderer {
        fn render(&mut self, frame: &Frame<'_>) {
            log::trace!(
                "frame {}: runner y {:.1}, {} obstacles",
                frame.background.tick,
                frame.runner.pos.y,
                frame.obstacles.len()
            );
        }
    }

    struct LogHud;

    impl Hud for LogHud {
        fn update(&mut self, hud: &HudSnapshot) {
            log::trace!("{} | {} | {}", hud.score_text(), hud.speed_text(), hud.lives_text());
        }
    }

    /// Queues shown questions for the bot to answer
    struct BotAnswers(Rc<RefCell<VecDeque<(u32, Question)>>>);

    impl AnswerUi for BotAnswers {
        fn show_question(&mut self, quiz_id: u32, question: &Question) {
            log::debug!("Quiz {}: {}", quiz_id, question.prompt);
            self.0.borrow_mut().push_back((quiz_id, question.clone()));
        }
    }

    /// Jump once the nearest obstacle is within a randomized reaction window
    fn should_jump(state: &GameState, rng: &mut Pcg32) -> bool {
        if !state.runner.on_ground {
            return false;
        }
        let front = state.runner.pos.x + state.runner.size.x;
        let Some(gap) = state
            .obstacles
            .iter()
            .map(|o| o.pos.x - front)
            .filter(|gap| *gap >= 0.0)
            .reduce(f32::min)
        else {
            return false;
        };
        gap < state.speed * rng.random_range(2.0..12.0)
    }

    fn choose_answer(question: &Question, accuracy: f64, rng: &mut Pcg32) -> QuizOutcome {
        let index = match question.correct_index() {
            Some(correct) if rng.random_bool(accuracy) => correct,
            _ => rng.random_range(0..question.options.len()),
        };
        QuizOutcome::from(question.is_correct(index).unwrap_or(false))
    }

    fn load<T>(path: &Path, parse: impl FnOnce(&str) -> Result<T, String>) -> Result<T, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        parse(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    #[derive(Debug, Default)]
    struct Stats {
        quizzes: u32,
        correct: u32,
        sessions_ended: u32,
        best: f32,
    }

    pub fn run(options: Options) -> Result<(), String> {
        let tuning = match &options.tuning {
            Some(path) => load(path, |s| Tuning::from_json(s).map_err(|e| e.to_string()))?,
            None => Tuning::default(),
        };
        let bank = match &options.questions {
            Some(path) => load(path, |s| QuestionBank::from_json(s).map_err(|e| e.to_string()))?,
            None => QuestionBank::default(),
        };

        let scheduler = ManualScheduler::new();
        let board = Rc::new(RefCell::new(PersistentLeaderboard::open(MemoryStorage::new())));
        let quizzes = Rc::new(RefCell::new(VecDeque::new()));
        let io = Collaborators {
            renderer: Box::new(HeadlessRenderer),
            hud: Box::new(LogHud),
            answer_ui: Box::new(BotAnswers(quizzes.clone())),
            score_sink: Box::new(board.clone()),
            scheduler: Box::new(scheduler.clone()),
            clock: now_ms,
        };

        let mut game = Game::new(options.seed, tuning, bank, io);
        let mut bot = Pcg32::seed_from_u64(options.seed.wrapping_add(1));
        let mut stats = Stats::default();
        game.start();

        for _ in 0..options.frames {
            let Some(token) = scheduler.take_next() else {
                log::warn!("Frame loop stopped early");
                break;
            };
            if should_jump(game.state(), &mut bot) {
                game.jump();
            }
            game.frame(token);
            stats.best = stats.best.max(game.state().score);

            let shown = quizzes.borrow_mut().pop_front();
            if let Some((quiz_id, question)) = shown {
                let outcome = choose_answer(&question, options.accuracy, &mut bot);
                stats.quizzes += 1;
                if outcome == QuizOutcome::Correct {
                    stats.correct += 1;
                }
                if let Ok(Resolution::LivesExhausted { .. }) = game.answer(quiz_id, outcome) {
                    stats.sessions_ended += 1;
                }
            }
        }

        let state = game.state();
        log::info!(
            "Finished {} frames: score {:.0}, speed {}, lives {}",
            options.frames,
            state.score,
            state.speed,
            state.lives
        );
        log::info!(
            "Quizzes {} ({} correct), sessions ended {}, best score {:.0}",
            stats.quizzes,
            stats.correct,
            stats.sessions_ended,
            stats.best
        );
        for (rank, entry) in board.borrow().board().entries().iter().enumerate() {
            log::info!("#{} {} {}", rank + 1, entry.name, entry.score);
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hazard Runner (headless) starting...");

    let options = match headless::Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", headless::USAGE);
            std::process::exit(2);
        }
    };
    if let Err(e) = headless::run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

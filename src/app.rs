use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Settings;
use crate::error::ArcadeError;
use crate::games::GameKind;
use crate::input::translate;
use crate::random::{RandomSource, SeededRng};
use crate::scheduler::{Clock, SystemClock};
use crate::scores::HighScores;
use crate::session::{Callbacks, Session, Status};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Home,
    Game(GameKind),
}

const TABS: [Tab; 6] = [
    Tab::Home,
    Tab::Game(GameKind::Snake),
    Tab::Game(GameKind::Flyer),
    Tab::Game(GameKind::Memory),
    Tab::Game(GameKind::Puzzle),
    Tab::Game(GameKind::Quiz),
];

impl Tab {
    pub fn all() -> &'static [Tab] {
        &TABS
    }

    pub fn title(&self) -> String {
        match self {
            Tab::Home => " Home ".to_string(),
            Tab::Game(kind) => format!(" {} ", kind.name()),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Game(kind) => kind.index() + 1,
        }
    }
}

/// One game's session plus the live score its callbacks feed.
pub struct GameSlot {
    pub session: Session,
    pub live_score: Rc<Cell<u32>>,
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub show_high_scores: bool,
    /// One-line message on the home screen, cleared by the next key.
    pub notice: Option<String>,
    pub slots: Vec<GameSlot>,
    pub high_scores: HighScores,
    settings: Settings,
    clock: Box<dyn Clock>,
    finished: Rc<RefCell<Vec<(GameKind, u32)>>>,
}

impl App {
    pub fn new(settings: Settings, requested: Option<&str>) -> Result<Self, ArcadeError> {
        Self::with_parts(settings, requested, HighScores::load(), Box::new(SystemClock::new()))
    }

    fn with_parts(
        settings: Settings,
        requested: Option<&str>,
        high_scores: HighScores,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ArcadeError> {
        let finished = Rc::new(RefCell::new(Vec::new()));
        let mut slots = Vec::with_capacity(GameKind::all().len());
        for &kind in GameKind::all() {
            let live_score = Rc::new(Cell::new(0));
            let live = Rc::clone(&live_score);
            let done = Rc::clone(&finished);
            let callbacks = Callbacks {
                on_score_change: Box::new(move |score| live.set(score)),
                on_game_end: Box::new(move |score| done.borrow_mut().push((kind, score))),
            };
            let rng: Box<dyn RandomSource> = match settings.seed {
                Some(seed) => Box::new(SeededRng::new(seed)),
                None => Box::new(SeededRng::from_entropy()),
            };
            let session = Session::open(kind.id(), &settings, rng, callbacks)?;
            slots.push(GameSlot { session, live_score });
        }

        let mut app = Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            show_high_scores: false,
            notice: None,
            slots,
            high_scores,
            settings,
            clock,
            finished,
        };

        if let Some(id) = requested {
            match GameKind::from_id(id) {
                Ok(kind) => {
                    app.selected_game = kind.index();
                    app.switch_to(Tab::Game(kind));
                }
                Err(e) => {
                    log::warn!("{}", e);
                    app.notice = Some(format!("Game not found: {}", id));
                }
            }
        }
        Ok(app)
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn slot(&self, kind: GameKind) -> &GameSlot {
        &self.slots[kind.index()]
    }

    fn slot_mut(&mut self, kind: GameKind) -> &mut GameSlot {
        &mut self.slots[kind.index()]
    }

    pub fn on_tick(&mut self) {
        let now = self.now();
        if let Tab::Game(kind) = self.current_tab {
            self.slot_mut(kind).session.pump(now);
        }
        self.record_finished();
    }

    fn record_finished(&mut self) {
        let finished: Vec<(GameKind, u32)> = self.finished.borrow_mut().drain(..).collect();
        for (kind, score) in finished {
            self.high_scores.submit(kind, &self.settings.player_name, score);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.notice.take().is_some() {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc if self.current_tab != Tab::Home => {
                self.switch_to(Tab::Home);
                return;
            }
            _ => {}
        }

        match self.current_tab {
            Tab::Home => self.on_home_key(key),
            Tab::Game(kind) => self.on_game_key(kind, key),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        let count = GameKind::all().len();
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(&kind) = GameKind::all().get(idx) {
                    self.selected_game = idx;
                    self.switch_to(Tab::Game(kind));
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.show_high_scores = !self.show_high_scores;
            }
            KeyCode::Right | KeyCode::Down => {
                self.selected_game = (self.selected_game + 1) % count;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_game = (self.selected_game + count - 1) % count;
            }
            KeyCode::Enter => {
                let kind = GameKind::all()[self.selected_game];
                self.switch_to(Tab::Game(kind));
            }
            _ => {}
        }
    }

    fn on_game_key(&mut self, kind: GameKind, key: KeyEvent) {
        let now = self.now();
        let slot = self.slot_mut(kind);
        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                let playing = slot.session.is_playing();
                slot.session.set_playing(!playing, now);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                slot.session.reset(now);
                slot.live_score.set(0);
            }
            _ => {
                if let Some(command) = translate(kind, &key) {
                    slot.session.submit(command);
                }
            }
        }
    }

    /// Leaving a game tab pauses it; entering one resumes it.
    fn switch_to(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        let now = self.now();
        if let Tab::Game(kind) = self.current_tab {
            self.slot_mut(kind).session.set_playing(false, now);
        }
        if let Tab::Game(kind) = tab {
            self.slot_mut(kind).session.set_playing(true, now);
        }
        self.current_tab = tab;
    }

    fn next_tab(&mut self) {
        let idx = self.current_tab.index();
        self.switch_to(TABS[(idx + 1) % TABS.len()]);
    }

    fn prev_tab(&mut self) {
        let idx = self.current_tab.index();
        self.switch_to(TABS[(idx + TABS.len() - 1) % TABS.len()]);
    }

    /// Report unfinished games at their current score and bank play time.
    pub fn shutdown(&mut self) {
        for slot in &mut self.slots {
            let session = &mut slot.session;
            if session.started_at().is_some() && session.status() != Status::Ended {
                session.abandon();
            }
        }
        self.record_finished();
        for slot in &self.slots {
            let session = &slot.session;
            if session.started_at().is_none() {
                continue;
            }
            log::info!(
                "{}: {} ticks over {:?}",
                session.kind().id(),
                session.elapsed_ticks(),
                session.play_time()
            );
            self.high_scores.add_play_time(session.kind(), session.play_time());
        }
        self.high_scores.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock the test moves by hand.
    struct ManualClock(Rc<Cell<Duration>>);

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.0.get()
        }
    }

    fn app(requested: Option<&str>) -> (App, Rc<Cell<Duration>>) {
        let time = Rc::new(Cell::new(Duration::ZERO));
        let settings = Settings {
            seed: Some(11),
            ..Settings::default()
        };
        let app = App::with_parts(
            settings,
            requested,
            HighScores::in_memory(),
            Box::new(ManualClock(Rc::clone(&time))),
        )
        .unwrap();
        (app, time)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn unknown_game_shows_home_with_notice() {
        let (mut a, _) = app(Some("tetris"));
        assert_eq!(a.current_tab, Tab::Home);
        assert_eq!(a.notice.as_deref(), Some("Game not found: tetris"));
        // First key only dismisses the notice.
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);
    }

    #[test]
    fn requested_game_opens_running() {
        let (a, _) = app(Some("flappy"));
        assert_eq!(a.current_tab, Tab::Game(GameKind::Flyer));
        assert_eq!(a.slot(GameKind::Flyer).session.status(), Status::Running);
    }

    #[test]
    fn leaving_a_tab_pauses_its_game() {
        let (mut a, time) = app(None);
        press(&mut a, KeyCode::Char('1'));
        assert_eq!(a.slot(GameKind::Snake).session.status(), Status::Running);
        time.set(Duration::from_millis(300));
        a.on_tick();
        assert_eq!(a.slot(GameKind::Snake).session.elapsed_ticks(), 2);

        press(&mut a, KeyCode::Tab);
        assert_eq!(a.current_tab, Tab::Game(GameKind::Flyer));
        assert_eq!(a.slot(GameKind::Snake).session.status(), Status::Paused);

        press(&mut a, KeyCode::Esc);
        assert_eq!(a.current_tab, Tab::Home);
        assert_eq!(a.slot(GameKind::Flyer).session.status(), Status::Paused);
    }

    #[test]
    fn pause_key_toggles_and_q_does_not_quit_in_game() {
        let (mut a, _) = app(Some("quiz"));
        press(&mut a, KeyCode::Char('p'));
        assert_eq!(a.slot(GameKind::Quiz).session.status(), Status::Paused);
        press(&mut a, KeyCode::Char('p'));
        assert_eq!(a.slot(GameKind::Quiz).session.status(), Status::Running);
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
    }

    #[test]
    fn finished_games_reach_the_score_table() {
        let (mut a, time) = app(Some("quiz"));
        let mut t = 0;
        for _ in 0..5 {
            press(&mut a, KeyCode::Char('3'));
            for _ in 0..120 {
                t += 16;
                time.set(Duration::from_millis(t));
                a.on_tick();
            }
        }
        assert_eq!(a.slot(GameKind::Quiz).session.status(), Status::Ended);
        assert_eq!(a.slot(GameKind::Quiz).live_score.get(), 60);
        let best = a.high_scores.top_scores(GameKind::Quiz);
        assert_eq!(best[0].score, 60);
        assert_eq!(best[0].name, "PLAYER");
    }

    #[test]
    fn shutdown_reports_games_in_progress() {
        let (mut a, time) = app(Some("quiz"));
        press(&mut a, KeyCode::Char('3'));
        time.set(Duration::from_millis(100));
        a.on_tick();
        a.shutdown();
        assert_eq!(a.high_scores.games_played(GameKind::Quiz), 1);
        assert_eq!(a.high_scores.top_scores(GameKind::Quiz)[0].score, 20);
        assert_eq!(a.high_scores.games_played(GameKind::Snake), 0);
    }
}

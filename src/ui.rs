//! Session flow: menu, dashboard, tutorial and the active run
//!
//! [`App`] owns everything that outlives a single run (catalog, settings,
//! score store, audio) and at most one [`RunState`]. Front ends feed it key
//! presses, call [`App::update`] once per tick and draw [`App::frame`].

use crate::assets::SpriteCatalog;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{DEFAULT_PLAYER_NAME, MAX_NAME_LEN};
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::platform::Key;
use crate::renderer::{DrawList, build_play_frame, build_text_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, RunResult, RunState, TickInput, TickStatus, tick};

/// Characters that may not appear in a player name
const FORBIDDEN_NAME_CHARS: [char; 9] = ['/', '\\', '|', '<', '>', ':', '"', '?', '*'];

/// Which screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Dashboard,
    Tutorial,
    Playing,
}

/// Player name being typed on the menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
    text: String,
}

impl NameInput {
    /// Append a character if it is allowed and there is room.
    /// Returns whether it was accepted.
    pub fn push(&mut self, ch: char) -> bool {
        if ch.is_control() || FORBIDDEN_NAME_CHARS.contains(&ch) {
            return false;
        }
        if self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Name used for the run: trimmed, or the default when blank
    pub fn player_name(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Scores(HighScores),
    Unavailable(String),
}

impl DashboardView {
    pub fn lines(&self) -> Vec<String> {
        match self {
            DashboardView::Scores(scores) if scores.is_empty() => {
                vec!["No scores yet".to_string()]
            }
            DashboardView::Scores(scores) => scores.lines(),
            DashboardView::Unavailable(reason) => vec![
                "Scoreboard unavailable".to_string(),
                reason.clone(),
            ],
        }
    }
}

/// Map a simulation event to its sound, if it has one
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Jumped | GameEvent::WallJumped => Some(SoundEffect::Jump),
        GameEvent::Landed => Some(SoundEffect::Land),
        GameEvent::Milestone { .. } => Some(SoundEffect::ScoreMilestone),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::LevelUp { .. } => None,
    }
}

/// One game session
pub struct App {
    screen: Screen,
    catalog: SpriteCatalog,
    settings: Settings,
    store: Box<dyn ScoreStore>,
    audio: Box<dyn AudioSink>,
    name: NameInput,
    run: Option<RunState>,
    /// Inputs collected since the last tick
    pending: TickInput,
    dashboard: Option<DashboardView>,
    last_result: Option<RunResult>,
    /// Leaderboard place the last run reached, if it made the board
    last_rank: Option<usize>,
}

impl App {
    /// Build a session and start the background music
    pub fn new(
        catalog: SpriteCatalog,
        settings: Settings,
        store: Box<dyn ScoreStore>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        audio.start_music();
        Self {
            screen: Screen::Menu,
            catalog,
            settings,
            store,
            audio,
            name: NameInput::default(),
            run: None,
            pending: TickInput::default(),
            dashboard: None,
            last_result: None,
            last_rank: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The active run, if playing
    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Merge inputs for the next tick (used by the autopilot)
    pub fn queue_input(&mut self, input: TickInput) {
        self.pending.jump |= input.jump;
        self.pending.slide |= input.slide;
    }

    /// Handle one key-down event
    pub fn handle_key(&mut self, key: Key) {
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Dashboard => {
                if matches!(key, Key::Escape | Key::Char('b') | Key::Char('B')) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Tutorial => {
                if matches!(key, Key::Escape | Key::Enter | Key::Space) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Playing => self.play_key(key),
        }
    }

    fn menu_key(&mut self, key: Key) {
        match key {
            Key::Enter => self.start_run(),
            Key::Backspace => self.name.backspace(),
            Key::Tab => self.open_dashboard(),
            Key::F1 => self.screen = Screen::Tutorial,
            Key::Space => {
                self.name.push(' ');
            }
            Key::Char(ch) => {
                self.name.push(ch);
            }
            Key::Escape | Key::Up | Key::Down => {}
        }
    }

    fn play_key(&mut self, key: Key) {
        if key == Key::Escape {
            if let Some(run) = self.run.take() {
                log::info!(
                    "{} abandoned the run at score {}",
                    run.player_name,
                    run.score.score
                );
            }
            self.pending = TickInput::default();
            self.screen = Screen::Menu;
        } else if key.is_jump() {
            self.pending.jump = true;
        } else if key.is_slide() {
            self.pending.slide = true;
        }
    }

    /// Start a fresh run with the typed name
    pub fn start_run(&mut self) {
        let name = self.name.player_name();
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        log::info!("Run started for {name} (seed {seed})");
        let run = RunState::new(name, &self.catalog, seed).with_particles(self.settings.particles);
        self.run = Some(run);
        self.pending = TickInput::default();
        self.screen = Screen::Playing;
    }

    /// Reload the leaderboard and show it
    pub fn open_dashboard(&mut self) {
        let view = match HighScores::load(self.store.as_ref()) {
            Ok(scores) => DashboardView::Scores(scores),
            Err(err) => {
                log::warn!("Dashboard: {err}");
                DashboardView::Unavailable(err.to_string())
            }
        };
        self.dashboard = Some(view);
        self.screen = Screen::Dashboard;
    }

    /// Advance the active run by one tick. Returns the result when the run
    /// ends on this tick.
    pub fn update(&mut self) -> Option<RunResult> {
        if self.screen != Screen::Playing {
            return None;
        }
        let run = self.run.as_mut()?;
        let input = std::mem::take(&mut self.pending);
        let status = tick(run, &self.catalog, &input);

        for event in run.drain_events() {
            if let GameEvent::LevelUp { level } = event {
                log::info!("{} reached level {level}", run.player_name);
            }
            if let Some(effect) = sound_for(&event) {
                self.audio.play(effect);
            }
        }

        match status {
            TickStatus::Running => None,
            TickStatus::GameOver(result) => {
                self.finish_run(&result);
                Some(result)
            }
        }
    }

    fn finish_run(&mut self, result: &RunResult) {
        // Rank against the board as it was before this score joins it
        let rank = match HighScores::load(self.store.as_ref()) {
            Ok(board) => board.potential_rank(result.score),
            Err(err) => {
                log::warn!("Leaderboard unavailable: {err}");
                None
            }
        };
        self.last_rank = match self.store.save_score(&result.player_name, result.score) {
            Ok(()) => rank,
            Err(err) => {
                log::warn!("Could not save score for {}: {err}", result.player_name);
                None
            }
        };
        if let Some(rank) = self.last_rank {
            log::info!("{} placed #{rank} on the leaderboard", result.player_name);
        }
        self.last_result = Some(result.clone());
        self.run = None;
        self.screen = Screen::Menu;
    }

    fn menu_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Name: {}_", self.name.as_str()),
            "Enter - start".to_string(),
            "Tab - high scores".to_string(),
            "F1 - how to play".to_string(),
        ];
        if let Some(result) = &self.last_result {
            lines.push(format!("Last run: {} - {}", result.player_name, result.score));
        }
        if let Some(rank) = self.last_rank {
            lines.push(format!("New high score! Rank #{rank}"));
        }
        lines
    }

    fn tutorial_lines() -> Vec<String> {
        [
            "Space / Up - jump",
            "Down / S - slide",
            "Jump again while sliding down the wall",
            "Slide under flying obstacles",
            "Esc - back to menu",
        ]
        .iter()
        .map(|line| line.to_string())
        .collect()
    }

    /// Draw list for the current screen
    pub fn frame(&self) -> DrawList<'_> {
        match (self.screen, &self.run) {
            (Screen::Playing, Some(run)) => build_play_frame(run, &self.catalog),
            (Screen::Dashboard, _) => {
                let lines = self
                    .dashboard
                    .as_ref()
                    .map(DashboardView::lines)
                    .unwrap_or_default();
                build_text_frame(&self.catalog, "High Scores", &lines)
            }
            (Screen::Tutorial, _) => {
                build_text_frame(&self.catalog, "How to Play", &Self::tutorial_lines())
            }
            _ => build_text_frame(&self.catalog, "SUPER MARO", &self.menu_lines()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::persistence::{DisabledStore, MemoryStore, PersistenceError, ScoreRecord};
    use crate::sim::{Obstacle, ObstacleKind, hitbox};

    /// Audio sink that remembers what it was asked to play
    #[derive(Clone, Default)]
    struct RecordingAudio {
        played: Rc<RefCell<Vec<SoundEffect>>>,
        music_starts: Rc<RefCell<u32>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&self, effect: SoundEffect) {
            self.played.borrow_mut().push(effect);
        }

        fn start_music(&self) {
            *self.music_starts.borrow_mut() += 1;
        }
    }

    /// Store that shares its records with the test
    #[derive(Clone, Default)]
    struct SharedStore {
        inner: Rc<RefCell<MemoryStore>>,
    }

    impl ScoreStore for SharedStore {
        fn save_score(&mut self, name: &str, score: u64) -> Result<(), PersistenceError> {
            self.inner.borrow_mut().save_score(name, score)
        }

        fn top_scores(&self, n: usize) -> Result<Vec<ScoreRecord>, PersistenceError> {
            self.inner.borrow().top_scores(n)
        }
    }

    fn settings() -> Settings {
        Settings {
            seed: Some(11),
            ..Settings::default()
        }
    }

    fn app_with(store: Box<dyn ScoreStore>, audio: RecordingAudio) -> App {
        App::new(SpriteCatalog::procedural(), settings(), store, Box::new(audio))
    }

    fn type_name(app: &mut App, name: &str) {
        for ch in name.chars() {
            app.handle_key(Key::Char(ch));
        }
    }

    /// Put a ground crate right on top of the player's hitbox
    fn force_collision(app: &mut App) {
        let sprite = app.catalog.ground[0].clone();
        let run = app.run.as_mut().unwrap();
        let hb = hitbox(&run.player);
        run.obstacles
            .push(Obstacle::spawn(ObstacleKind::Ground, sprite, hb.left()));
    }

    #[test]
    fn test_name_input_rules() {
        let mut name = NameInput::default();
        assert!(name.push('A'));
        assert!(!name.push('/'));
        assert!(!name.push('*'));
        assert!(!name.push('\n'));
        for _ in 0..20 {
            name.push('x');
        }
        assert_eq!(name.as_str().chars().count(), MAX_NAME_LEN);
        name.backspace();
        assert_eq!(name.as_str().chars().count(), MAX_NAME_LEN - 1);
    }

    #[test]
    fn test_blank_name_defaults() {
        let mut name = NameInput::default();
        assert_eq!(name.player_name(), DEFAULT_PLAYER_NAME);
        name.push(' ');
        name.push('m');
        name.push(' ');
        assert_eq!(name.player_name(), "m");
    }

    #[test]
    fn test_music_starts_once() {
        let audio = RecordingAudio::default();
        let mut app = app_with(Box::new(MemoryStore::new()), audio.clone());
        app.handle_key(Key::Enter);
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(*audio.music_starts.borrow(), 1);
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app_with(Box::new(MemoryStore::new()), RecordingAudio::default());
        app.handle_key(Key::F1);
        assert_eq!(app.screen(), Screen::Tutorial);
        app.handle_key(Key::Space);
        assert_eq!(app.screen(), Screen::Menu);

        app.handle_key(Key::Tab);
        assert_eq!(app.screen(), Screen::Dashboard);
        app.handle_key(Key::Char('x'));
        assert_eq!(app.screen(), Screen::Dashboard);
        app.handle_key(Key::Char('b'));
        assert_eq!(app.screen(), Screen::Menu);

        app.handle_key(Key::Escape);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_letters_go_into_the_name() {
        let mut app = app_with(Box::new(MemoryStore::new()), RecordingAudio::default());
        type_name(&mut app, "dt sb");
        assert_eq!(app.name.as_str(), "dt sb");
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_enter_starts_a_run() {
        let mut app = app_with(Box::new(MemoryStore::new()), RecordingAudio::default());
        type_name(&mut app, "  Ann ");
        app.handle_key(Key::Enter);
        assert_eq!(app.screen(), Screen::Playing);
        let run = app.run().unwrap();
        assert_eq!(run.player_name, "Ann");
        assert_eq!(run.score.score, 0);
    }

    #[test]
    fn test_jump_key_plays_sound() {
        let audio = RecordingAudio::default();
        let mut app = app_with(Box::new(MemoryStore::new()), audio.clone());
        app.handle_key(Key::Enter);
        app.handle_key(Key::Space);
        assert_eq!(app.update(), None);
        assert!(app.run().unwrap().player.is_jumping);
        assert_eq!(audio.played.borrow().as_slice(), &[SoundEffect::Jump]);
    }

    #[test]
    fn test_escape_abandons_without_saving() {
        let store = SharedStore::default();
        let mut app = app_with(Box::new(store.clone()), RecordingAudio::default());
        app.handle_key(Key::Enter);
        for _ in 0..20 {
            app.update();
        }
        app.handle_key(Key::Escape);
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.run().is_none());
        assert!(app.last_result.is_none());
        assert!(store.inner.borrow().records().is_empty());
        // Not playing, so nothing advances
        assert_eq!(app.update(), None);
    }

    #[test]
    fn test_game_over_saves_and_returns_to_menu() {
        let store = SharedStore::default();
        let audio = RecordingAudio::default();
        let mut app = app_with(Box::new(store.clone()), audio.clone());
        type_name(&mut app, "Ann");
        app.handle_key(Key::Enter);
        for _ in 0..10 {
            app.update();
        }
        force_collision(&mut app);

        let result = app.update().unwrap();
        assert_eq!(result.player_name, "Ann");
        assert_eq!(result.score, 2);
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.last_result.as_ref(), Some(&result));
        assert_eq!(
            store.inner.borrow().records(),
            &[ScoreRecord::new("Ann", 2)]
        );
        assert_eq!(audio.played.borrow().last(), Some(&SoundEffect::GameOver));
        assert_eq!(app.last_rank(), Some(1));

        let frame = app.frame();
        assert!(frame.text_lines().any(|line| line == "Last run: Ann - 2"));
        assert!(frame.text_lines().any(|line| line == "New high score! Rank #1"));
    }

    #[test]
    fn test_low_score_misses_full_board() {
        let store = SharedStore::default();
        for score in 100..110 {
            store.inner.borrow_mut().save_score("pro", score).unwrap();
        }
        let mut app = app_with(Box::new(store.clone()), RecordingAudio::default());
        app.handle_key(Key::Enter);
        for _ in 0..10 {
            app.update();
        }
        force_collision(&mut app);
        assert_eq!(app.update().map(|r| r.score), Some(2));
        assert_eq!(app.last_rank(), None);
        assert_eq!(store.inner.borrow().records().len(), 11);
        let frame = app.frame();
        assert!(!frame.text_lines().any(|line| line.starts_with("New high score")));
    }

    #[test]
    fn test_rank_counts_earlier_scores() {
        let store = SharedStore::default();
        store.inner.borrow_mut().save_score("ann", 50).unwrap();
        store.inner.borrow_mut().save_score("bob", 1).unwrap();
        let mut app = app_with(Box::new(store), RecordingAudio::default());
        app.handle_key(Key::Enter);
        for _ in 0..10 {
            app.update();
        }
        force_collision(&mut app);
        assert_eq!(app.update().map(|r| r.score), Some(2));
        assert_eq!(app.last_rank(), Some(2));
    }

    #[test]
    fn test_store_failure_does_not_stop_play() {
        let mut app = app_with(
            Box::new(DisabledStore::new("read-only disk")),
            RecordingAudio::default(),
        );
        app.handle_key(Key::Enter);
        force_collision(&mut app);
        assert!(app.update().is_some());
        assert_eq!(app.screen(), Screen::Menu);

        // The menu still works and a new run can start
        app.handle_key(Key::Enter);
        assert_eq!(app.screen(), Screen::Playing);
    }

    #[test]
    fn test_dashboard_unavailable() {
        let mut app = app_with(
            Box::new(DisabledStore::new("read-only disk")),
            RecordingAudio::default(),
        );
        app.handle_key(Key::Tab);
        assert!(matches!(
            app.dashboard,
            Some(DashboardView::Unavailable(_))
        ));
        let frame = app.frame();
        assert!(frame.text_lines().any(|line| line == "Scoreboard unavailable"));
    }

    #[test]
    fn test_dashboard_lists_scores() {
        let store = SharedStore::default();
        store.inner.borrow_mut().save_score("ann", 5).unwrap();
        store.inner.borrow_mut().save_score("bob", 50).unwrap();
        let mut app = app_with(Box::new(store), RecordingAudio::default());
        app.handle_key(Key::Tab);
        let frame = app.frame();
        let lines: Vec<&str> = frame.text_lines().collect();
        assert_eq!(lines, vec!["High Scores", "1. bob - 50", "2. ann - 5"]);
    }

    #[test]
    fn test_event_sounds() {
        assert_eq!(sound_for(&GameEvent::WallJumped), Some(SoundEffect::Jump));
        assert_eq!(sound_for(&GameEvent::Landed), Some(SoundEffect::Land));
        assert_eq!(
            sound_for(&GameEvent::Milestone { score: 10 }),
            Some(SoundEffect::ScoreMilestone)
        );
        assert_eq!(sound_for(&GameEvent::LevelUp { level: 2 }), None);
    }
}

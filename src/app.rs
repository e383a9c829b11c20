use macroquad::input::KeyCode;
use macroquad::math::Vec2;
use macroquad::rand;

use crate::audio::Cue;
use crate::game::{Direction, GameOverReason, Session};
use crate::layout::{self, ButtonAction};
use crate::settings::{Settings, SettingsCommand};

const WAVE_SPEED: f32 = 0.4;
const FADE_PER_SECOND: f32 = 240.0;
const FADE_START: f32 = 255.0;
const GAME_OVER_INPUT_DELAY: f32 = 0.35;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Screen {
    Menu,
    Settings,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

/// Polled input for one frame.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum InputEvent {
    Key(KeyCode),
    Click(Vec2),
}

fn random_index() -> usize {
    rand::rand() as usize
}

/// Seed the food generator; without this every run replays the same foods.
pub fn seed_random(seed: u64) {
    rand::srand(seed);
}

fn direction_for(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

fn settings_command_for(key: KeyCode) -> Option<SettingsCommand> {
    match key {
        KeyCode::LeftBracket | KeyCode::Left => Some(SettingsCommand::NarrowGrid),
        KeyCode::RightBracket | KeyCode::Right => Some(SettingsCommand::WidenGrid),
        KeyCode::Comma | KeyCode::Down => Some(SettingsCommand::ShortenGrid),
        KeyCode::Period | KeyCode::Up => Some(SettingsCommand::HeightenGrid),
        KeyCode::Minus | KeyCode::KpSubtract => Some(SettingsCommand::SlowDown),
        KeyCode::Equal | KeyCode::KpAdd => Some(SettingsCommand::SpeedUp),
        KeyCode::S => Some(SettingsCommand::ToggleSound),
        KeyCode::T => Some(SettingsCommand::CycleTheme),
        _ => None,
    }
}

fn is_confirm(key: KeyCode) -> bool {
    matches!(key, KeyCode::Enter | KeyCode::KpEnter | KeyCode::Space)
}

/// Screen state machine plus everything the frame loop needs to draw.
pub struct App {
    settings: Settings,
    screen: Screen,
    session: Option<Session>,
    best_score: u32,
    wave_offset: f32,
    transition_alpha: f32,
    input_delay: f32,
    cues: Vec<Cue>,
    window_request: Option<(f32, f32)>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            screen: Screen::Menu,
            session: None,
            best_score: 0,
            wave_offset: 0.0,
            transition_alpha: 0.0,
            input_delay: 0.0,
            cues: Vec::new(),
            window_request: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn wave_offset(&self) -> f32 {
        self.wave_offset
    }

    /// Black overlay alpha in 0..=255.
    pub fn transition_alpha(&self) -> f32 {
        self.transition_alpha
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Window size wanted by the current settings, if it changed.
    pub fn take_window_request(&mut self) -> Option<(f32, f32)> {
        self.window_request.take()
    }

    // ─────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────

    pub fn start_game(&mut self) {
        self.settings.clamp();
        self.session = Some(Session::new(&self.settings, random_index()));
        self.window_request = Some(self.settings.window_size());
        self.transition_alpha = FADE_START;
        self.set_screen(Screen::Playing);
        log::info!(
            "session started: {}x{} at {:.1} moves/s, theme {}",
            self.settings.grid_width,
            self.settings.grid_height,
            self.settings.move_speed,
            self.settings.theme().name
        );
        if let Ok(json) = serde_json::to_string(&self.settings) {
            log::debug!("settings {json}");
        }
    }

    pub fn show_menu(&mut self) {
        self.transition_alpha = 0.0;
        self.set_screen(Screen::Menu);
    }

    pub fn show_settings(&mut self) {
        self.set_screen(Screen::Settings);
    }

    fn show_game_over(&mut self, reason: GameOverReason) {
        let score = self.session.as_ref().map_or(0, Session::score);
        self.best_score = self.best_score.max(score);
        self.transition_alpha = FADE_START;
        self.input_delay = GAME_OVER_INPUT_DELAY;
        self.set_screen(Screen::GameOver);
        log::info!("game over ({reason:?}): score {score}, best {}", self.best_score);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    // ─────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent, screen_size: (f32, f32)) -> Flow {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Click(point) => self.handle_click(point, screen_size),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Flow {
        match self.screen {
            Screen::Menu => match key {
                KeyCode::Escape => return Flow::Quit,
                KeyCode::S => self.show_settings(),
                k if is_confirm(k) => self.start_game(),
                _ => {}
            },
            Screen::Settings => match key {
                KeyCode::Escape => self.show_menu(),
                k if is_confirm(k) => self.start_game(),
                k => {
                    if let Some(command) = settings_command_for(k) {
                        self.apply_setting(command);
                    }
                }
            },
            Screen::Playing => match key {
                KeyCode::Escape => self.show_menu(),
                k => {
                    if let (Some(direction), Some(session)) = (direction_for(k), self.session.as_mut()) {
                        session.steer(direction);
                    }
                }
            },
            Screen::GameOver => {
                if key == KeyCode::Escape {
                    self.show_menu();
                } else if self.input_delay > 0.0 {
                    return Flow::Continue;
                } else if is_confirm(key) || key == KeyCode::R {
                    self.start_game();
                } else {
                    self.show_menu();
                }
            }
        }
        Flow::Continue
    }

    pub fn handle_click(&mut self, point: Vec2, (screen_w, screen_h): (f32, f32)) -> Flow {
        let action = match self.screen {
            Screen::Menu => layout::hit_test(&layout::menu_buttons(screen_w, screen_h), point),
            Screen::Settings => layout::hit_test(&layout::settings_buttons(screen_w, screen_h), point),
            Screen::Playing | Screen::GameOver => None,
        };
        match action {
            Some(ButtonAction::StartGame) => self.start_game(),
            Some(ButtonAction::OpenSettings) => self.show_settings(),
            Some(ButtonAction::BackToMenu) => self.show_menu(),
            Some(ButtonAction::Quit) => return Flow::Quit,
            None => {}
        }
        Flow::Continue
    }

    fn apply_setting(&mut self, command: SettingsCommand) {
        let previous_size = self.settings.window_size();
        self.settings.apply(command);
        log::debug!("{command:?}: {:?}", self.settings);
        let size = self.settings.window_size();
        if size != previous_size {
            self.window_request = Some(size);
        }
    }

    // ─────────────────────────────────────────────────────
    // Per-frame update
    // ─────────────────────────────────────────────────────

    pub fn update(&mut self, dt: f32) {
        self.wave_offset = (self.wave_offset + dt * WAVE_SPEED) % std::f32::consts::TAU;
        self.transition_alpha = (self.transition_alpha - dt * FADE_PER_SECOND).max(0.0);
        self.input_delay = (self.input_delay - dt).max(0.0);

        if self.screen != Screen::Playing {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let report = session.update(dt, random_index);
        self.cues.extend(std::iter::repeat_n(Cue::Eat, report.foods_eaten as usize));
        if let Some(reason) = report.game_over {
            if reason != GameOverReason::BoardFilled {
                self.cues.push(Cue::Bump);
            }
            self.show_game_over(reason);
        }
    }
}

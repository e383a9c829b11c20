use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::theme::{THEMES, Theme};

pub const SETTINGS_ENV: &str = "AURORA_SNAKE_SETTINGS";

pub const MIN_GRID_WIDTH: i32 = 12;
pub const MAX_GRID_WIDTH: i32 = 40;
pub const MIN_GRID_HEIGHT: i32 = 10;
pub const MAX_GRID_HEIGHT: i32 = 30;
pub const MIN_SPEED: f32 = 3.0;
pub const MAX_SPEED: f32 = 14.0;
pub const SPEED_STEP: f32 = 0.5;

const BASE_CELL_SIZE: i32 = 36;
const MIN_CELL_SIZE: i32 = 18;
const MAX_BOARD_WIDTH: i32 = 1280;
const MAX_BOARD_HEIGHT: i32 = 860;
const WINDOW_PADDING: i32 = 160;

/// Process-wide game options, edited on the settings screen and read when a
/// session starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Moves per second.
    pub move_speed: f32,
    pub enable_sound: bool,
    pub theme_index: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 22,
            grid_height: 16,
            move_speed: 6.0,
            enable_sound: true,
            theme_index: 0,
        }
    }
}

/// One edit issued from the settings screen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SettingsCommand {
    NarrowGrid,
    WidenGrid,
    ShortenGrid,
    HeightenGrid,
    SlowDown,
    SpeedUp,
    ToggleSound,
    CycleTheme,
}

impl Settings {
    /// Defaults overridden by the JSON object in `AURORA_SNAKE_SETTINGS`.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(SETTINGS_ENV) {
            Ok(raw) => Self::from_json(&raw).with_context(|| format!("invalid {SETTINGS_ENV}")),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let mut settings: Settings = serde_json::from_str(raw)?;
        settings.clamp();
        Ok(settings)
    }

    pub fn clamp(&mut self) {
        self.grid_width = self.grid_width.clamp(MIN_GRID_WIDTH, MAX_GRID_WIDTH);
        self.grid_height = self.grid_height.clamp(MIN_GRID_HEIGHT, MAX_GRID_HEIGHT);
        self.move_speed = if self.move_speed.is_finite() {
            self.move_speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            MIN_SPEED
        };
        self.theme_index = self.theme_index.min(THEMES.len() - 1);
    }

    pub fn apply(&mut self, command: SettingsCommand) {
        match command {
            SettingsCommand::NarrowGrid => self.grid_width -= 1,
            SettingsCommand::WidenGrid => self.grid_width += 1,
            SettingsCommand::ShortenGrid => self.grid_height -= 1,
            SettingsCommand::HeightenGrid => self.grid_height += 1,
            SettingsCommand::SlowDown => self.move_speed -= SPEED_STEP,
            SettingsCommand::SpeedUp => self.move_speed += SPEED_STEP,
            SettingsCommand::ToggleSound => self.enable_sound = !self.enable_sound,
            SettingsCommand::CycleTheme => self.theme_index = (self.theme_index + 1) % THEMES.len(),
        }
        self.clamp();
    }

    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index % THEMES.len()]
    }

    /// Pixel size of one grid cell, shrinking for large grids.
    pub fn cell_size(&self) -> f32 {
        let width = self.grid_width.max(1);
        let height = self.grid_height.max(1);
        BASE_CELL_SIZE
            .min(MAX_BOARD_WIDTH / width)
            .min(MAX_BOARD_HEIGHT / height)
            .max(MIN_CELL_SIZE) as f32
    }

    /// Board plus padding.
    pub fn window_size(&self) -> (f32, f32) {
        let cell = self.cell_size();
        let pad = WINDOW_PADDING as f32;
        (self.grid_width as f32 * cell + pad, self.grid_height as f32 * cell + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_the_board() {
        let s = Settings::default();
        assert_eq!(s.cell_size(), 36.0);
        assert_eq!(s.window_size(), (22.0 * 36.0 + 160.0, 16.0 * 36.0 + 160.0));
    }

    #[test]
    fn large_grids_get_smaller_cells() {
        let s = Settings { grid_width: 40, grid_height: 30, ..Settings::default() };
        // min(36, 1280/40 = 32, 860/30 = 28)
        assert_eq!(s.cell_size(), 28.0);
    }

    #[test]
    fn commands_stay_in_range() {
        let mut s = Settings::default();
        for _ in 0..100 {
            s.apply(SettingsCommand::WidenGrid);
            s.apply(SettingsCommand::ShortenGrid);
            s.apply(SettingsCommand::SpeedUp);
        }
        assert_eq!(s.grid_width, MAX_GRID_WIDTH);
        assert_eq!(s.grid_height, MIN_GRID_HEIGHT);
        assert_eq!(s.move_speed, MAX_SPEED);

        s.apply(SettingsCommand::SlowDown);
        assert_eq!(s.move_speed, MAX_SPEED - SPEED_STEP);
    }

    #[test]
    fn theme_cycles_and_sound_toggles() {
        let mut s = Settings::default();
        let names: Vec<_> = (0..4)
            .map(|_| {
                s.apply(SettingsCommand::CycleTheme);
                s.theme().name
            })
            .collect();
        assert_eq!(names, ["Sunset", "Cosmic", "Aurora", "Sunset"]);

        s.apply(SettingsCommand::ToggleSound);
        assert!(!s.enable_sound);
        s.apply(SettingsCommand::ToggleSound);
        assert!(s.enable_sound);
    }

    #[test]
    fn json_overrides_are_partial_and_clamped() {
        let s = Settings::from_json(r#"{"grid_width": 100, "enable_sound": false, "theme_index": 9}"#).unwrap();
        assert_eq!(s.grid_width, MAX_GRID_WIDTH);
        assert_eq!(s.grid_height, 16);
        assert!(!s.enable_sound);
        assert_eq!(s.theme_index, THEMES.len() - 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{grid_width: 3").is_err());
        assert!(Settings::from_json(r#"{"move_speed": "fast"}"#).is_err());
    }
}

//! Aurora Snake: a themed Snake game on macroquad.
//!
//! - `game`: grid rules, independent of the window
//! - `settings` / `theme`: tunables and palettes
//! - `layout`: pixel geometry and hit-testing
//! - `app`: screen state machine fed by `input`
//! - `render` / `audio`: output

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod layout;
pub mod render;
pub mod settings;
pub mod theme;

pub use app::{App, Flow, InputEvent, Screen};
pub use game::{Cell, Direction, GameOverReason, MoveOutcome, Session, Snake};
pub use settings::{Settings, SettingsCommand};

//! Pixel geometry shared by rendering and click hit-testing.

use macroquad::math::{Rect, Vec2};

use crate::game::{Cell, GridConfig};

pub const BUTTON_WIDTH: f32 = 320.0;
pub const BUTTON_HEIGHT: f32 = 68.0;
const MENU_FIRST_BUTTON_Y: f32 = 360.0;
const MENU_MIN_FIRST_BUTTON_Y: f32 = 300.0;
const MENU_BUTTON_SPACING: f32 = 90.0;
const SETTINGS_BUTTON_GAP: f32 = 40.0;
const SETTINGS_BUTTON_BOTTOM_MARGIN: f32 = 100.0;
const SETTINGS_MIN_BUTTON_Y: f32 = 460.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ButtonAction {
    StartGame,
    OpenSettings,
    Quit,
    BackToMenu,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
    pub rect: Rect,
}

fn centered(center_x: f32, center_y: f32) -> Rect {
    Rect::new(
        center_x - BUTTON_WIDTH / 2.0,
        center_y - BUTTON_HEIGHT / 2.0,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Start / Settings / Quit, stacked; pulled up on short windows.
pub fn menu_buttons(screen_w: f32, screen_h: f32) -> [Button; 3] {
    let cx = screen_w / 2.0;
    let first = (screen_h - 2.0 * MENU_BUTTON_SPACING - BUTTON_HEIGHT)
        .clamp(MENU_MIN_FIRST_BUTTON_Y, MENU_FIRST_BUTTON_Y);
    let at = |i: usize| centered(cx, first + i as f32 * MENU_BUTTON_SPACING);
    [
        Button { label: "Start Game", action: ButtonAction::StartGame, rect: at(0) },
        Button { label: "Settings", action: ButtonAction::OpenSettings, rect: at(1) },
        Button { label: "Quit", action: ButtonAction::Quit, rect: at(2) },
    ]
}

/// Start and Back, side by side near the bottom of the settings screen.
pub fn settings_buttons(screen_w: f32, screen_h: f32) -> [Button; 2] {
    let cx = screen_w / 2.0;
    let cy = (screen_h - SETTINGS_BUTTON_BOTTOM_MARGIN).max(SETTINGS_MIN_BUTTON_Y);
    let offset = (BUTTON_WIDTH + SETTINGS_BUTTON_GAP) / 2.0;
    [
        Button { label: "Start", action: ButtonAction::StartGame, rect: centered(cx - offset, cy) },
        Button { label: "Back", action: ButtonAction::BackToMenu, rect: centered(cx + offset, cy) },
    ]
}

pub fn hit_test(buttons: &[Button], point: Vec2) -> Option<ButtonAction> {
    buttons.iter().find(|b| b.rect.contains(point)).map(|b| b.action)
}

/// Where the board sits on screen: centred, one `cell` per grid cell.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BoardLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell: f32,
    pub width: f32,
    pub height: f32,
}

impl BoardLayout {
    pub fn compute(screen_w: f32, screen_h: f32, grid: &GridConfig) -> Self {
        let cell = grid.cell_size;
        let width = grid.width as f32 * cell;
        let height = grid.height as f32 * cell;
        Self {
            origin_x: ((screen_w - width) / 2.0).floor(),
            origin_y: ((screen_h - height) / 2.0).floor(),
            cell,
            width,
            height,
        }
    }

    /// Top-left pixel of a possibly fractional grid position.
    pub fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.origin_x + x * self.cell, self.origin_y + y * self.cell)
    }

    /// Cell rectangle shrunk by `inset` (a fraction of the cell) on both axes.
    pub fn cell_rect(&self, cell: Cell, inset: f32) -> Rect {
        inset_rect(self.point(cell.x as f32, cell.y as f32), self.cell, inset)
    }
}

pub fn inset_rect(top_left: Vec2, size: f32, inset: f32) -> Rect {
    let shrink = size * inset;
    Rect::new(
        top_left.x + shrink / 2.0,
        top_left.y + shrink / 2.0,
        size - shrink,
        size - shrink,
    )
}

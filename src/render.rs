use std::f32::consts::TAU;

use macroquad::prelude::*;

use crate::app::{App, Screen};
use crate::game::Session;
use crate::layout::{self, BoardLayout, Button};
use crate::settings::Settings;
use crate::theme::{Theme, brighten, darken, lerp, lerp_color, with_alpha};

const TEXT_BRIGHT: Color = Color::new(0.96, 0.96, 0.97, 1.0);
const TEXT_SOFT: Color = Color::new(0.86, 0.86, 0.90, 1.0);
const BUTTON_TEXT: Color = Color::new(0.1, 0.1, 0.1, 1.0);
const GAME_OVER_SHADE: Color = Color::new(0.035, 0.035, 0.055, 0.63);

const TITLE_SIZE: f32 = 80.0;
const HEADING_SIZE: f32 = 40.0;
const BODY_SIZE: f32 = 26.0;
const GRADIENT_BAND: f32 = 4.0;
const WAVE_COUNT: usize = 6;
const WAVE_STEP: f32 = 40.0;

pub fn draw_frame(app: &App) {
    let sw = screen_width();
    let sh = screen_height();
    let theme = app.settings().theme();

    draw_background(theme, app.wave_offset(), sw, sh);
    match app.screen() {
        Screen::Menu => draw_menu(theme, sw, sh),
        Screen::Settings => draw_settings(app.settings(), theme, sw, sh),
        Screen::Playing => {
            if let Some(session) = app.session() {
                draw_playing(session, app.best_score(), theme, sw, sh);
            }
        }
        Screen::GameOver => {
            if let Some(session) = app.session() {
                draw_playing(session, app.best_score(), theme, sw, sh);
                draw_game_over(session, theme, sw, sh);
            }
        }
    }

    let alpha = app.transition_alpha();
    if alpha > 0.0 {
        draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.0, 0.0, 0.0, alpha / 255.0));
    }
}

// ─────────────────────────────────────────────────────
// Backdrop
// ─────────────────────────────────────────────────────

fn draw_background(theme: &Theme, wave_offset: f32, sw: f32, sh: f32) {
    let phase = (wave_offset % TAU) / TAU;
    let mut y = 0.0;
    while y < sh {
        let t = y / (sh - 1.0).max(1.0);
        let color = lerp_color(theme.background_top, theme.background_bottom, (t + phase) % 1.0);
        draw_rectangle(0.0, y, sw, GRADIENT_BAND, color);
        y += GRADIENT_BAND;
    }

    let wave_color = with_alpha(theme.accent, 28.0 / 255.0);
    for i in 0..WAVE_COUNT {
        let phase = wave_offset + i as f32 * 0.8;
        let amplitude = sh * 0.06 * (1.0 + i as f32 * 0.1);
        let wave_y = |x: f32| sh / 2.0 + (phase + x / 220.0).sin() * amplitude;
        let mut x = 0.0;
        while x < sw + WAVE_STEP {
            let next = x + WAVE_STEP;
            draw_line(x, wave_y(x), next, wave_y(next), 4.0, wave_color);
            x = next;
        }
    }
}

// ─────────────────────────────────────────────────────
// Text helpers
// ─────────────────────────────────────────────────────

fn draw_text_centered(text: &str, cx: f32, cy: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, cx - dims.width / 2.0, cy - dims.height / 2.0 + dims.offset_y, size, color);
}

/// Title with a soft glow of enlarged translucent copies behind it.
fn draw_title(text: &str, cx: f32, cy: f32, theme: &Theme) {
    for i in (1..=5).rev() {
        let scale = 1.0 + i as f32 * 0.05;
        let glow = with_alpha(theme.accent, 36.0 * i as f32 / 255.0 * 0.35);
        draw_text_centered(text, cx, cy, TITLE_SIZE * scale, glow);
    }
    draw_text_centered(text, cx, cy, TITLE_SIZE, theme.accent);
}

fn draw_rounded_rect(rect: Rect, radius: f32, color: Color) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    draw_rectangle(rect.x + r, rect.y, rect.w - 2.0 * r, rect.h, color);
    draw_rectangle(rect.x, rect.y + r, r, rect.h - 2.0 * r, color);
    draw_rectangle(rect.right() - r, rect.y + r, r, rect.h - 2.0 * r, color);
    for (cx, cy) in [
        (rect.x + r, rect.y + r),
        (rect.right() - r, rect.y + r),
        (rect.x + r, rect.bottom() - r),
        (rect.right() - r, rect.bottom() - r),
    ] {
        draw_circle(cx, cy, r, color);
    }
}

fn draw_buttons(buttons: &[Button], theme: &Theme) {
    let (mx, my) = mouse_position();
    let mouse = vec2(mx, my);
    for button in buttons {
        let color = if button.rect.contains(mouse) { brighten(theme.accent, 1.18) } else { theme.accent };
        draw_rounded_rect(button.rect, 28.0, color);
        let center = button.rect.center();
        draw_text_centered(button.label, center.x, center.y, HEADING_SIZE, BUTTON_TEXT);
    }
}

// ─────────────────────────────────────────────────────
// Screens
// ─────────────────────────────────────────────────────

fn draw_menu(theme: &Theme, sw: f32, sh: f32) {
    let cx = sw / 2.0;
    // Title and help sit higher than the buttons' 360 px so short windows fit.
    draw_title("Aurora Snake", cx, 110.0, theme);
    let lines = [
        "Press ENTER or click Start to begin",
        "Arrow keys / WASD to move",
        "ESC pauses back to this menu, S opens settings",
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text_centered(line, cx, 190.0 + i as f32 * 30.0, BODY_SIZE, TEXT_BRIGHT);
    }
    draw_buttons(&layout::menu_buttons(sw, sh), theme);
}

fn draw_settings(settings: &Settings, theme: &Theme, sw: f32, sh: f32) {
    let cx = sw / 2.0;
    draw_title("Settings", cx, 80.0, theme);
    draw_text_centered("Press ENTER to start, ESC to return", cx, 135.0, BODY_SIZE, TEXT_SOFT);

    let rows = [
        ("Grid Width", settings.grid_width.to_string(), "[ / ]"),
        ("Grid Height", settings.grid_height.to_string(), ", / ."),
        ("Speed", format!("{:.1}", settings.move_speed), "- / +"),
        ("Sound", if settings.enable_sound { "On" } else { "Off" }.to_string(), "S"),
        ("Theme", settings.theme().name.to_string(), "T"),
    ];
    for (i, (label, value, hint)) in rows.iter().enumerate() {
        let y = 190.0 + i as f32 * 50.0;
        let text = format!("{label}: {value}");
        let dims = measure_text(&text, None, HEADING_SIZE as u16, 1.0);
        draw_text_centered(&text, cx, y, HEADING_SIZE, TEXT_BRIGHT);
        let hint = format!("[{hint}]");
        let hint_dims = measure_text(&hint, None, BODY_SIZE as u16, 1.0);
        draw_text(
            &hint,
            cx + dims.width / 2.0 + 20.0,
            y - hint_dims.height / 2.0 + hint_dims.offset_y,
            BODY_SIZE,
            TEXT_SOFT,
        );
    }
    draw_buttons(&layout::settings_buttons(sw, sh), theme);
}

fn draw_playing(session: &Session, best: u32, theme: &Theme, sw: f32, sh: f32) {
    let board = BoardLayout::compute(sw, sh, session.grid());
    draw_grid(&board, session, theme);
    draw_snake(&board, session, theme);
    draw_food(&board, session, theme);

    draw_text(&format!("Score: {}", session.score()), 40.0, 70.0, HEADING_SIZE, TEXT_BRIGHT);
    draw_text(&format!("Best: {best}"), 44.0, 105.0, BODY_SIZE, TEXT_SOFT);
}

fn draw_grid(board: &BoardLayout, session: &Session, theme: &Theme) {
    let grid = session.grid();
    let color = darken(theme.background_bottom, 60);
    for x in 0..=grid.width {
        let px = board.origin_x + x as f32 * board.cell;
        draw_line(px, board.origin_y, px, board.origin_y + board.height, 1.0, color);
    }
    for y in 0..=grid.height {
        let py = board.origin_y + y as f32 * board.cell;
        draw_line(board.origin_x, py, board.origin_x + board.width, py, 1.0, color);
    }
}

fn draw_snake(board: &BoardLayout, session: &Session, theme: &Theme) {
    let snake = session.snake();
    let progress = session.move_progress();
    let last = snake.last_positions();
    let len = snake.len();
    let radius = (board.cell * 0.3).min(12.0);

    // Tail first so the head is drawn on top.
    for (index, segment) in snake.segments().iter().enumerate().rev() {
        let prev = last.get(index).copied().unwrap_or(*segment);
        let x = lerp(prev.x as f32, segment.x as f32, progress);
        let y = lerp(prev.y as f32, segment.y as f32, progress);
        let rect = layout::inset_rect(board.point(x, y), board.cell, 0.25);
        let color = if index == 0 {
            theme.snake_head
        } else {
            lerp_color(theme.snake_body, theme.snake_head, index as f32 / (len - 1).max(1) as f32)
        };
        draw_rounded_rect(rect, radius, color);
    }

    let head = board.cell_rect(snake.head(), 0.0).center();
    draw_circle(head.x, head.y, board.cell / 2.0, with_alpha(theme.snake_head, 90.0 / 255.0));
}

fn draw_food(board: &BoardLayout, session: &Session, theme: &Theme) {
    let Some(food) = session.food() else {
        return;
    };
    let rect = board.cell_rect(food, 0.35);
    draw_rounded_rect(rect, 18.0, theme.food);
    let pulse = ((get_time() as f32 * 1000.0 / 220.0).sin() + 1.0) / 2.0;
    let glow = rect.w * (1.15 + pulse * 0.25);
    let center = rect.center();
    draw_circle(center.x, center.y, glow, with_alpha(theme.food, 85.0 / 255.0));
}

fn draw_game_over(session: &Session, theme: &Theme, sw: f32, sh: f32) {
    let cx = sw / 2.0;
    let cy = sh / 2.0;
    draw_rectangle(0.0, 0.0, sw, sh, GAME_OVER_SHADE);
    draw_title("Game Over", cx, cy - 70.0, theme);
    draw_text_centered(&format!("Score: {}", session.score()), cx, cy + 10.0, HEADING_SIZE, TEXT_BRIGHT);
    if let Some(reason) = session.game_over() {
        draw_text_centered(reason.describe(), cx, cy + 55.0, BODY_SIZE, TEXT_SOFT);
    }
    draw_text_centered(
        "Press ENTER to try again, any other key for the menu",
        cx,
        cy + 100.0,
        BODY_SIZE,
        TEXT_SOFT,
    );
}

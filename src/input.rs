use macroquad::input::{MouseButton, get_keys_pressed, is_mouse_button_pressed, mouse_position};
use macroquad::math::Vec2;

use crate::app::InputEvent;

/// Keys pressed this frame, then a left click if there was one.
pub fn poll() -> Vec<InputEvent> {
    let mut events: Vec<InputEvent> = get_keys_pressed().into_iter().map(InputEvent::Key).collect();
    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        events.push(InputEvent::Click(Vec2::new(x, y)));
    }
    events
}

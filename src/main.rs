use std::time::Duration;

use aurora_snake::app::seed_random;
use aurora_snake::audio::Audio;
use aurora_snake::{App, Flow, Settings, input, render};
use macroquad::prelude::*;

const TARGET_FPS: f64 = 120.0;
const MAX_FRAME_TIME: f32 = 0.25;

fn window_conf() -> Conf {
    // The logger is not up yet; a bad override is reported again from main.
    let (width, height) = Settings::from_env().unwrap_or_default().window_size();
    Conf {
        window_title: "Aurora Snake".to_owned(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn load_settings() -> Settings {
    Settings::from_env().unwrap_or_else(|err| {
        log::warn!("{err:#}; using default settings");
        Settings::default()
    })
}

/// Sleep off whatever is left of this frame's budget.
fn cap_frame_rate(frame_start: f64) {
    if cfg!(target_arch = "wasm32") {
        return;
    }
    let remaining = 1.0 / TARGET_FPS - (get_time() - frame_start);
    if remaining > 0.0 {
        std::thread::sleep(Duration::from_secs_f64(remaining));
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Aurora Snake starting");

    let seed = macroquad::miniquad::date::now() as u64;
    log::debug!("food seed {seed}");
    seed_random(seed);
    let mut app = App::new(load_settings());
    let audio = Audio::load().await;

    'frames: loop {
        let frame_start = get_time();
        let dt = get_frame_time().min(MAX_FRAME_TIME);
        let screen_size = (screen_width(), screen_height());

        for event in input::poll() {
            if app.handle(event, screen_size) == Flow::Quit {
                break 'frames;
            }
        }
        app.update(dt);

        for cue in app.drain_cues() {
            audio.play(cue, app.settings().enable_sound);
        }
        if let Some((width, height)) = app.take_window_request() {
            request_new_screen_size(width, height);
        }

        render::draw_frame(&app);
        next_frame().await;
        cap_frame_rate(frame_start);
    }

    log::info!("quit requested, best score {}", app.best_score());
}

use macroquad::color::Color;

#[derive(Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background_top: Color,
    pub background_bottom: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub accent: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}

pub static THEMES: [Theme; 3] = [
    Theme {
        name: "Aurora",
        background_top: rgb(17, 24, 39),
        background_bottom: rgb(59, 130, 246),
        snake_head: rgb(248, 250, 252),
        snake_body: rgb(165, 243, 252),
        food: rgb(239, 68, 68),
        accent: rgb(217, 249, 157),
    },
    Theme {
        name: "Sunset",
        background_top: rgb(255, 126, 95),
        background_bottom: rgb(254, 180, 123),
        snake_head: rgb(39, 39, 42),
        snake_body: rgb(74, 222, 128),
        food: rgb(125, 211, 252),
        accent: rgb(30, 64, 175),
    },
    Theme {
        name: "Cosmic",
        background_top: rgb(30, 27, 75),
        background_bottom: rgb(109, 40, 217),
        snake_head: rgb(236, 72, 153),
        snake_body: rgb(244, 114, 182),
        food: rgb(165, 243, 252),
        accent: rgb(250, 204, 21),
    },
];

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate RGB, keeping the alpha of `a`.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(lerp(a.r, b.r, t), lerp(a.g, b.g, t), lerp(a.b, b.b, t), a.a)
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

/// Scale RGB by `factor`, saturating at white.
pub fn brighten(color: Color, factor: f32) -> Color {
    Color::new(
        (color.r * factor).min(1.0),
        (color.g * factor).min(1.0),
        (color.b * factor).min(1.0),
        color.a,
    )
}

/// Subtract a fixed 0..255 amount from each channel.
pub fn darken(color: Color, amount: u8) -> Color {
    let d = amount as f32 / 255.0;
    Color::new((color.r - d).max(0.0), (color.g - d).max(0.0), (color.b - d).max(0.0), color.a)
}

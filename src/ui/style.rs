/// Palette and widget styles
use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

pub const BACKGROUND: Color = rgb(0.89, 0.949, 0.992);
pub const ACCENT: Color = rgb(0.118, 0.533, 0.898);
pub const ACCENT_DARK: Color = rgb(0.0824, 0.396, 0.753);
pub const MUTED: Color = rgb(0.333, 0.333, 0.333);

pub const PREDICTIONS: Color = rgb(1.0, 0.8, 0.796);
pub const RECOMMENDATION: Color = rgb(0.82, 0.969, 0.835);
pub const DETAILS: Color = rgb(0.902, 0.902, 0.98);
const CARD_BORDER: Color = rgb(0.627, 0.839, 0.706);

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

/// Whole-window background
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        ..container::Style::default()
    }
}

/// Rounded result card with a soft shadow
pub fn card(fill: Color) -> container::Style {
    container::Style {
        text_color: Some(Color::BLACK),
        background: Some(Background::Color(fill)),
        border: Border {
            color: CARD_BORDER,
            width: 1.0,
            radius: 10.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 4.0,
        },
    }
}

/// Pill-shaped "Comenzar" button
pub fn start_button(_theme: &Theme, status: button::Status) -> button::Style {
    let fill = match status {
        button::Status::Hovered | button::Status::Pressed => ACCENT_DARK,
        _ => ACCENT,
    };

    button::Style {
        background: Some(Background::Color(fill)),
        text_color: Color::WHITE,
        border: Border {
            radius: 25.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}

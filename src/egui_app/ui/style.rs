use egui::{
    Color32, FontId, Stroke, Style, TextStyle, Visuals,
    epaint::{CornerRadius, Shadow},
};

use crate::egui_app::state::StatusTone;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_card: Color32,
    pub outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub success: Color32,
}

pub fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            bg_primary: Color32::from_rgb(10, 10, 12),
            bg_secondary: Color32::from_rgb(26, 28, 30),
            bg_card: Color32::from_rgb(34, 36, 40),
            outline: Color32::from_rgb(56, 60, 66),
            text_primary: Color32::from_rgb(205, 210, 218),
            text_muted: Color32::from_rgb(140, 146, 155),
            accent: Color32::from_rgb(167, 217, 255),
            warning: Color32::from_rgb(220, 170, 90),
            error: Color32::from_rgb(220, 110, 96),
            success: Color32::from_rgb(102, 176, 136),
        }
    } else {
        Palette {
            bg_primary: Color32::from_rgb(246, 247, 249),
            bg_secondary: Color32::from_rgb(232, 234, 238),
            bg_card: Color32::WHITE,
            outline: Color32::from_rgb(200, 204, 210),
            text_primary: Color32::from_rgb(28, 30, 34),
            text_muted: Color32::from_rgb(96, 102, 110),
            accent: Color32::from_rgb(32, 110, 190),
            warning: Color32::from_rgb(170, 110, 20),
            error: Color32::from_rgb(180, 50, 40),
            success: Color32::from_rgb(40, 130, 80),
        }
    }
}

pub fn visuals(dark: bool) -> Visuals {
    let palette = palette(dark);
    let mut visuals = if dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_card;
    visuals.error_fg_color = palette.error;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.window_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals
}

/// Scale every text style from the body font size.
pub fn apply_font_size(style: &mut Style, body: f32) {
    style.text_styles = [
        (TextStyle::Small, FontId::proportional(body * 0.8)),
        (TextStyle::Body, FontId::proportional(body)),
        (TextStyle::Button, FontId::proportional(body)),
        (TextStyle::Heading, FontId::proportional(body * 1.4)),
        (TextStyle::Monospace, FontId::monospace(body * 0.9)),
    ]
    .into();
}

pub fn status_color(tone: StatusTone, palette: Palette) -> Color32 {
    match tone {
        StatusTone::Idle => palette.text_muted,
        StatusTone::Info => palette.accent,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => palette.error,
    }
}

pub fn card_stroke(playing: bool, palette: Palette) -> Stroke {
    if playing {
        Stroke::new(2.0, palette.success)
    } else {
        Stroke::new(1.0, palette.outline)
    }
}

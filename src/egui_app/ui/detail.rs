use egui::{self, Align2, RichText};

use super::EvalViewApp;
use super::style;
use crate::browse::MediaState;

impl EvalViewApp {
    pub(super) fn render_detail(&mut self, ctx: &egui::Context) {
        let Some(view) = self.controller.detail_view() else {
            return;
        };
        let palette = style::palette(self.controller.is_dark());
        let mut open = true;
        egui::Window::new(RichText::new(&view.title).strong())
            .id(egui::Id::new("sample_detail"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .default_width(560.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("{} of {}  |  {}", view.ordinal, view.total, view.path))
                        .small()
                        .color(palette.text_muted),
                );
                ui.add_space(8.0);
                ui.label(RichText::new("Ground truth").small().color(palette.text_muted));
                ui.label(&view.ground_truth);
                ui.add_space(6.0);
                ui.label(RichText::new("Prediction").small().color(palette.text_muted));
                ui.label(&view.prediction);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(view.has_previous, egui::Button::new("< Previous"))
                        .clicked()
                    {
                        self.controller.detail_previous();
                    }
                    let failed = matches!(view.audio, MediaState::Failed(_));
                    let label = if view.playing { "Pause" } else { "Play" };
                    if ui.add_enabled(!failed, egui::Button::new(label)).clicked() {
                        self.controller.toggle_detail_playback();
                    }
                    if ui
                        .add_enabled(view.has_next, egui::Button::new("Next >"))
                        .clicked()
                    {
                        self.controller.detail_next();
                    }
                    match &view.audio {
                        MediaState::Loading => {
                            ui.label(RichText::new("Loading audio").small());
                        }
                        MediaState::Failed(reason) => {
                            ui.label(
                                RichText::new("Audio unavailable")
                                    .small()
                                    .color(palette.error),
                            )
                            .on_hover_text(reason);
                        }
                        MediaState::Empty | MediaState::Ready => {}
                    }
                });
            });
        if !open {
            self.controller.close_detail();
        }
    }
}

use egui::{self, Align, Layout, RichText, TopBottomPanel};

use super::EvalViewApp;
use super::style;
use crate::egui_app::state::LoadPhase;
use crate::egui_app::view_model::{loading_label, summary_view};
use crate::preferences::{LayoutMode, MAX_FONT_SIZE, MIN_FONT_SIZE};

impl EvalViewApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette(self.controller.is_dark());
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Evaluation Results");
                if let Some(stats) = self.controller.stats() {
                    let summary = summary_view(stats, self.controller.meta());
                    ui.separator();
                    ui.label(format!("Samples: {}", summary.total_samples));
                    ui.label(format!("WER: {}", summary.word_error_rate));
                    ui.label(format!("CER: {}", summary.char_error_rate));
                    if let Some(reported) = summary.reported_wer {
                        ui.label(
                            RichText::new(format!("Reported WER: {reported}"))
                                .color(palette.text_muted),
                        );
                    }
                    if let Some(model) = summary.model {
                        ui.label(RichText::new(model).color(palette.text_muted));
                    }
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    self.render_display_controls(ui);
                });
            });
        });
    }

    fn render_display_controls(&mut self, ui: &mut egui::Ui) {
        let theme_label = if self.controller.is_dark() {
            "Light mode"
        } else {
            "Dark mode"
        };
        if ui.button(theme_label).clicked() {
            self.controller.toggle_theme();
        }
        let layout_label = match self.controller.layout() {
            LayoutMode::Grid => "List view",
            LayoutMode::List => "Grid view",
        };
        if ui.button(layout_label).clicked() {
            self.controller.toggle_layout();
        }
        let font_size = self.controller.font_size();
        if ui
            .add_enabled(font_size < MAX_FONT_SIZE, egui::Button::new("A+"))
            .on_hover_text("Increase font size (Ctrl/Cmd +)")
            .clicked()
        {
            self.controller.increase_font_size();
        }
        ui.label(format!("{font_size}px"));
        if ui
            .add_enabled(font_size > MIN_FONT_SIZE, egui::Button::new("A-"))
            .on_hover_text("Decrease font size (Ctrl/Cmd -)")
            .clicked()
        {
            self.controller.decrease_font_size();
        }
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette(self.controller.is_dark());
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = &self.controller.ui.status;
                ui.label(
                    RichText::new(&status.text).color(style::status_color(status.tone, palette)),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                            .color(palette.text_muted),
                    );
                });
            });
        });
    }

    pub(super) fn render_pager(&mut self, ctx: &egui::Context) {
        if self.controller.display_len() == 0 {
            return;
        }
        TopBottomPanel::bottom("pager").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let paginator = self.controller.paginator();
                let has_previous = paginator.has_previous();
                let has_next = paginator.has_next();
                let current = paginator.current_page();
                let total_pages = paginator.total_pages();
                let page = self.controller.current_page();
                let range = format!(
                    "Showing {}-{} of {}",
                    page.start_ordinal,
                    page.end_ordinal,
                    paginator.total_items()
                );

                if ui
                    .add_enabled(has_previous, egui::Button::new("Previous"))
                    .clicked()
                {
                    self.controller.previous_page();
                }
                ui.label(format!("Page {} of {}", current + 1, total_pages));
                if ui.add_enabled(has_next, egui::Button::new("Next")).clicked() {
                    self.controller.next_page();
                }
                ui.separator();
                ui.label(range);
            });
        });
    }

    pub(super) fn render_central(&mut self, ctx: &egui::Context) {
        let palette = style::palette(self.controller.is_dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(notice) = self.controller.ui.notice.clone() {
                ui.label(RichText::new(notice).color(palette.warning));
                ui.add_space(6.0);
            }
            match self.controller.ui.load.clone() {
                LoadPhase::Failed { message, retryable } => {
                    self.render_error_panel(ui, &message, retryable);
                }
                LoadPhase::Loading { .. } if !self.controller.has_dataset() => {
                    let elapsed = ui.input(|i| i.time);
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(loading_label(elapsed)).heading());
                    });
                }
                LoadPhase::Idle => {}
                _ if self.controller.display_len() == 0 => {
                    ui.centered_and_justified(|ui| {
                        ui.label("The dataset contains no samples.");
                    });
                }
                _ => self.render_cards(ui),
            }
        });
    }

    fn render_error_panel(&mut self, ui: &mut egui::Ui, message: &str, retryable: bool) {
        let palette = style::palette(self.controller.is_dark());
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(RichText::new("Could not load evaluation results").color(palette.error));
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(12.0);
            if retryable && ui.button("Retry").clicked() {
                self.controller.retry();
            }
        });
    }
}

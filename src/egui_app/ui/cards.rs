use egui::{self, Frame, Margin, Rect, RichText};

use super::EvalViewApp;
use super::style::{self, Palette};
use crate::browse::{Bounds, CardAudioState};
use crate::egui_app::view_model::{CardView, audio_label, card_view};
use crate::preferences::LayoutMode;

/// Width a grid column aims for before another column is added.
const GRID_CARD_WIDTH: f32 = 360.0;
const CARD_SPACING: f32 = 10.0;

enum CardAction {
    TogglePlayback(usize),
    OpenDetail(usize),
}

impl EvalViewApp {
    pub(super) fn render_cards(&mut self, ui: &mut egui::Ui) {
        let cards: Vec<CardView> = {
            let page = self.controller.current_page();
            page.items
                .iter()
                .enumerate()
                .map(|(offset, entry)| {
                    let index = page.offset + offset;
                    card_view(index, entry, self.controller.card_audio_state(index))
                })
                .collect()
        };
        let palette = style::palette(self.controller.is_dark());
        let layout = self.controller.layout();
        let mut scroll = egui::ScrollArea::vertical()
            .id_salt("cards_scroll")
            .auto_shrink([false, false]);
        if self.controller.take_scroll_to_top() {
            scroll = scroll.vertical_scroll_offset(0.0);
        }

        let mut actions = Vec::new();
        let mut placed = Vec::with_capacity(cards.len());
        scroll.show(ui, |ui| {
            let viewport = ui.clip_rect();
            let columns = match layout {
                LayoutMode::Grid => {
                    ((ui.available_width() + CARD_SPACING) / (GRID_CARD_WIDTH + CARD_SPACING))
                        .floor()
                        .max(1.0) as usize
                }
                LayoutMode::List => 1,
            };
            let width = ((ui.available_width() - CARD_SPACING * (columns as f32 - 1.0))
                / columns as f32)
                .max(120.0);
            for row in cards.chunks(columns) {
                ui.horizontal_top(|ui| {
                    ui.spacing_mut().item_spacing.x = CARD_SPACING;
                    for card in row {
                        let rect = ui
                            .allocate_ui(egui::vec2(width, 0.0), |ui| {
                                ui.set_width(width);
                                render_card(ui, card, palette, &mut actions)
                            })
                            .inner;
                        placed.push((card.index, rect));
                    }
                });
                ui.add_space(CARD_SPACING);
            }
            for (index, rect) in placed.drain(..) {
                self.controller
                    .card_bounds(index, to_bounds(viewport), to_bounds(rect));
            }
        });

        for action in actions {
            match action {
                CardAction::TogglePlayback(index) => {
                    self.controller.toggle_card(index);
                }
                CardAction::OpenDetail(index) => {
                    self.controller.open_detail(index);
                }
            }
        }
    }
}

fn render_card(
    ui: &mut egui::Ui,
    card: &CardView,
    palette: Palette,
    actions: &mut Vec<CardAction>,
) -> Rect {
    let playing = card.audio == CardAudioState::Playing;
    Frame::group(ui.style())
        .fill(palette.bg_card)
        .stroke(style::card_stroke(playing, palette))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&card.title).strong());
                ui.label(RichText::new(format!("#{}", card.ordinal)).color(palette.text_muted));
            });
            ui.add_space(4.0);
            ui.label(RichText::new("Ground truth").small().color(palette.text_muted));
            ui.label(&card.ground_truth);
            ui.add_space(4.0);
            ui.label(RichText::new("Prediction").small().color(palette.text_muted));
            ui.label(&card.prediction);
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let play_label = if playing { "Pause" } else { "Play" };
                let failed = matches!(card.audio, CardAudioState::Failed(_));
                let button = ui.add_enabled(!failed, egui::Button::new(play_label));
                if button.clicked() {
                    actions.push(CardAction::TogglePlayback(card.index));
                }
                let badge = RichText::new(audio_label(&card.audio)).small();
                if let CardAudioState::Failed(reason) = &card.audio {
                    ui.label(badge.color(palette.error)).on_hover_text(reason);
                } else {
                    ui.label(badge.color(palette.text_muted));
                }
                if ui.button("Details").clicked() {
                    actions.push(CardAction::OpenDetail(card.index));
                }
            });
        })
        .response
        .rect
}

fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

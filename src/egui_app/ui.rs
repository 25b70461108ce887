//! egui renderer for the viewer.

mod cards;
mod chrome;
mod detail;
mod input;
pub mod style;

use std::time::Duration;

use crate::connectivity::ConnectivityProbe;
use crate::egui_app::controller::ViewerController;
use crate::egui_app::state::StatusTone;
use input::InputSnapshot;

/// Smallest window the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(480.0, 360.0);
/// How often background work is polled while the window is idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the viewer using the controller's state.
pub struct EvalViewApp {
    controller: ViewerController,
    probe: Option<ConnectivityProbe>,
    applied_style: Option<(bool, u32)>,
}

impl EvalViewApp {
    /// Wrap a controller and kick off the first dataset load.
    pub fn new(mut controller: ViewerController, startup_warnings: &[String]) -> Self {
        let probe = ConnectivityProbe::spawn(controller.locator().url());
        controller.start_load();
        if let Some(warning) = startup_warnings.first() {
            controller.set_status(warning.clone(), StatusTone::Warning);
        }
        Self {
            controller,
            probe,
            applied_style: None,
        }
    }

    fn apply_style(&mut self, ctx: &egui::Context) {
        if let Some(theme) = ctx.system_theme() {
            self.controller
                .set_system_prefers_dark(theme == egui::Theme::Dark);
        }
        if self.applied_style.is_none() {
            // Ctrl/Cmd +/- resize the viewer font instead of zooming egui.
            ctx.options_mut(|options| options.zoom_with_keyboard = false);
        }
        let wanted = (self.controller.is_dark(), self.controller.font_size());
        if self.applied_style == Some(wanted) {
            return;
        }
        let (dark, font_size) = wanted;
        ctx.set_visuals(style::visuals(dark));
        ctx.style_mut(|style| style::apply_font_size(style, font_size as f32));
        self.applied_style = Some(wanted);
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if input.zoom_in {
            self.controller.increase_font_size();
        }
        if input.zoom_out {
            self.controller.decrease_font_size();
        }
        if self.controller.is_detail_open() {
            if input.escape {
                self.controller.close_detail();
            } else if input.arrow_left {
                self.controller.detail_previous();
            } else if input.arrow_right {
                self.controller.detail_next();
            }
        }
    }

    fn poll_connectivity(&mut self) {
        if let Some(online) = self.probe.as_ref().and_then(ConnectivityProbe::poll) {
            self.controller.set_online(online);
        }
    }
}

impl eframe::App for EvalViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_connectivity();
        self.controller.tick();
        let input = InputSnapshot::capture(ctx);
        self.handle_input(&input);
        self.apply_style(ctx);

        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_pager(ctx);
        self.render_central(ctx);
        self.render_detail(ctx);
        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

/// Minimal fallback app to display initialization errors.
pub struct LaunchError {
    pub message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start viewer");
                ui.label(&self.message);
            });
        });
    }
}

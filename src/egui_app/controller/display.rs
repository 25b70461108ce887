use tracing::{info, warn};

use super::*;
use crate::preferences::{FONT_SIZE_STEP, LayoutMode, Theme, clamp_font_size};

impl ViewerController {
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn font_size(&self) -> u32 {
        self.preferences.font_size
    }

    pub fn layout(&self) -> LayoutMode {
        self.preferences.layout
    }

    /// Resolved theme, following the system setting when none was chosen.
    pub fn is_dark(&self) -> bool {
        self.preferences.is_dark(self.system_prefers_dark)
    }

    /// Record the host's current dark/light preference.
    pub fn set_system_prefers_dark(&mut self, dark: bool) {
        self.system_prefers_dark = dark;
    }

    pub fn increase_font_size(&mut self) {
        self.set_font_size(self.preferences.font_size.saturating_add(FONT_SIZE_STEP));
    }

    pub fn decrease_font_size(&mut self) {
        self.set_font_size(self.preferences.font_size.saturating_sub(FONT_SIZE_STEP));
    }

    pub fn toggle_layout(&mut self) {
        self.preferences.layout = self.preferences.layout.toggled();
        info!("Layout set to {:?}", self.preferences.layout);
        self.persist_preferences();
    }

    pub fn toggle_theme(&mut self) {
        let next = if self.is_dark() {
            Theme::Light
        } else {
            Theme::Dark
        };
        self.preferences.theme = Some(next);
        self.persist_preferences();
    }

    fn set_font_size(&mut self, size: u32) {
        let size = clamp_font_size(size);
        if size == self.preferences.font_size {
            return;
        }
        self.preferences.font_size = size;
        self.persist_preferences();
    }

    fn persist_preferences(&mut self) {
        if let Err(err) = self.store.save(&self.preferences) {
            warn!("Failed to save preferences: {err}");
        }
    }
}

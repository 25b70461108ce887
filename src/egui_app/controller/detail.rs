use super::*;
use crate::egui_app::view_model::{DetailView, sample_title};

impl ViewerController {
    /// Open the detail overlay on display index `index`.
    pub fn open_detail(&mut self, index: usize) -> bool {
        let sources = self.sources_for(index);
        self.detail
            .open(index, self.display_order.len(), move |_| sources)
    }

    pub fn detail_next(&mut self) -> bool {
        self.detail_navigate(1)
    }

    pub fn detail_previous(&mut self) -> bool {
        self.detail_navigate(-1)
    }

    fn detail_navigate(&mut self, delta: isize) -> bool {
        let Some(current) = self.detail.current_index() else {
            return false;
        };
        let Some(target) = current.checked_add_signed(delta) else {
            return false;
        };
        let sources = self.sources_for(target);
        self.detail
            .navigate(delta, self.display_order.len(), move |_| sources)
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_open()
    }

    /// Play or pause the detail clip. Starting it stops and rewinds any card audio.
    pub fn toggle_detail_playback(&mut self) {
        if !self.detail.is_open() {
            return;
        }
        if self.detail.is_playing() {
            self.detail.pause();
        } else {
            self.card_audio.stop_all();
            self.detail.play();
        }
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        let index = self.detail.current_index()?;
        let entry = self.display_order.get(index)?;
        let total = self.display_order.len();
        Some(DetailView {
            index,
            ordinal: index + 1,
            total,
            title: sample_title(entry),
            path: entry.sample.path.clone(),
            ground_truth: entry.sample.ground_truth.clone(),
            prediction: entry.sample.prediction.clone(),
            audio: self.detail.audio_state(),
            playing: self.detail.is_playing(),
            has_previous: index > 0,
            has_next: index + 1 < total,
        })
    }
}

use super::*;
use crate::browse::{Bounds, CardAudioState};

impl ViewerController {
    /// Report where a card was laid out this frame relative to the viewport.
    pub fn card_bounds(&mut self, index: usize, viewport: Bounds, card: Bounds) -> bool {
        self.card_audio.observe_bounds(index, viewport, card)
    }

    /// The host detected a card entering the proximity zone directly.
    pub fn card_near_viewport(&mut self, index: usize) -> bool {
        self.card_audio.on_proximity(index)
    }

    pub fn play_card(&mut self, index: usize) -> bool {
        self.detail.stop();
        self.card_audio.play(index)
    }

    pub fn pause_card(&mut self, index: usize) {
        self.card_audio.pause(index);
    }

    /// Returns true when the card is now playing.
    pub fn toggle_card(&mut self, index: usize) -> bool {
        if self.card_audio.active() != Some(index) {
            self.detail.stop();
        }
        self.card_audio.toggle(index)
    }

    pub fn card_audio_state(&self, index: usize) -> CardAudioState {
        self.card_audio.card_state(index)
    }

    pub fn active_card(&self) -> Option<usize> {
        self.card_audio.active()
    }
}

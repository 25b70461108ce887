//! Helpers to convert domain data into egui-facing view structs.

use crate::browse::{CardAudioState, MediaState};
use crate::dataset::{DatasetMeta, Sample, sample_number};
use crate::scoring::{SummaryStats, format_rate};

/// A sample placed in the display order, remembering where it sat in the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    pub original_index: usize,
    pub sample: Sample,
}

/// Everything the renderer needs to draw one card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    /// Position in the display order; the key for audio and detail commands.
    pub index: usize,
    /// 1-based position shown to the user.
    pub ordinal: usize,
    pub title: String,
    pub ground_truth: String,
    pub prediction: String,
    pub audio: CardAudioState,
}

/// Contents of the detail overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub index: usize,
    pub ordinal: usize,
    pub total: usize,
    pub title: String,
    pub path: String,
    pub ground_truth: String,
    pub prediction: String,
    pub audio: MediaState,
    pub playing: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Header strip text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryView {
    pub total_samples: String,
    pub word_error_rate: String,
    pub char_error_rate: String,
    pub reported_wer: Option<String>,
    pub model: Option<String>,
}

/// Title shown on cards and in the detail view.
pub fn sample_title(entry: &DisplayEntry) -> String {
    let number = sample_number(&entry.sample.path).unwrap_or(entry.original_index as u64 + 1);
    format!("Sample #{number}")
}

pub fn card_view(index: usize, entry: &DisplayEntry, audio: CardAudioState) -> CardView {
    CardView {
        index,
        ordinal: index + 1,
        title: sample_title(entry),
        ground_truth: entry.sample.ground_truth.clone(),
        prediction: entry.sample.prediction.clone(),
        audio,
    }
}

pub fn summary_view(stats: &SummaryStats, meta: &DatasetMeta) -> SummaryView {
    let reported_wer = meta
        .overall_wer_percent
        .or(meta.overall_wer.map(|wer| wer * 100.0))
        .map(|percent| format!("{percent:.2}%"));
    let model = meta
        .model_checkpoint
        .clone()
        .or_else(|| meta.base_model.clone());
    SummaryView {
        total_samples: stats.total_samples.to_string(),
        word_error_rate: format_rate(stats.word_error_rate),
        char_error_rate: format_rate(stats.char_error_rate),
        reported_wer,
        model,
    }
}

/// Short label for the card's audio badge.
pub fn audio_label(state: &CardAudioState) -> &'static str {
    match state {
        CardAudioState::Deferred => "Audio not loaded",
        CardAudioState::Loading => "Loading audio",
        CardAudioState::Ready => "Ready",
        CardAudioState::Playing => "Playing",
        CardAudioState::Failed(_) => "Audio unavailable",
    }
}

/// "Loading data" followed by 0-3 dots, advancing every half second.
pub fn loading_label(elapsed_secs: f64) -> String {
    let dots = ((elapsed_secs.max(0.0) / 0.5) as usize) % 4;
    format!("Loading data{}", ".".repeat(dots))
}

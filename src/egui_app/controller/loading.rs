use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use super::*;
use crate::browse::reorder;
use crate::egui_app::state::LoadPhase;

const RETRY_EXHAUSTED: &str = "Maximum retry attempts reached. Please restart the viewer.";

impl ViewerController {
    /// Request the dataset on a background thread.
    ///
    /// Returns false when a request is already in flight or the retry ceiling
    /// has been reached.
    pub fn start_load(&mut self) -> bool {
        if self.load.in_flight.is_some() {
            debug!("Dataset load already in flight; ignoring request");
            return false;
        }
        if self.load.attempts > self.settings.retry_limit {
            self.show_retry_exhausted();
            return false;
        }
        self.load.attempts += 1;
        let attempt = self.load.attempts;
        let source = Arc::clone(&self.source);
        let locator = self.locator.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(source.load(&locator));
        });
        self.load.in_flight = Some(rx);
        self.ui.load = LoadPhase::Loading { attempt };
        info!("Loading dataset from {} (attempt {attempt})", self.locator);
        self.set_status(format!("Loading {}", self.locator), StatusTone::Info);
        true
    }

    /// User-initiated retry from the error panel.
    pub fn retry(&mut self) -> bool {
        self.start_load()
    }

    /// True while another attempt may still be made. The first attempt does
    /// not count against `retry_limit`.
    pub fn can_retry(&self) -> bool {
        self.load.in_flight.is_none() && self.load.attempts <= self.settings.retry_limit
    }

    pub fn is_loading(&self) -> bool {
        self.load.in_flight.is_some()
    }

    pub fn attempts(&self) -> u32 {
        self.load.attempts
    }

    /// Apply a finished load, if one arrived. Returns true when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = self.load.in_flight.as_ref() else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(LoadError::NetworkError(
                "Dataset loader stopped unexpectedly".to_string(),
            )),
        };
        self.apply_load_result(result);
        true
    }

    /// Install a dataset or surface the failure in the error panel.
    pub fn apply_load_result(&mut self, result: Result<Dataset, LoadError>) {
        self.load.in_flight = None;
        match result {
            Ok(dataset) => {
                self.load.attempts = 0;
                self.install_dataset(dataset);
            }
            Err(err) => {
                warn!("Dataset load failed: {err}");
                let retryable = self.load.attempts <= self.settings.retry_limit;
                let mut message = err.user_message();
                if !retryable {
                    message = format!("{message} {RETRY_EXHAUSTED}");
                }
                self.set_status(format!("Failed to load dataset: {err}"), StatusTone::Error);
                self.ui.load = LoadPhase::Failed { message, retryable };
            }
        }
    }

    fn install_dataset(&mut self, dataset: Dataset) {
        let Dataset { meta, samples } = dataset;
        let entries = samples
            .into_iter()
            .enumerate()
            .map(|(original_index, sample)| DisplayEntry {
                original_index,
                sample,
            })
            .collect();
        self.display_order = reorder(entries, &mut self.rng);
        let samples: Vec<_> = self
            .display_order
            .iter()
            .map(|entry| entry.sample.clone())
            .collect();
        self.stats = Some(SummaryStats::compute(&samples));
        self.meta = meta;
        self.load.loaded = true;
        self.detail.close();
        self.card_audio.reset();
        self.paginator.reset(self.display_order.len());
        self.rebuild_page();
        self.ui.load = LoadPhase::Loaded;
        info!(
            "Reordered {} samples across {} pages",
            self.display_order.len(),
            self.paginator.total_pages()
        );
        self.set_status(
            format!("{} samples loaded", self.display_order.len()),
            StatusTone::Info,
        );
    }

    fn show_retry_exhausted(&mut self) {
        let message = match &self.ui.load {
            LoadPhase::Failed { message, .. } if message.contains(RETRY_EXHAUSTED) => {
                message.clone()
            }
            LoadPhase::Failed { message, .. } => format!("{message} {RETRY_EXHAUSTED}"),
            _ => RETRY_EXHAUSTED.to_string(),
        };
        self.ui.load = LoadPhase::Failed {
            message,
            retryable: false,
        };
    }
}

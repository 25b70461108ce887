//! Evaluation dataset model, parsing and loading.

mod loader;
mod locator;
mod wire;

pub use loader::{DatasetSource, HttpDatasetSource, LoadError, load};
pub use locator::{DatasetLocator, LocatorError, fallback_path};
pub use wire::{clean_prediction, parse_dataset, sample_number};

/// One evaluation record: an audio clip with its reference and hypothesis text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Audio locator, relative to the dataset location unless absolute.
    pub path: String,
    pub ground_truth: String,
    pub prediction: String,
}

/// Optional run metadata carried alongside the results list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetMeta {
    pub model_checkpoint: Option<String>,
    pub base_model: Option<String>,
    pub total_samples_in_dataset: Option<u64>,
    pub samples_evaluated: Option<u64>,
    pub samples_skipped: Option<u64>,
    /// Word error rate as reported by the evaluation run (0.0-1.0).
    pub overall_wer: Option<f64>,
    pub overall_wer_percent: Option<f64>,
}

/// A fully loaded dataset, replaced wholesale on every successful load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub meta: DatasetMeta,
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

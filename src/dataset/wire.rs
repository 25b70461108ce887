use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{Dataset, DatasetMeta, LoadError, Sample};

static PREDICTION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"text='(.*?)'").expect("prediction regex must compile"));
static SAMPLE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sample_(\d+)\.wav$").expect("sample number regex must compile"));

#[derive(Debug, Deserialize)]
struct SampleWire {
    #[serde(default)]
    path: String,
    #[serde(default)]
    ground_truth: String,
    #[serde(default)]
    prediction: String,
}

#[derive(Debug, Default, Deserialize)]
struct MetaWire {
    #[serde(default)]
    model_checkpoint: Option<String>,
    #[serde(default)]
    base_model: Option<String>,
    #[serde(default)]
    total_samples_in_dataset: Option<u64>,
    #[serde(default)]
    samples_evaluated: Option<u64>,
    #[serde(default)]
    samples_skipped: Option<u64>,
    #[serde(default)]
    overall_wer: Option<f64>,
    #[serde(default)]
    overall_wer_percent: Option<f64>,
}

/// Parse and shape-check a results document.
///
/// The document must be a JSON object whose `results` field is an array of
/// objects. Metadata fields are optional and ignored when malformed.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut root: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|err| LoadError::InvalidFormat(format!("not valid JSON: {err}")))?;
    let Some(object) = root.as_object_mut() else {
        return Err(LoadError::InvalidFormat(
            "top-level value is not an object".to_string(),
        ));
    };
    let results = match object.remove("results") {
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => {
            return Err(LoadError::InvalidFormat(
                "`results` is not an array".to_string(),
            ));
        }
        None => {
            return Err(LoadError::InvalidFormat(
                "missing `results` field".to_string(),
            ));
        }
    };
    let meta: MetaWire = serde_json::from_value(root).unwrap_or_default();

    let samples = results
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<SampleWire>(item)
                .map(|wire| Sample {
                    path: wire.path,
                    ground_truth: wire.ground_truth,
                    prediction: clean_prediction(&wire.prediction),
                })
                .map_err(|err| LoadError::InvalidFormat(format!("result {index}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset {
        meta: DatasetMeta {
            model_checkpoint: meta.model_checkpoint,
            base_model: meta.base_model,
            total_samples_in_dataset: meta.total_samples_in_dataset,
            samples_evaluated: meta.samples_evaluated,
            samples_skipped: meta.samples_skipped,
            overall_wer: meta.overall_wer,
            overall_wer_percent: meta.overall_wer_percent,
        },
        samples,
    })
}

/// Extract the transcript from a raw decoder dump such as
/// `Transcription(text='hello', ...)`; plain predictions pass through trimmed.
pub fn clean_prediction(raw: &str) -> String {
    match PREDICTION_TEXT.captures(raw).and_then(|caps| caps.get(1)) {
        Some(text) => text.as_str().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Sample number embedded in paths like `audio_fixed/sample_00042.wav`.
pub fn sample_number(path: &str) -> Option<u64> {
    SAMPLE_NUMBER
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

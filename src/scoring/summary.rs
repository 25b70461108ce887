use crate::dataset::Sample;

use super::edit_distance::{char_distance, word_distance};

/// Aggregate statistics over the full display order.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStats {
    /// Number of samples in the loaded dataset.
    pub total_samples: usize,
    /// Summed word edits divided by total reference words.
    pub word_error_rate: Option<f64>,
    /// Summed character edits divided by total reference characters.
    pub char_error_rate: Option<f64>,
}

impl SummaryStats {
    /// Compute counts and error rates for the given samples.
    pub fn compute(samples: &[Sample]) -> Self {
        let mut word_errors = 0usize;
        let mut reference_words = 0usize;
        let mut char_errors = 0usize;
        let mut reference_chars = 0usize;
        for sample in samples {
            word_errors += word_distance(&sample.ground_truth, &sample.prediction);
            reference_words += sample.ground_truth.split_whitespace().count();
            char_errors += char_distance(&sample.ground_truth, &sample.prediction);
            reference_chars += sample.ground_truth.chars().count();
        }
        Self {
            total_samples: samples.len(),
            word_error_rate: ratio(word_errors, reference_words),
            char_error_rate: ratio(char_errors, reference_chars),
        }
    }
}

fn ratio(errors: usize, reference: usize) -> Option<f64> {
    (reference > 0).then(|| errors as f64 / reference as f64)
}

/// Format an optional rate as a percentage with two decimals.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ground_truth: &str, prediction: &str) -> Sample {
        Sample {
            path: "audio/sample_00000.wav".into(),
            ground_truth: ground_truth.into(),
            prediction: prediction.into(),
        }
    }

    #[test]
    fn empty_dataset_has_no_rates() {
        let stats = SummaryStats::compute(&[]);
        assert_eq!(stats.total_samples, 0);
        assert_eq!(stats.word_error_rate, None);
        assert_eq!(stats.char_error_rate, None);
    }

    #[test]
    fn rates_pool_errors_across_samples() {
        let samples = vec![
            sample("the cat sat", "the cat sat"),
            sample("on the mat", "on a mat"),
        ];
        let stats = SummaryStats::compute(&samples);
        assert_eq!(stats.total_samples, 2);
        let wer = stats.word_error_rate.unwrap();
        assert!((wer - 1.0 / 6.0).abs() < 1e-9);
        let cer = stats.char_error_rate.unwrap();
        // "the" -> "a" is three edits over 21 reference characters.
        assert!((cer - 3.0 / 21.0).abs() < 1e-9);
    }

    #[test]
    fn format_rate_renders_percent_or_placeholder() {
        assert_eq!(format_rate(Some(0.12345)), "12.35%");
        assert_eq!(format_rate(None), "n/a");
    }
}

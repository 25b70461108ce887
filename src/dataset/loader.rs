use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::http_client;

use super::{Dataset, DatasetLocator, parse_dataset};

/// Upper bound on the size of a results document.
const MAX_DATASET_BYTES: usize = 64 * 1024 * 1024;

/// Failures surfaced while fetching and validating a dataset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP error: {0}")]
    HttpError(u16),
    #[error("Invalid dataset format: {0}")]
    InvalidFormat(String),
}

impl LoadError {
    /// Message suitable for the error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => {
                "Loading the dataset timed out. Check your connection and try again.".to_string()
            }
            Self::NetworkError(_) => {
                "Could not reach the dataset. Check your connection and try again.".to_string()
            }
            Self::HttpError(404) => "Dataset not found (HTTP 404).".to_string(),
            Self::HttpError(code) => format!("The server responded with HTTP {code}."),
            Self::InvalidFormat(_) => {
                "The dataset file is not in the expected format.".to_string()
            }
        }
    }
}

/// Something that can produce a dataset for a locator.
///
/// Implementations are called from a background thread, one call per attempt.
pub trait DatasetSource: Send + Sync {
    fn load(&self, locator: &DatasetLocator) -> Result<Dataset, LoadError>;
}

/// Loads results documents over HTTP(S) or from local files.
#[derive(Clone, Debug)]
pub struct HttpDatasetSource {
    timeout: Duration,
}

impl HttpDatasetSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl DatasetSource for HttpDatasetSource {
    fn load(&self, locator: &DatasetLocator) -> Result<Dataset, LoadError> {
        let bytes = if locator.is_remote() {
            fetch_remote(locator, self.timeout)?
        } else {
            read_local(locator)?
        };
        let dataset = parse_dataset(&bytes)?;
        info!("Loaded {} samples from {}", dataset.len(), locator);
        Ok(dataset)
    }
}

/// Fetch and validate a dataset once with the given timeout.
pub fn load(locator: &DatasetLocator, timeout: Duration) -> Result<Dataset, LoadError> {
    HttpDatasetSource::new(timeout).load(locator)
}

fn fetch_remote(locator: &DatasetLocator, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let url = locator.request_url(cache_buster());
    debug!("Fetching dataset from {url}");
    let response = match http_client::agent()
        .get(url.as_str())
        .timeout(timeout)
        .set("Cache-Control", "no-cache")
        .set("Accept", "application/json")
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(LoadError::HttpError(code)),
        Err(ureq::Error::Transport(err)) => {
            if is_timeout(&err) {
                return Err(LoadError::Timeout);
            }
            return Err(LoadError::NetworkError(err.to_string()));
        }
    };
    http_client::read_response_bytes(response, MAX_DATASET_BYTES).map_err(|err| match err.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => LoadError::Timeout,
        std::io::ErrorKind::InvalidData => LoadError::InvalidFormat(err.to_string()),
        _ => LoadError::NetworkError(err.to_string()),
    })
}

fn read_local(locator: &DatasetLocator) -> Result<Vec<u8>, LoadError> {
    let path = locator.url().to_file_path().map_err(|()| {
        LoadError::NetworkError(format!("{locator} is not a local file path"))
    })?;
    std::fs::read(&path)
        .map_err(|err| LoadError::NetworkError(format!("Failed to read {}: {err}", path.display())))
}

fn cache_buster() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

fn is_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(error) = current {
        if let Some(io) = error.downcast_ref::<std::io::Error>()
            && matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        {
            return true;
        }
        current = error.source();
    }
    false
}

use std::path::{Path, PathBuf};

use url::Url;

/// Extension used for the compressed fallback of each audio clip.
pub const FALLBACK_EXTENSION: &str = "mp3";

/// Errors raised while turning user input into a dataset location.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("Cannot resolve dataset path {path}: {source}")]
    CurrentDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Dataset path {0} cannot be expressed as a file URL")]
    NotAbsolute(PathBuf),
    #[error("Cannot resolve {path} against {base}: {source}")]
    Join {
        base: String,
        path: String,
        source: url::ParseError,
    },
}

/// Where the results document lives; audio paths resolve relative to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetLocator {
    url: Url,
}

impl DatasetLocator {
    /// Accept an `http(s)://` or `file://` URL, or a filesystem path.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        if let Ok(url) = Url::parse(input)
            && matches!(url.scheme(), "http" | "https" | "file")
        {
            return Ok(Self { url });
        }
        Self::from_path(Path::new(input))
    }

    pub fn from_path(path: &Path) -> Result<Self, LocatorError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| LocatorError::CurrentDir {
                    path: path.to_path_buf(),
                    source,
                })?
                .join(path)
        };
        let url = Url::from_file_path(&absolute)
            .map_err(|()| LocatorError::NotAbsolute(absolute.clone()))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// URL to request, with a timestamp query parameter on remote locations so
    /// retries bypass intermediate caches.
    pub fn request_url(&self, cache_buster: u128) -> Url {
        let mut url = self.url.clone();
        if self.is_remote() {
            url.query_pairs_mut()
                .append_pair("_ts", &cache_buster.to_string());
        }
        url
    }

    /// Resolve an audio path from the results document.
    pub fn resolve(&self, path: &str) -> Result<Url, LocatorError> {
        self.url.join(path).map_err(|source| LocatorError::Join {
            base: self.url.to_string(),
            path: path.to_string(),
            source,
        })
    }
}

impl std::fmt::Display for DatasetLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Same path with the file extension swapped for the compressed fallback.
pub fn fallback_path(path: &str) -> String {
    let name_start = path.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    let stem_end = match path[name_start..].rfind('.') {
        Some(0) | None => path.len(),
        Some(dot) => name_start + dot,
    };
    format!("{}.{FALLBACK_EXTENSION}", &path[..stem_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_remote_urls() {
        let locator = DatasetLocator::parse("https://example.invalid/eval/results.json").unwrap();
        assert!(locator.is_remote());
        assert_eq!(locator.url().path(), "/eval/results.json");
    }

    #[test]
    fn relative_paths_become_file_urls() {
        let locator = DatasetLocator::parse("results.json").unwrap();
        assert!(!locator.is_remote());
        assert_eq!(locator.url().scheme(), "file");
        assert!(locator.url().path().ends_with("/results.json"));
    }

    #[test]
    fn cache_buster_only_applies_to_remote() {
        let remote = DatasetLocator::parse("http://localhost:8000/results.json?v=2").unwrap();
        let url = remote.request_url(1234);
        assert_eq!(url.query(), Some("v=2&_ts=1234"));

        let local = DatasetLocator::parse("results.json").unwrap();
        assert_eq!(local.request_url(1234).query(), None);
    }

    #[test]
    fn audio_paths_resolve_next_to_dataset() {
        let locator = DatasetLocator::parse("http://localhost:8000/eval/results.json").unwrap();
        let url = locator.resolve("audio_fixed/sample_00003.wav").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/eval/audio_fixed/sample_00003.wav"
        );
    }

    #[test]
    fn fallback_swaps_extension() {
        assert_eq!(fallback_path("audio/sample_00001.wav"), "audio/sample_00001.mp3");
        assert_eq!(fallback_path("audio.v2/clip"), "audio.v2/clip.mp3");
        assert_eq!(fallback_path("clip.tar.wav"), "clip.tar.mp3");
        assert_eq!(fallback_path(".hidden"), ".hidden.mp3");
    }
}

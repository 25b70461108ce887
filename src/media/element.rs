use std::io::Cursor;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, Sink};
use tracing::{debug, warn};

use crate::browse::{MediaElement, MediaSource, MediaState, SourceKind};
use crate::http_client;

use super::output::AudioOutput;

/// Largest audio clip fetched into memory.
const MAX_CLIP_BYTES: usize = 256 * 1024 * 1024;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct Fetched {
    kind: SourceKind,
    bytes: Vec<u8>,
}

/// Media element that resolves its sources on a worker thread and plays the
/// first one that downloads through a rodio sink.
pub struct RodioElement {
    output: Rc<AudioOutput>,
    sources: Vec<MediaSource>,
    pending: Option<Receiver<Result<Fetched, String>>>,
    audio: Option<Arc<[u8]>>,
    failure: Option<String>,
    sink: Option<Sink>,
    play_requested: bool,
    ended: bool,
}

impl RodioElement {
    pub fn new(output: Rc<AudioOutput>) -> Self {
        Self {
            output,
            sources: Vec::new(),
            pending: None,
            audio: None,
            failure: None,
            sink: None,
            play_requested: false,
            ended: false,
        }
    }

    fn start(&mut self) {
        let Some(audio) = self.audio.clone() else {
            return;
        };
        let needs_queue = self.sink.as_ref().is_none_or(|sink| sink.empty());
        if needs_queue {
            let decoder = match Decoder::new(Cursor::new(audio)) {
                Ok(decoder) => decoder,
                Err(err) => {
                    warn!("Failed to decode audio: {err}");
                    self.failure = Some(format!("Unsupported audio: {err}"));
                    self.play_requested = false;
                    return;
                }
            };
            let sink = self
                .sink
                .get_or_insert_with(|| Sink::connect_new(self.output.mixer()));
            sink.append(decoder);
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        self.ended = false;
    }
}

impl MediaElement for RodioElement {
    fn set_sources(&mut self, sources: &[MediaSource]) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.sources = sources.to_vec();
        self.pending = None;
        self.audio = None;
        self.failure = None;
        self.play_requested = false;
        self.ended = false;
    }

    fn load(&mut self) {
        if self.sources.is_empty() || self.pending.is_some() || self.audio.is_some() {
            return;
        }
        let sources = self.sources.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(resolve_first(&sources));
        });
        self.pending = Some(rx);
        self.failure = None;
    }

    fn play(&mut self) {
        self.play_requested = true;
        if self.audio.is_some() {
            self.start();
        } else {
            self.load();
        }
    }

    fn pause(&mut self) {
        self.play_requested = false;
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn rewind(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.ended = false;
        if self.play_requested {
            self.start();
        }
    }

    fn is_playing(&self) -> bool {
        self.play_requested
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn state(&self) -> MediaState {
        if let Some(reason) = &self.failure {
            return MediaState::Failed(reason.clone());
        }
        if self.audio.is_some() {
            return MediaState::Ready;
        }
        if self.pending.is_some() {
            return MediaState::Loading;
        }
        MediaState::Empty
    }

    fn update(&mut self) {
        if let Some(rx) = self.pending.as_ref() {
            match rx.try_recv() {
                Ok(Ok(fetched)) => {
                    debug!("Resolved {:?} audio source ({} bytes)", fetched.kind, fetched.bytes.len());
                    self.audio = Some(Arc::from(fetched.bytes));
                    self.pending = None;
                    if self.play_requested {
                        self.start();
                    }
                }
                Ok(Err(reason)) => {
                    warn!("Audio sources failed: {reason}");
                    self.failure = Some(reason);
                    self.pending = None;
                    self.play_requested = false;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.failure = Some("Audio loader stopped unexpectedly".to_string());
                    self.pending = None;
                    self.play_requested = false;
                }
            }
        }
        if self.play_requested && self.sink.as_ref().is_some_and(|sink| sink.empty()) {
            self.play_requested = false;
            self.ended = true;
        }
    }
}

/// Try each source in order; the first that downloads wins.
fn resolve_first(sources: &[MediaSource]) -> Result<Fetched, String> {
    let mut errors = Vec::new();
    for source in sources {
        match http_client::fetch_bytes(&source.url, FETCH_TIMEOUT, MAX_CLIP_BYTES) {
            Ok(bytes) => {
                return Ok(Fetched {
                    kind: source.kind,
                    bytes,
                });
            }
            Err(err) => errors.push(format!("{}: {err}", source.url)),
        }
    }
    if errors.is_empty() {
        return Err("No audio sources".to_string());
    }
    Err(errors.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetLocator;

    #[test]
    fn resolve_first_falls_back_to_compressed_copy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp3"), b"ID3fake").unwrap();
        let locator = DatasetLocator::from_path(&dir.path().join("results.json")).unwrap();
        let sources = MediaSource::for_sample(&locator, "clip.wav").unwrap();

        let fetched = resolve_first(&sources).unwrap();
        assert_eq!(fetched.kind, SourceKind::Fallback);
        assert_eq!(fetched.bytes, b"ID3fake");
    }

    #[test]
    fn resolve_first_prefers_primary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.wav"), b"RIFF").unwrap();
        std::fs::write(dir.path().join("clip.mp3"), b"ID3").unwrap();
        let locator = DatasetLocator::from_path(&dir.path().join("results.json")).unwrap();
        let sources = MediaSource::for_sample(&locator, "clip.wav").unwrap();
        assert_eq!(resolve_first(&sources).unwrap().kind, SourceKind::Primary);
    }

    #[test]
    fn resolve_first_reports_every_failure() {
        let dir = tempfile::tempdir().unwrap();
        let locator = DatasetLocator::from_path(&dir.path().join("results.json")).unwrap();
        let sources = MediaSource::for_sample(&locator, "missing.wav").unwrap();
        let err = resolve_first(&sources).unwrap_err();
        assert!(err.contains("missing.wav"));
        assert!(err.contains("missing.mp3"));
        assert_eq!(resolve_first(&[]).unwrap_err(), "No audio sources");
    }
}

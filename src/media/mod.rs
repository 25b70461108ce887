//! Host media backends for card and detail audio.

mod element;
mod output;

use std::rc::Rc;

use crate::browse::{MediaElement, MediaHost, MediaSource, MediaState};

pub use element::RodioElement;
pub use output::{AudioOutput, AudioOutputError};

/// Creates rodio-backed elements sharing one output stream.
pub struct RodioMediaHost {
    output: Rc<AudioOutput>,
}

impl RodioMediaHost {
    pub fn new(output: AudioOutput) -> Self {
        Self {
            output: Rc::new(output),
        }
    }
}

impl MediaHost for RodioMediaHost {
    fn create_element(&mut self) -> Box<dyn MediaElement> {
        Box::new(RodioElement::new(self.output.clone()))
    }
}

/// Used when no audio output could be opened; cards render but never play.
#[derive(Debug, Default)]
pub struct SilentMediaHost;

impl MediaHost for SilentMediaHost {
    fn create_element(&mut self) -> Box<dyn MediaElement> {
        Box::new(SilentElement::default())
    }
}

#[derive(Debug, Default)]
struct SilentElement {
    has_sources: bool,
    loading_requested: bool,
}

impl MediaElement for SilentElement {
    fn set_sources(&mut self, sources: &[MediaSource]) {
        self.has_sources = !sources.is_empty();
        self.loading_requested = false;
    }

    fn load(&mut self) {
        self.loading_requested = self.has_sources;
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn rewind(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn has_ended(&self) -> bool {
        false
    }

    fn state(&self) -> MediaState {
        if self.loading_requested {
            MediaState::Failed("Audio output unavailable".to_string())
        } else {
            MediaState::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetLocator;

    #[test]
    fn silent_elements_report_unavailable_output_once_loaded() {
        let mut host = SilentMediaHost;
        let mut element = host.create_element();
        assert_eq!(element.state(), MediaState::Empty);
        let locator = DatasetLocator::parse("http://localhost/results.json").unwrap();
        element.set_sources(&MediaSource::for_sample(&locator, "a.wav").unwrap());
        element.load();
        element.play();
        assert!(!element.is_playing());
        assert!(matches!(element.state(), MediaState::Failed(_)));
    }
}

use super::lazy_audio::{MediaElement, MediaSource, MediaState};

/// Detail overlay state with one shared audio element.
pub struct DetailController<E> {
    element: E,
    current: Option<usize>,
}

impl<E: MediaElement> DetailController<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Show sample `index` of a display order of length `len`.
    ///
    /// Rejects out-of-range indices. The shared element is stopped and
    /// pointed at the new sample's sources.
    pub fn open(
        &mut self,
        index: usize,
        len: usize,
        sources: impl FnOnce(usize) -> Vec<MediaSource>,
    ) -> bool {
        if index >= len {
            return false;
        }
        self.stop();
        self.element.set_sources(&sources(index));
        self.element.load();
        self.current = Some(index);
        true
    }

    /// Move by `delta` within `[0, len)`; out-of-range moves are ignored.
    pub fn navigate(
        &mut self,
        delta: isize,
        len: usize,
        sources: impl FnOnce(usize) -> Vec<MediaSource>,
    ) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let Some(target) = current.checked_add_signed(delta) else {
            return false;
        };
        if target >= len || target == current {
            return false;
        }
        self.open(target, len, sources)
    }

    pub fn close(&mut self) {
        self.stop();
        self.current = None;
    }

    pub fn play(&mut self) {
        if self.current.is_some() {
            self.element.play();
        }
    }

    pub fn pause(&mut self) {
        self.element.pause();
    }

    pub fn is_playing(&self) -> bool {
        self.element.is_playing()
    }

    pub fn audio_state(&self) -> MediaState {
        self.element.state()
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn update(&mut self) {
        self.element.update();
    }

    /// Pause and rewind the shared element without closing the overlay.
    pub fn stop(&mut self) {
        self.element.pause();
        self.element.rewind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::lazy_audio::tests::FakeElement;
    use crate::dataset::DatasetLocator;

    fn sources(index: usize) -> Vec<MediaSource> {
        let locator = DatasetLocator::parse("http://localhost/results.json").unwrap();
        MediaSource::for_sample(&locator, &format!("clip_{index}.wav")).unwrap()
    }

    #[test]
    fn open_rejects_out_of_range() {
        let mut detail = DetailController::new(FakeElement::default());
        assert!(!detail.open(5, 5, sources));
        assert!(!detail.is_open());
        assert!(detail.open(4, 5, sources));
        assert_eq!(detail.current_index(), Some(4));
        assert!(detail.element().sources[0].url.as_str().ends_with("clip_4.wav"));
    }

    #[test]
    fn navigate_stays_in_bounds() {
        let mut detail = DetailController::new(FakeElement::default());
        detail.open(0, 3, sources);
        assert!(!detail.navigate(-1, 3, sources));
        assert!(detail.navigate(1, 3, sources));
        assert!(detail.navigate(1, 3, sources));
        assert!(!detail.navigate(1, 3, sources));
        assert_eq!(detail.current_index(), Some(2));
    }

    #[test]
    fn close_stops_and_rewinds_audio() {
        let mut detail = DetailController::new(FakeElement::default());
        detail.open(1, 3, sources);
        detail.play();
        assert!(detail.is_playing());
        detail.close();
        assert!(!detail.is_open());
        assert!(!detail.element().playing);
        assert_eq!(detail.element().position, 0);
    }

    #[test]
    fn play_without_open_sample_does_nothing() {
        let mut detail = DetailController::new(FakeElement::default());
        detail.play();
        assert!(!detail.is_playing());
        assert!(!detail.navigate(1, 3, sources));
    }
}

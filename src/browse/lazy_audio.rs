//! Deferred audio source attachment and single-playback enforcement.
//!
//! Cards register a media element without any sources. Sources are attached
//! the first time a card comes near the visible region or the user presses
//! play on it, whichever happens first. Visibility detection itself belongs to
//! the host; this module only needs to be told when a card's bounds change.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
use url::Url;

use crate::dataset::{DatasetLocator, LocatorError, fallback_path};

/// Default distance around the visible region that counts as "near".
pub const DEFAULT_PROXIMITY_MARGIN: f32 = 200.0;

/// Role of a source within an element's candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Uncompressed clip at the sample's own path.
    Primary,
    /// Compressed copy with the extension swapped.
    Fallback,
}

/// One playable candidate for a media element, tried in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSource {
    pub url: Url,
    pub mime: &'static str,
    pub kind: SourceKind,
}

impl MediaSource {
    /// Primary WAV source followed by its MP3 fallback.
    pub fn for_sample(locator: &DatasetLocator, path: &str) -> Result<Vec<Self>, LocatorError> {
        Ok(vec![
            Self {
                url: locator.resolve(path)?,
                mime: "audio/wav",
                kind: SourceKind::Primary,
            },
            Self {
                url: locator.resolve(&fallback_path(path))?,
                mime: "audio/mpeg",
                kind: SourceKind::Fallback,
            },
        ])
    }
}

/// Resource state reported by a media element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaState {
    /// No sources attached yet.
    Empty,
    /// Sources attached, bytes still being resolved.
    Loading,
    Ready,
    /// Every source failed.
    Failed(String),
}

/// A host-provided playable element, modelled on an HTML `<audio>` tag.
pub trait MediaElement {
    /// Replace the candidate sources; does not start fetching.
    fn set_sources(&mut self, sources: &[MediaSource]);
    /// Begin resolving the attached sources.
    fn load(&mut self);
    /// Start or resume playback, loading first if needed.
    fn play(&mut self);
    fn pause(&mut self);
    /// Move the playhead back to the start without changing play state.
    fn rewind(&mut self);
    /// True while playback is requested and not paused or finished.
    fn is_playing(&self) -> bool;
    /// True once playback ran to the end of the clip.
    fn has_ended(&self) -> bool;
    fn state(&self) -> MediaState;
    /// Pump background work; called once per frame.
    fn update(&mut self) {}
}

impl<E: MediaElement + ?Sized> MediaElement for Box<E> {
    fn set_sources(&mut self, sources: &[MediaSource]) {
        (**self).set_sources(sources);
    }

    fn load(&mut self) {
        (**self).load();
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn rewind(&mut self) {
        (**self).rewind();
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn has_ended(&self) -> bool {
        (**self).has_ended()
    }

    fn state(&self) -> MediaState {
        (**self).state()
    }

    fn update(&mut self) {
        (**self).update();
    }
}

/// Factory for fresh media elements; one per card plus the detail view.
pub trait MediaHost {
    fn create_element(&mut self) -> Box<dyn MediaElement>;
}

/// Axis-aligned bounds in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn expand(self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// The visible region grown by a margin on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityZone {
    margin: f32,
}

impl ProximityZone {
    pub fn new(margin: f32) -> Self {
        Self {
            margin: margin.max(0.0),
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn contains(&self, viewport: Bounds, card: Bounds) -> bool {
        viewport.expand(self.margin).intersects(&card)
    }
}

impl Default for ProximityZone {
    fn default() -> Self {
        Self::new(DEFAULT_PROXIMITY_MARGIN)
    }
}

struct CardAudio<E> {
    element: E,
    sources: Vec<MediaSource>,
}

/// What a card's audio control should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardAudioState {
    /// Sources not attached yet.
    Deferred,
    Loading,
    Ready,
    Playing,
    Failed(String),
}

/// Tracks the current page's card elements and which sample indices have
/// had sources attached this session.
pub struct LazyAudioController<E> {
    zone: ProximityZone,
    cards: BTreeMap<usize, CardAudio<E>>,
    observed: BTreeSet<usize>,
    loaded: BTreeSet<usize>,
    active: Option<usize>,
}

impl<E: MediaElement> LazyAudioController<E> {
    pub fn new(zone: ProximityZone) -> Self {
        Self {
            zone,
            cards: BTreeMap::new(),
            observed: BTreeSet::new(),
            loaded: BTreeSet::new(),
            active: None,
        }
    }

    pub fn zone(&self) -> ProximityZone {
        self.zone
    }

    /// Register the element for the card showing display index `index`.
    ///
    /// Indices attached earlier in the session get their sources right away;
    /// everything else is put under proximity observation.
    pub fn register(&mut self, index: usize, element: E, sources: Vec<MediaSource>) {
        self.cards.insert(index, CardAudio { element, sources });
        if self.loaded.contains(&index) {
            self.observed.remove(&index);
            if let Some(card) = self.cards.get_mut(&index) {
                card.element.set_sources(&card.sources);
                card.element.load();
            }
        } else {
            self.observed.insert(index);
        }
    }

    /// Stop everything and drop the current page's elements and observers.
    ///
    /// The loaded set is kept so revisited cards skip observation.
    pub fn teardown(&mut self) {
        self.pause_all();
        self.cards.clear();
        self.observed.clear();
    }

    /// Forget the whole session, including which indices were loaded.
    pub fn reset(&mut self) {
        self.teardown();
        self.loaded.clear();
    }

    pub fn is_observed(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    pub fn observed(&self) -> impl Iterator<Item = usize> + '_ {
        self.observed.iter().copied()
    }

    pub fn is_registered(&self, index: usize) -> bool {
        self.cards.contains_key(&index)
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.contains(&index)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn element(&self, index: usize) -> Option<&E> {
        self.cards.get(&index).map(|card| &card.element)
    }

    /// Report a card's current bounds; attaches once it enters the zone.
    pub fn observe_bounds(&mut self, index: usize, viewport: Bounds, card: Bounds) -> bool {
        if !self.observed.contains(&index) || !self.zone.contains(viewport, card) {
            return false;
        }
        self.on_proximity(index)
    }

    /// The host saw the card enter the zone. Ignored for unobserved cards.
    pub fn on_proximity(&mut self, index: usize) -> bool {
        if !self.observed.remove(&index) {
            return false;
        }
        self.attach(index)
    }

    /// Attach sources and begin loading; a no-op when already attached.
    pub fn attach(&mut self, index: usize) -> bool {
        if self.loaded.contains(&index) {
            return false;
        }
        let Some(card) = self.cards.get_mut(&index) else {
            return false;
        };
        card.element.set_sources(&card.sources);
        card.element.load();
        self.loaded.insert(index);
        self.observed.remove(&index);
        debug!("Attached audio sources for sample {index}");
        true
    }

    /// Start playback on one card, stopping and rewinding every other card.
    pub fn play(&mut self, index: usize) -> bool {
        if !self.cards.contains_key(&index) {
            return false;
        }
        self.attach(index);
        for (other, card) in self.cards.iter_mut() {
            if *other != index {
                card.element.pause();
                card.element.rewind();
            }
        }
        if let Some(card) = self.cards.get_mut(&index) {
            card.element.play();
        }
        self.active = Some(index);
        true
    }

    pub fn pause(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(&index) {
            card.element.pause();
        }
        if self.active == Some(index) {
            self.active = None;
        }
    }

    /// Play if idle, pause if this card is the active one.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.active == Some(index) {
            self.pause(index);
            false
        } else {
            self.play(index)
        }
    }

    pub fn pause_all(&mut self) {
        for card in self.cards.values_mut() {
            card.element.pause();
        }
        self.active = None;
    }

    /// Pause every card and return each to the start of its clip.
    pub fn stop_all(&mut self) {
        for card in self.cards.values_mut() {
            card.element.pause();
            card.element.rewind();
        }
        self.active = None;
    }

    /// Pump element work and drop the active marker once playback ends.
    pub fn update(&mut self) {
        for card in self.cards.values_mut() {
            card.element.update();
        }
        if let Some(index) = self.active {
            let finished = self
                .cards
                .get(&index)
                .is_none_or(|card| card.element.has_ended() || !card.element.is_playing());
            if finished {
                self.active = None;
            }
        }
    }

    pub fn card_state(&self, index: usize) -> CardAudioState {
        let Some(card) = self.cards.get(&index) else {
            return CardAudioState::Deferred;
        };
        if self.active == Some(index) && card.element.is_playing() {
            return CardAudioState::Playing;
        }
        match card.element.state() {
            MediaState::Empty => CardAudioState::Deferred,
            MediaState::Loading => CardAudioState::Loading,
            MediaState::Ready => CardAudioState::Ready,
            MediaState::Failed(reason) => CardAudioState::Failed(reason),
        }
    }
}

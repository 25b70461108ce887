//! Viewer controller: owns all browsing state and exposes named commands the
//! renderer calls in response to input.

mod connectivity;
mod detail;
mod display;
mod loading;
mod navigation;
mod playback;

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::browse::{
    DetailController, LazyAudioController, MediaElement, MediaHost, MediaSource, PageSlice,
    Paginator, ProximityZone,
};
use crate::dataset::{Dataset, DatasetLocator, DatasetMeta, DatasetSource, LoadError};
use crate::egui_app::state::{StatusLine, StatusTone, UiState};
use crate::egui_app::view_model::DisplayEntry;
use crate::preferences::{PreferenceStore, Preferences, ViewerSettings};
use crate::scoring::SummaryStats;

/// Collaborators handed to the controller at startup.
pub struct ControllerDeps {
    pub locator: DatasetLocator,
    pub settings: ViewerSettings,
    pub preferences: Box<dyn PreferenceStore>,
    pub source: Arc<dyn DatasetSource>,
    pub media: Box<dyn MediaHost>,
}

/// Bookkeeping for dataset requests and the retry ceiling.
#[derive(Default)]
struct LoadTracker {
    attempts: u32,
    in_flight: Option<Receiver<Result<Dataset, LoadError>>>,
    loaded: bool,
}

/// Maintains viewer state and bridges core logic to the egui UI.
pub struct ViewerController {
    pub ui: UiState,
    settings: ViewerSettings,
    preferences: Preferences,
    store: Box<dyn PreferenceStore>,
    system_prefers_dark: bool,
    locator: DatasetLocator,
    source: Arc<dyn DatasetSource>,
    media: Box<dyn MediaHost>,
    rng: StdRng,
    meta: DatasetMeta,
    display_order: Vec<DisplayEntry>,
    stats: Option<SummaryStats>,
    paginator: Paginator,
    card_audio: LazyAudioController<Box<dyn MediaElement>>,
    detail: DetailController<Box<dyn MediaElement>>,
    load: LoadTracker,
    online: bool,
}

impl ViewerController {
    pub fn new(deps: ControllerDeps) -> Self {
        let ControllerDeps {
            locator,
            settings,
            preferences: store,
            source,
            mut media,
        } = deps;
        let settings = settings.normalized();
        let preferences = match store.load() {
            Ok(preferences) => preferences.normalized(),
            Err(err) => {
                warn!("Failed to read preferences, using defaults: {err}");
                Preferences::default()
            }
        };
        let detail = DetailController::new(media.create_element());
        Self {
            ui: UiState::default(),
            paginator: Paginator::new(settings.page_size),
            card_audio: LazyAudioController::new(ProximityZone::new(settings.proximity_margin)),
            settings,
            preferences,
            store,
            system_prefers_dark: true,
            locator,
            source,
            media,
            rng: StdRng::from_os_rng(),
            meta: DatasetMeta::default(),
            display_order: Vec::new(),
            stats: None,
            detail,
            load: LoadTracker::default(),
            online: true,
        }
    }

    /// Use a fixed seed for the display reorder.
    pub fn with_reorder_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn locator(&self) -> &DatasetLocator {
        &self.locator
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// True once any dataset has been applied this session.
    pub fn has_dataset(&self) -> bool {
        self.load.loaded
    }

    pub fn display_len(&self) -> usize {
        self.display_order.len()
    }

    pub fn display_order(&self) -> &[DisplayEntry] {
        &self.display_order
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn current_page(&self) -> PageSlice<'_, DisplayEntry> {
        self.paginator.page_slice(&self.display_order)
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        self.stats.as_ref()
    }

    pub fn meta(&self) -> &DatasetMeta {
        &self.meta
    }

    pub fn card_audio(&self) -> &LazyAudioController<Box<dyn MediaElement>> {
        &self.card_audio
    }

    /// Pump background work: dataset results and media elements.
    pub fn tick(&mut self) {
        self.poll_load();
        self.card_audio.update();
        self.detail.update();
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusLine {
            text: text.into(),
            tone,
        };
    }

    /// Primary and fallback sources for the sample at display index `index`.
    fn sources_for(&self, index: usize) -> Vec<MediaSource> {
        let Some(entry) = self.display_order.get(index) else {
            return Vec::new();
        };
        match MediaSource::for_sample(&self.locator, &entry.sample.path) {
            Ok(sources) => sources,
            Err(err) => {
                warn!("Cannot resolve audio for {}: {err}", entry.sample.path);
                Vec::new()
            }
        }
    }
}

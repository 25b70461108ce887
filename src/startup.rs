//! Assemble the viewer's collaborators from the command line, config files
//! and the host audio device.

use std::sync::Arc;

use tracing::warn;

use crate::dataset::{DatasetLocator, HttpDatasetSource, LocatorError};
use crate::egui_app::controller::ControllerDeps;
use crate::logging::LoggingError;
use crate::media::{AudioOutput, AudioOutputError, RodioMediaHost, SilentMediaHost};
use crate::preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ViewerSettings,
    load_settings_or_default,
};

/// Results document loaded when no locator is passed on the command line.
pub const DEFAULT_DATASET: &str = "evaluation_results_clean.json";

/// Startup failures. Only an unusable locator stops the viewer.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Invalid dataset location: {0}")]
    Locator(#[from] LocatorError),
    #[error(transparent)]
    AudioOutput(#[from] AudioOutputError),
    #[error("Logging disabled: {0}")]
    Logging(#[from] LoggingError),
}

/// Controller inputs plus non-fatal problems to surface in the status line.
pub struct Startup {
    pub deps: ControllerDeps,
    pub warnings: Vec<InitError>,
}

/// Resolve the dataset locator from the first CLI argument.
pub fn resolve_locator(arg: Option<&str>) -> Result<DatasetLocator, InitError> {
    let input = arg
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DATASET);
    Ok(DatasetLocator::parse(input)?)
}

/// Build everything the controller needs, degrading where possible.
pub fn prepare(arg: Option<&str>) -> Result<Startup, InitError> {
    let locator = resolve_locator(arg)?;
    let mut warnings = Vec::new();

    let settings = load_settings_or_default().unwrap_or_else(|err| {
        warn!("Failed to read settings, using defaults: {err}");
        ViewerSettings::default()
    });

    let media: Box<dyn crate::browse::MediaHost> = match AudioOutput::open_default() {
        Ok(output) => Box::new(RodioMediaHost::new(output)),
        Err(err) => {
            warn!("{err}; continuing without audio");
            warnings.push(InitError::from(err));
            Box::new(SilentMediaHost)
        }
    };

    let preferences: Box<dyn PreferenceStore> = match FilePreferenceStore::default_location() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("Preferences will not persist: {err}");
            Box::new(MemoryPreferenceStore::default())
        }
    };

    let source = Arc::new(HttpDatasetSource::new(settings.load_timeout()));
    Ok(Startup {
        deps: ControllerDeps {
            locator,
            settings,
            preferences,
            source,
            media,
        },
        warnings,
    })
}

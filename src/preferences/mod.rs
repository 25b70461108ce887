//! Persisted user preferences and viewer tuning settings.

mod errors;
mod io;
mod types;

pub use errors::PreferencesError;
pub use io::{
    FilePreferenceStore, MemoryPreferenceStore, PREFERENCES_FILE_NAME, PreferenceStore,
    SETTINGS_FILE_NAME, load_preferences_from, load_settings_from, load_settings_or_default,
    preferences_path, save_preferences_to, settings_path,
};
pub use types::{
    DEFAULT_FONT_SIZE, FONT_SIZE_STEP, LayoutMode, MAX_FONT_SIZE, MIN_FONT_SIZE, Preferences,
    Theme, ViewerSettings, clamp_font_size,
};

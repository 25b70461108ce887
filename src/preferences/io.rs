use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::app_dirs;

use super::{Preferences, PreferencesError, ViewerSettings};

/// File holding user preferences, rewritten on every change.
pub const PREFERENCES_FILE_NAME: &str = "preferences.toml";
/// File holding viewer tuning settings.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Persistence seam for preferences so hosts and tests can swap backends.
pub trait PreferenceStore {
    fn load(&self) -> Result<Preferences, PreferencesError>;
    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError>;
}

/// Preferences stored as TOML on disk.
#[derive(Clone, Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located in the application root directory.
    pub fn default_location() -> Result<Self, PreferencesError> {
        Ok(Self::new(preferences_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Preferences, PreferencesError> {
        load_preferences_from(&self.path)
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        save_preferences_to(preferences, &self.path)
    }
}

/// In-memory store used when no config directory is available.
///
/// Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    slot: Arc<Mutex<Option<Preferences>>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferencesError> {
        let guard = self.slot.lock().unwrap_or_else(|err| err.into_inner());
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let mut guard = self.slot.lock().unwrap_or_else(|err| err.into_inner());
        *guard = Some(preferences.clone());
        Ok(())
    }
}

/// Resolve the preferences file path, ensuring the parent directory exists.
pub fn preferences_path() -> Result<PathBuf, PreferencesError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(PREFERENCES_FILE_NAME))
}

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn settings_path() -> Result<PathBuf, PreferencesError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(SETTINGS_FILE_NAME))
}

/// Load settings from the application root, returning defaults if missing.
pub fn load_settings_or_default() -> Result<ViewerSettings, PreferencesError> {
    load_settings_from(&settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Result<ViewerSettings, PreferencesError> {
    Ok(read_toml::<ViewerSettings>(path)?
        .unwrap_or_default()
        .normalized())
}

pub fn load_preferences_from(path: &Path) -> Result<Preferences, PreferencesError> {
    Ok(read_toml::<Preferences>(path)?
        .unwrap_or_default()
        .normalized())
}

/// Write preferences atomically so a crash never leaves a partial file.
pub fn save_preferences_to(preferences: &Preferences, path: &Path) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PreferencesError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data =
        toml::to_string_pretty(preferences).map_err(|source| PreferencesError::SerializeToml {
            path: path.to_path_buf(),
            source,
        })?;
    atomic_write(path, data.as_bytes())
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PreferencesError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PreferencesError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| PreferencesError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), PreferencesError> {
    use rand::TryRngCore;
    let dir = path.parent().ok_or_else(|| PreferencesError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other("config path has no parent directory"),
    })?;
    let file_name = path.file_name().ok_or_else(|| PreferencesError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other("config path has no file name"),
    })?;

    let mut bytes = [0u8; 6];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|source| PreferencesError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!(
                "failed to generate temporary file suffix: {source}"
            )),
        })?;
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let tmp_path = dir.join(format!("{}.tmp-{}", file_name.to_string_lossy(), suffix));

    let result = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(PreferencesError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> PreferencesError {
    match error {
        app_dirs::AppDirError::NoBaseDir => PreferencesError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            PreferencesError::CreateDir { path, source }
        }
    }
}

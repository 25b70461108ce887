use serde::{Deserialize, Serialize};

use crate::browse::lazy_audio::DEFAULT_PROXIMITY_MARGIN;
use crate::browse::paging::DEFAULT_PAGE_SIZE;

/// Smallest selectable text size in points.
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest selectable text size in points.
pub const MAX_FONT_SIZE: u32 = 28;
/// Increment applied by the font size buttons and shortcuts.
pub const FONT_SIZE_STEP: u32 = 2;
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_RETRY_LIMIT: u32 = 3;
pub const DEFAULT_LOAD_TIMEOUT_SECS: u64 = 10;

/// How cards are arranged on a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Explicit colour theme choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// User preferences persisted across launches.
///
/// Config keys (TOML): `font_size`, `layout`, `theme`. A missing `theme`
/// means "follow the system setting".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub layout: LayoutMode,
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            layout: LayoutMode::default(),
            theme: None,
        }
    }
}

impl Preferences {
    pub fn normalized(mut self) -> Self {
        self.font_size = clamp_font_size(self.font_size);
        self
    }

    /// Resolve the theme, falling back to the system preference.
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self.theme {
            Some(theme) => theme == Theme::Dark,
            None => system_prefers_dark,
        }
    }
}

/// Tuning knobs read from `config.toml`; never written by the viewer.
///
/// Config keys (TOML): `page_size`, `retry_limit`, `load_timeout_secs`,
/// `proximity_margin`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Retries allowed after the initial load attempt fails.
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
    /// Logical pixels around the visible area that trigger audio attachment.
    #[serde(default = "default_proximity_margin")]
    pub proximity_margin: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            retry_limit: default_retry_limit(),
            load_timeout_secs: default_load_timeout_secs(),
            proximity_margin: default_proximity_margin(),
        }
    }
}

impl ViewerSettings {
    pub fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.retry_limit = self.retry_limit.max(1);
        self.load_timeout_secs = self.load_timeout_secs.max(1);
        if !self.proximity_margin.is_finite() || self.proximity_margin < 0.0 {
            self.proximity_margin = 0.0;
        }
        self
    }

    pub fn load_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.load_timeout_secs)
    }
}

pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_retry_limit() -> u32 {
    DEFAULT_RETRY_LIMIT
}

fn default_load_timeout_secs() -> u64 {
    DEFAULT_LOAD_TIMEOUT_SECS
}

fn default_proximity_margin() -> f32 {
    DEFAULT_PROXIMITY_MARGIN
}

//! UI-facing state owned by the viewer controller.

/// Severity used to colour the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

/// Status text shown in the footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusLine {
    pub fn idle() -> Self {
        Self {
            text: "Waiting for data".into(),
            tone: StatusTone::Idle,
        }
    }
}

/// Where the dataset load currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; `attempt` is 1-based.
    Loading { attempt: u32 },
    Loaded,
    /// The last attempt failed. `retryable` is false once the retry ceiling is hit.
    Failed { message: String, retryable: bool },
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusLine,
    pub load: LoadPhase,
    /// Advisory shown above the cards, e.g. while offline.
    pub notice: Option<String>,
    /// Set on page changes; the renderer scrolls to the top and clears it.
    pub scroll_to_top_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusLine::idle(),
            load: LoadPhase::Idle,
            notice: None,
            scroll_to_top_requested: false,
        }
    }
}

//! Library exports for reuse in benchmarks and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Reordering, paging, lazy audio and detail view state.
pub mod browse;
/// Dataset host reachability.
pub mod connectivity;
/// Evaluation dataset model and loading.
pub mod dataset;
/// Shared egui UI modules.
pub mod egui_app;
pub(crate) mod http_client;
/// Tracing setup.
pub mod logging;
/// Audio playback backends.
pub mod media;
/// Persisted preferences and viewer settings.
pub mod preferences;
/// Edit distance and error rates.
pub mod scoring;
/// Startup wiring.
pub mod startup;

//! Entry point for the evaluation results viewer.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use evalview::egui_app::controller::ViewerController;
use evalview::egui_app::ui::{EvalViewApp, LaunchError, MIN_VIEWPORT_SIZE};
use evalview::logging;
use evalview::startup::{self, InitError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("{}", InitError::from(err));
    }

    let arg = std::env::args().nth(1);
    let startup = startup::prepare(arg.as_deref());

    let viewport = egui::ViewportBuilder::default()
        .with_title("Evaluation Results")
        .with_inner_size([1200.0, 800.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "evalview",
        native_options,
        Box::new(move |_cc| match startup {
            Ok(startup) => {
                let warnings: Vec<String> =
                    startup.warnings.iter().map(ToString::to_string).collect();
                let controller = ViewerController::new(startup.deps);
                Ok(Box::new(EvalViewApp::new(controller, &warnings)))
            }
            Err(err) => {
                tracing::error!("Startup failed: {err}");
                Ok(Box::new(LaunchError {
                    message: err.to_string(),
                }))
            }
        }),
    )?;
    Ok(())
}

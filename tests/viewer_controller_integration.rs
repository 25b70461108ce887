mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use support::evalview_env::EvalviewEnvGuard;
use support::http::{json_response, results_json, serve, status_response};
use support::media::ScriptedMediaHost;

use evalview::browse::{Bounds, CardAudioState};
use evalview::dataset::{DatasetLocator, HttpDatasetSource};
use evalview::egui_app::controller::{ControllerDeps, ViewerController};
use evalview::egui_app::state::LoadPhase;
use evalview::egui_app::view_model::sample_title;
use evalview::preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PREFERENCES_FILE_NAME, PreferenceStore,
    ViewerSettings,
};
use tempfile::TempDir;

fn controller_for(
    url: &str,
    media: ScriptedMediaHost,
    store: Box<dyn PreferenceStore>,
) -> ViewerController {
    ViewerController::new(ControllerDeps {
        locator: DatasetLocator::parse(url).expect("locator"),
        settings: ViewerSettings::default(),
        preferences: store,
        source: Arc::new(HttpDatasetSource::new(Duration::from_secs(5))),
        media: Box::new(media),
    })
    .with_reorder_seed(42)
}

fn wait_for_load(controller: &mut ViewerController) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.is_loading() {
        controller.tick();
        assert!(Instant::now() < deadline, "dataset load timed out");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn four_hundred_samples_browse_end_to_end() {
    let url = serve(vec![json_response(&results_json(400))]);
    let media = ScriptedMediaHost::default();
    let mut controller = controller_for(
        &url,
        media.clone(),
        Box::new(MemoryPreferenceStore::default()),
    );
    assert!(controller.start_load());
    wait_for_load(&mut controller);
    assert_eq!(controller.ui.load, LoadPhase::Loaded);
    assert_eq!(controller.display_len(), 400);
    assert_eq!(controller.paginator().total_pages(), 40);
    assert_eq!(controller.meta().model_checkpoint.as_deref(), Some("ckpt-42"));

    let first = &controller.display_order()[0];
    assert_eq!(first.original_index, 59);
    assert_eq!(sample_title(first), "Sample #60");
    assert_eq!(first.sample.prediction, "clip 59 text");

    // One detail element plus ten cards, none attached before proximity.
    assert_eq!(media.created(), 11);
    assert!(media.attached_paths().is_empty());
    assert!(controller.take_scroll_to_top());

    assert!(controller.next_page());
    assert!(controller.next_page());
    let page = controller.current_page();
    assert_eq!((page.start_ordinal, page.end_ordinal), (21, 30));
    assert_eq!(page.items.len(), 10);
    assert!(controller.take_scroll_to_top());
    let observed: Vec<usize> = controller.card_audio().observed().collect();
    assert_eq!(observed, (20..30).collect::<Vec<_>>());

    let viewport = Bounds::new(0.0, 0.0, 1000.0, 800.0);
    let visible = Bounds::new(0.0, 0.0, 1000.0, 200.0);
    assert!(controller.card_bounds(20, viewport, visible));
    assert_eq!(media.attached_paths().len(), 1);
    let expected_path = format!(
        "/audio/sample_{:05}.wav",
        controller.display_order()[20].original_index + 1
    );
    assert_eq!(media.attached_paths()[0], expected_path);
    assert_eq!(controller.card_audio_state(21), CardAudioState::Deferred);

    controller.play_card(21);
    controller.play_card(22);
    assert_eq!(media.playing(), 1);
    assert_eq!(controller.card_audio_state(22), CardAudioState::Playing);

    controller.go_to_page(39);
    assert_eq!(media.playing(), 0);
    let last = controller.current_page();
    assert_eq!((last.start_ordinal, last.end_ordinal), (391, 400));
}

#[test]
fn font_size_survives_restart() {
    let temp = TempDir::new().expect("tempdir");
    let _env = EvalviewEnvGuard::set_config_home(temp.path().to_path_buf());
    let url = serve(Vec::new());

    let store = FilePreferenceStore::default_location().expect("store");
    let mut controller = controller_for(&url, ScriptedMediaHost::default(), Box::new(store));
    assert_eq!(controller.font_size(), 16);
    for _ in 0..4 {
        controller.increase_font_size();
    }
    assert_eq!(controller.font_size(), 24);
    drop(controller);

    assert!(
        temp.path()
            .join(".evalview")
            .join(PREFERENCES_FILE_NAME)
            .is_file()
    );
    let store = FilePreferenceStore::default_location().expect("store");
    let reopened = controller_for(&url, ScriptedMediaHost::default(), Box::new(store));
    assert_eq!(reopened.font_size(), 24);
}

#[test]
fn corrupt_preferences_fall_back_to_defaults() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join(PREFERENCES_FILE_NAME);
    std::fs::write(&path, "font_size = \"huge\"").expect("write prefs");
    let url = serve(Vec::new());
    let controller = controller_for(
        &url,
        ScriptedMediaHost::default(),
        Box::new(FilePreferenceStore::new(path)),
    );
    assert_eq!(controller.font_size(), 16);
}

#[test]
fn server_errors_stop_retrying_at_the_ceiling() {
    let url = serve(vec![
        status_response(503, "Service Unavailable"),
        status_response(503, "Service Unavailable"),
        status_response(503, "Service Unavailable"),
        status_response(503, "Service Unavailable"),
    ]);
    let mut controller = controller_for(
        &url,
        ScriptedMediaHost::default(),
        Box::new(MemoryPreferenceStore::default()),
    );
    assert!(controller.start_load());
    wait_for_load(&mut controller);
    assert!(matches!(
        controller.ui.load,
        LoadPhase::Failed {
            retryable: true,
            ..
        }
    ));
    for _ in 0..3 {
        assert!(controller.retry());
        wait_for_load(&mut controller);
    }

    let LoadPhase::Failed { message, retryable } = &controller.ui.load else {
        panic!("expected failure, got {:?}", controller.ui.load);
    };
    assert!(!retryable);
    assert!(message.contains("HTTP 503"));
    assert!(message.contains("Maximum retry attempts reached"));
    assert!(!controller.retry());
}

#[test]
fn html_payload_is_reported_as_invalid_format() {
    let body = "<html><body>nope</body></html>";
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let url = serve(vec![response]);
    let mut controller = controller_for(
        &url,
        ScriptedMediaHost::default(),
        Box::new(MemoryPreferenceStore::default()),
    );
    controller.start_load();
    wait_for_load(&mut controller);
    let LoadPhase::Failed { message, .. } = &controller.ui.load else {
        panic!("expected failure, got {:?}", controller.ui.load);
    };
    assert!(message.contains("not in the expected format"));
    assert!(!controller.has_dataset());
}

#[test]
fn coming_back_online_reloads_missing_dataset() {
    let url = serve(vec![
        status_response(500, "Internal Server Error"),
        json_response(&results_json(3)),
    ]);
    let mut controller = controller_for(
        &url,
        ScriptedMediaHost::default(),
        Box::new(MemoryPreferenceStore::default()),
    );
    controller.start_load();
    wait_for_load(&mut controller);
    assert!(!controller.has_dataset());

    controller.set_online(false);
    assert!(controller.ui.notice.is_some());
    controller.set_online(true);
    assert!(controller.is_loading());
    wait_for_load(&mut controller);
    assert!(controller.has_dataset());
    assert_eq!(controller.display_len(), 3);
    assert_eq!(controller.current_page().end_ordinal, 3);
}

#![warn(clippy::all, rust_2018_idioms)]

use app_core::backend::BackendEventLoop;
use kurve::{BackendAppState, Config, EguiApp};

const WINDOW_NAME: &str = "Kurve";

fn main() -> eframe::Result {
    env_logger::init();

    // start backend loop
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let config = Config::default();
    let backend_state = BackendAppState::default();
    let eventloop_handle = BackendEventLoop::new(request_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(EguiApp::new(
                cc,
                config,
                request_tx,
                eventloop_handle,
            )))
        }),
    )
}

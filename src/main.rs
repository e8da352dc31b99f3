//! Xiangqi viewer
//!
//! A hotseat board for exercising the rules engine by hand. Set `RUST_LOG`
//! (e.g. `RUST_LOG=xiangqi=debug`) to see move and repetition logging.

use tracing_subscriber::EnvFilter;
use xiangqi::ui::XiangqiApp;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 820.0])
            .with_min_inner_size([760.0, 640.0])
            .with_title("Xiangqi"),
        ..Default::default()
    };

    eframe::run_native(
        "Xiangqi",
        options,
        Box::new(|cc| Ok(Box::new(XiangqiApp::new(cc)))),
    )
}

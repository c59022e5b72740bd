//! Main entry point for the Billow application
//! Opens the database and starts the egui application framework.

use billow::ui::app::BillowApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("Billow"),
        ..Default::default()
    };

    eframe::run_native(
        "Billow",
        options,
        Box::new(|cc| Ok(Box::new(BillowApp::new(cc)))),
    )
}

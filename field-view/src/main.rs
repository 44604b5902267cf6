//! Application entry point for the interactive particle grid viewer.
//!
//! This binary sets up logging and eframe/egui, and delegates the render
//! loop and all input handling to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// The window is sized to fit the default lattice plus the control and
/// status bars. Set `RUST_LOG=debug` to see grid and input diagnostics.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop, or
///   the default configuration is rejected.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let viewer = Viewer::new().map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    let size = viewer.surface_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size.x + 32.0, size.y + 96.0])
            .with_title("Particle Grid"),
        ..Default::default()
    };

    eframe::run_native("Particle Grid", options, Box::new(|_cc| Ok(Box::new(viewer))))
}

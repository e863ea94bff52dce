mod app;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalaryLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset to load at startup: `salary-lens path/to/salary_data.csv`
    let initial_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Lens – Jobs & Salaries",
        options,
        Box::new(move |cc| Ok(Box::new(SalaryLensApp::new(&cc.egui_ctx, initial_path)))),
    )
}

use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, DatasetView};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryLensApp {
    pub state: AppState,
}

impl SalaryLensApp {
    /// Create the app, starting a background load of `initial_path` if given.
    pub fn new(ctx: &egui::Context, initial_path: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = initial_path {
            let ctx = ctx.clone();
            state.request_load(path, move || ctx.request_repaint());
        }
        Self { state }
    }
}

impl eframe::App for SalaryLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_pending();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if self.state.view() != DatasetView::Ready {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::empty_state(ui, self.state.view());
            });
            return;
        }

        // ---- Left side panel: yearly table ----
        egui::SidePanel::left("summary_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Jobs per year");
                ui.separator();
                table::summary_table(ui, &mut self.state);
            });

        // ---- Bottom panel: job titles of the selected year ----
        egui::TopBottomPanel::bottom("breakdown_panel")
            .default_height(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::breakdown_table(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::jobs_per_year_plot(ui, &mut self.state);
        });
    }
}

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export;
use crate::state::{AppState, DatasetView};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                let ctx = ui.ctx().clone();
                state.reload(move || ctx.request_repaint());
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.summary.is_empty(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if state.is_loading() {
            ui.label("Loading…");
            ui.separator();
        }

        if state.engine.is_initialized() {
            let file = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{} records loaded from {file}", state.engine.len()));
            if state.skipped_rows > 0 {
                ui.label(
                    RichText::new(format!("{} rows skipped", state.skipped_rows))
                        .color(Color32::YELLOW),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(msg.as_str());
        }
    });
}

// ---------------------------------------------------------------------------
// Placeholder for every state without tables to show
// ---------------------------------------------------------------------------

pub fn empty_state(ui: &mut Ui, view: DatasetView<'_>) {
    ui.centered_and_justified(|ui: &mut Ui| match view {
        DatasetView::NotLoaded => {
            ui.heading("Open a salary CSV to begin  (File → Open…)");
        }
        DatasetView::Loading => {
            ui.heading("Loading dataset…");
        }
        DatasetView::Failed(reason) => {
            ui.heading(RichText::new(format!("No data: {reason}")).color(Color32::RED));
        }
        DatasetView::Empty { skipped_rows } => {
            ui.heading(format!(
                "Dataset loaded but it holds no valid records ({skipped_rows} rows skipped)"
            ));
        }
        DatasetView::Ready => {}
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        let ctx = ctx.clone();
        state.request_load(path, move || ctx.request_repaint());
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export yearly summary")
        .add_filter("JSON", &["json"])
        .set_file_name("yearly_summary.json")
        .save_file()
    else {
        return;
    };

    match export::write_summary_json(&path, &state.summary) {
        Ok(()) => {
            log::info!("Exported {} years to {}", state.summary.len(), path.display());
            state.status_message = Some(format!("Summary exported to {}", path.display()));
        }
        Err(e) => {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

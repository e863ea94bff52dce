use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::sort::{SortKey, SortOrder, SummarySort};
use crate::state::AppState;
use crate::ui::format::format_usd;

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 24.0;

// ---------------------------------------------------------------------------
// Yearly summary table (left panel)
// ---------------------------------------------------------------------------

/// Sortable per-year table.  Clicking a year selects it.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    let mut sort_clicked = None;
    let mut year_clicked = None;
    let selected = state.selected_year;
    let sort = state.sort;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(120.0))
        .header(HEADER_HEIGHT, |mut header| {
            for (key, title) in [
                (SortKey::Year, "Year"),
                (SortKey::TotalJobs, "Number of Total Jobs"),
                (SortKey::AverageSalary, "Average Salary (USD)"),
            ] {
                header.col(|ui: &mut Ui| {
                    let label = RichText::new(header_label(title, key, sort)).strong();
                    if ui.add(egui::Button::new(label).frame(false)).clicked() {
                        sort_clicked = Some(key);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.summary.len(), |mut row| {
                let s = &state.summary[row.index()];
                row.col(|ui: &mut Ui| {
                    if ui
                        .selectable_label(selected == Some(s.year), s.year.to_string())
                        .clicked()
                    {
                        year_clicked = Some(s.year);
                    }
                });
                row.col(|ui: &mut Ui| {
                    ui.label(s.total_jobs.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd(s.average_salary));
                });
            });
        });

    if let Some(key) = sort_clicked {
        state.set_sort(key);
    }
    if let Some(year) = year_clicked {
        state.toggle_year(year);
    }
}

fn header_label(title: &str, key: SortKey, sort: SummarySort) -> String {
    if sort.key != key {
        return title.to_string();
    }
    match sort.order {
        SortOrder::Ascending => format!("{title} ⏶"),
        SortOrder::Descending => format!("{title} ⏷"),
    }
}

// ---------------------------------------------------------------------------
// Job-title breakdown (bottom panel)
// ---------------------------------------------------------------------------

/// Job titles for the selected year, or an explicit empty state.
pub fn breakdown_table(ui: &mut Ui, state: &AppState) {
    let Some(year) = state.selected_year else {
        ui.weak("Select a year in the table or chart to see its job titles.");
        return;
    };

    ui.heading(format!("Job titles in {year}"));
    ui.separator();

    if state.breakdown.is_empty() {
        ui.label(format!("No jobs recorded in {year}."));
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(90.0))
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Job Title");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Number of Jobs");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.breakdown.len(), |mut row| {
                let b = &state.breakdown[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(b.job_title.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(b.total_jobs.to_string());
                });
            });
        });
}

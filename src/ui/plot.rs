use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::model::YearlySummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Jobs-per-year chart (central panel)
// ---------------------------------------------------------------------------

/// Line chart of total jobs per year.  Clicking near a point selects it.
pub fn jobs_per_year_plot(ui: &mut Ui, state: &mut AppState) {
    let mut points: Vec<[f64; 2]> = state
        .summary
        .iter()
        .map(|s| [f64::from(s.year), s.total_jobs as f64])
        .collect();
    // The table may be sorted by any column; the line must run by year.
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));

    let highlighted = state
        .selected_year
        .and_then(|y| state.summary.iter().find(|s| s.year == y))
        .map(|s| [f64::from(s.year), s.total_jobs as f64]);

    let response = Plot::new("jobs_per_year")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Total jobs")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            let line: PlotPoints = points.iter().copied().collect();
            plot_ui.line(Line::new(line).name("Total jobs").width(2.0));

            let markers: PlotPoints = points.iter().copied().collect();
            plot_ui.points(Points::new(markers).radius(4.0).name("Total jobs"));

            if let Some(point) = highlighted {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![point]))
                        .radius(7.0)
                        .color(Color32::ORANGE)
                        .name("Selected year"),
                );
            }

            if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate()
            } else {
                None
            }
        });

    if let Some(pointer) = response.inner {
        if let Some(year) = nearest_year(&state.summary, pointer.x) {
            state.toggle_year(year);
        }
    }
}

/// Year whose x position lies within half a year of `x`.
fn nearest_year(summary: &[YearlySummary], x: f64) -> Option<i32> {
    summary
        .iter()
        .map(|s| (s.year, (f64::from(s.year) - x).abs()))
        .filter(|(_, dist)| *dist <= 0.5)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(year, _)| year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(year: i32) -> YearlySummary {
        YearlySummary {
            year,
            total_jobs: 1,
            average_salary: 1.0,
        }
    }

    #[test]
    fn picks_closest_year_within_half_a_year() {
        let rows = [summary(2020), summary(2021), summary(2023)];
        assert_eq!(nearest_year(&rows, 2020.9), Some(2021));
        assert_eq!(nearest_year(&rows, 2019.6), Some(2020));
        assert_eq!(nearest_year(&rows, 2022.0), None);
        assert_eq!(nearest_year(&[], 2022.0), None);
    }
}

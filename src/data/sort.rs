use std::cmp::Ordering;

use super::model::YearlySummary;

// ---------------------------------------------------------------------------
// Sort selection for the yearly table
// ---------------------------------------------------------------------------

/// Column a yearly summary can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Year,
    TotalJobs,
    AverageSalary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Current ordering of the yearly table.  Defaults to ascending by year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SummarySort {
    fn default() -> Self {
        Self {
            key: SortKey::Year,
            order: SortOrder::Ascending,
        }
    }
}

impl SummarySort {
    /// Clicking the active column flips the order; another column starts
    /// ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                order: self.order.reversed(),
            }
        } else {
            Self {
                key,
                order: SortOrder::Ascending,
            }
        }
    }
}

/// Sort summaries in place.  Ties fall back to ascending year.
pub fn sort_summaries(summaries: &mut [YearlySummary], sort: SummarySort) {
    summaries.sort_by(|a, b| {
        let primary = match sort.key {
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::TotalJobs => a.total_jobs.cmp(&b.total_jobs),
            SortKey::AverageSalary => a.average_salary.total_cmp(&b.average_salary),
        };
        let primary = match sort.order {
            SortOrder::Ascending => primary,
            SortOrder::Descending => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.year.cmp(&b.year),
            other => other,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(year: i32, total_jobs: usize, average_salary: f64) -> YearlySummary {
        YearlySummary {
            year,
            total_jobs,
            average_salary,
        }
    }

    fn years(summaries: &[YearlySummary]) -> Vec<i32> {
        summaries.iter().map(|s| s.year).collect()
    }

    #[test]
    fn toggle_flips_active_key_and_resets_new_key() {
        let sort = SummarySort::default();
        let flipped = sort.toggle(SortKey::Year);
        assert_eq!(flipped.order, SortOrder::Descending);

        let other = flipped.toggle(SortKey::AverageSalary);
        assert_eq!(
            other,
            SummarySort {
                key: SortKey::AverageSalary,
                order: SortOrder::Ascending
            }
        );
    }

    #[test]
    fn sorts_by_each_key() {
        let mut rows = vec![
            summary(2022, 5, 90_000.0),
            summary(2020, 9, 120_000.0),
            summary(2021, 1, 60_000.0),
        ];

        sort_summaries(&mut rows, SummarySort::default());
        assert_eq!(years(&rows), [2020, 2021, 2022]);

        sort_summaries(
            &mut rows,
            SummarySort {
                key: SortKey::TotalJobs,
                order: SortOrder::Descending,
            },
        );
        assert_eq!(years(&rows), [2020, 2022, 2021]);

        sort_summaries(&mut rows, SummarySort::default().toggle(SortKey::AverageSalary));
        assert_eq!(years(&rows), [2021, 2022, 2020]);
    }

    #[test]
    fn ties_fall_back_to_year() {
        let mut rows = vec![summary(2023, 3, 1.0), summary(2021, 3, 2.0)];
        sort_summaries(
            &mut rows,
            SummarySort {
                key: SortKey::TotalJobs,
                order: SortOrder::Descending,
            },
        );
        assert_eq!(years(&rows), [2021, 2023]);
    }
}

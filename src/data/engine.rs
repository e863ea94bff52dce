use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{JobTitleBreakdown, SalaryRecord, YearlySummary};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("aggregation engine queried before a dataset was loaded")]
    NotInitialized,
}

// ---------------------------------------------------------------------------
// Mean accumulator
// ---------------------------------------------------------------------------

/// Count + compensated (Neumaier) sum of `f64` values.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    count: usize,
    sum: f64,
    compensation: f64,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
        self.count += 1;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }

    fn mean(&self) -> f64 {
        self.total() / self.count as f64
    }
}

// ---------------------------------------------------------------------------
// AggregationEngine
// ---------------------------------------------------------------------------

/// Holds one immutable record set and answers the grouped queries over it.
///
/// Queries borrow `&self` only, so a stable engine may be shared across
/// threads; swapping the record set requires `&mut self`.
#[derive(Debug, Default)]
pub struct AggregationEngine {
    records: Option<Vec<SalaryRecord>>,
}

impl AggregationEngine {
    /// Replace the whole record set.
    pub fn initialize(&mut self, records: Vec<SalaryRecord>) {
        log::debug!("Aggregation engine initialised with {} records", records.len());
        self.records = Some(records);
    }

    pub fn is_initialized(&self) -> bool {
        self.records.is_some()
    }

    /// Records held, or `NotInitialized`.
    pub fn records(&self) -> Result<&[SalaryRecord], EngineError> {
        self.records.as_deref().ok_or(EngineError::NotInitialized)
    }

    /// Number of records held (0 when uninitialised).
    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    /// Job count and mean `salary_in_usd` for every year present.
    ///
    /// The result happens to be ascending by year, but callers needing a
    /// particular order should sort it themselves.
    pub fn yearly_summary(&self) -> Result<Vec<YearlySummary>, EngineError> {
        let mut by_year: BTreeMap<i32, MeanAccumulator> = BTreeMap::new();
        for rec in self.records()? {
            by_year.entry(rec.work_year).or_default().push(rec.salary_in_usd);
        }

        Ok(by_year
            .into_iter()
            .map(|(year, acc)| YearlySummary {
                year,
                total_jobs: acc.count,
                average_salary: acc.mean(),
            })
            .collect())
    }

    /// Job-title frequencies among records of `year`, most frequent first
    /// (ties by title).  An empty result means no jobs in that year.
    pub fn job_title_breakdown(&self, year: i32) -> Result<Vec<JobTitleBreakdown>, EngineError> {
        let mut by_title: BTreeMap<&str, usize> = BTreeMap::new();
        for rec in self.records()?.iter().filter(|r| r.work_year == year) {
            *by_title.entry(rec.job_title.as_str()).or_default() += 1;
        }

        let mut breakdown: Vec<JobTitleBreakdown> = by_title
            .into_iter()
            .map(|(title, total_jobs)| JobTitleBreakdown {
                job_title: title.to_string(),
                total_jobs,
            })
            .collect();
        // Stable sort keeps the map's title order among equal counts.
        breakdown.sort_by(|a, b| b.total_jobs.cmp(&a.total_jobs));
        Ok(breakdown)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use proptest::prelude::*;

    use super::*;

    fn record(year: i32, title: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            work_year: year,
            experience_level: "SE".into(),
            employment_type: "FT".into(),
            job_title: title.into(),
            salary: usd,
            salary_currency: "USD".into(),
            salary_in_usd: usd,
            employee_residence: "US".into(),
            remote_ratio: 100,
            company_location: "US".into(),
            company_size: "M".into(),
        }
    }

    fn engine_with(records: Vec<SalaryRecord>) -> AggregationEngine {
        let mut engine = AggregationEngine::default();
        engine.initialize(records);
        engine
    }

    #[test]
    fn mean_per_year() {
        let engine = engine_with(vec![
            record(2021, "ML Engineer", 100000.0),
            record(2021, "ML Engineer", 200000.0),
            record(2022, "ML Engineer", 300000.0),
        ]);

        let summary = engine.yearly_summary().unwrap();
        assert_eq!(
            summary,
            vec![
                YearlySummary { year: 2021, total_jobs: 2, average_salary: 150000.0 },
                YearlySummary { year: 2022, total_jobs: 1, average_salary: 300000.0 },
            ]
        );
    }

    #[test]
    fn breakdown_counts_titles_within_year() {
        let engine = engine_with(vec![
            record(2021, "ML Engineer", 1.0),
            record(2021, "Data Scientist", 1.0),
            record(2021, "ML Engineer", 1.0),
            record(2022, "Data Scientist", 1.0),
        ]);

        let breakdown = engine.job_title_breakdown(2021).unwrap();
        assert_eq!(
            breakdown,
            vec![
                JobTitleBreakdown { job_title: "ML Engineer".into(), total_jobs: 2 },
                JobTitleBreakdown { job_title: "Data Scientist".into(), total_jobs: 1 },
            ]
        );
    }

    #[test]
    fn equal_counts_are_ordered_by_title() {
        let engine = engine_with(vec![
            record(2021, "Zeta", 1.0),
            record(2021, "Alpha", 1.0),
        ]);
        let titles: Vec<_> = engine
            .job_title_breakdown(2021)
            .unwrap()
            .into_iter()
            .map(|b| b.job_title)
            .collect();
        assert_eq!(titles, ["Alpha", "Zeta"]);
    }

    #[test]
    fn year_without_jobs_is_empty_not_error() {
        let engine = engine_with(vec![record(2021, "ML Engineer", 1.0)]);
        assert_eq!(engine.job_title_breakdown(1999).unwrap(), vec![]);
    }

    #[test]
    fn queries_before_initialize_fail() {
        let engine = AggregationEngine::default();
        assert!(!engine.is_initialized());
        assert_eq!(engine.yearly_summary(), Err(EngineError::NotInitialized));
        assert_eq!(engine.job_title_breakdown(2021), Err(EngineError::NotInitialized));
        assert!(engine.records().is_err());
    }

    #[test]
    fn empty_dataset_is_initialized() {
        let engine = engine_with(Vec::new());
        assert!(engine.is_initialized());
        assert_eq!(engine.len(), 0);
        assert!(engine.yearly_summary().unwrap().is_empty());
    }

    #[test]
    fn initialize_replaces_records() {
        let mut engine = engine_with(vec![record(2021, "A", 1.0)]);
        engine.initialize(vec![record(2023, "B", 5.0), record(2023, "B", 7.0)]);

        let summary = engine.yearly_summary().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].year, 2023);
        assert_eq!(summary[0].average_salary, 6.0);
    }

    #[test]
    fn compensated_sum_keeps_small_values() {
        let mut acc = MeanAccumulator::default();
        acc.push(1e16);
        for _ in 0..10 {
            acc.push(1.0);
        }
        acc.push(-1e16);
        assert_eq!(acc.total(), 10.0);
        assert_eq!(acc.count, 12);
    }

    fn arb_records() -> impl Strategy<Value = Vec<SalaryRecord>> {
        let title = prop::sample::select(vec!["ML Engineer", "Data Scientist", "Data Analyst"]);
        prop::collection::vec((2018i32..2025, title, 0u32..500_000), 0..200).prop_map(|rows| {
            rows.into_iter()
                .map(|(year, title, usd)| record(year, title, f64::from(usd)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn breakdown_sums_to_yearly_total(records in arb_records()) {
            let engine = engine_with(records);
            for summary in engine.yearly_summary().unwrap() {
                let sum: usize = engine
                    .job_title_breakdown(summary.year)
                    .unwrap()
                    .iter()
                    .map(|b| b.total_jobs)
                    .sum();
                prop_assert_eq!(sum, summary.total_jobs);
            }
        }

        #[test]
        fn every_year_appears_once(records in arb_records()) {
            let years: HashSet<i32> = records.iter().map(|r| r.work_year).collect();
            let engine = engine_with(records);
            let summary = engine.yearly_summary().unwrap();

            prop_assert_eq!(summary.len(), years.len());
            for s in &summary {
                prop_assert!(years.contains(&s.year));
                prop_assert!(s.total_jobs >= 1);
            }
        }

        #[test]
        fn summary_is_idempotent(records in arb_records()) {
            let engine = engine_with(records);
            let first: BTreeMap<i32, (usize, u64)> = engine
                .yearly_summary()
                .unwrap()
                .into_iter()
                .map(|s| (s.year, (s.total_jobs, s.average_salary.to_bits())))
                .collect();
            let second: BTreeMap<i32, (usize, u64)> = engine
                .yearly_summary()
                .unwrap()
                .into_iter()
                .map(|s| (s.year, (s.total_jobs, s.average_salary.to_bits())))
                .collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn integral_salaries_average_exactly(records in arb_records()) {
            let engine = engine_with(records.clone());
            for s in engine.yearly_summary().unwrap() {
                let total: u64 = records
                    .iter()
                    .filter(|r| r.work_year == s.year)
                    .map(|r| r.salary_in_usd as u64)
                    .sum();
                prop_assert_eq!(s.average_salary, total as f64 / s.total_jobs as f64);
            }
        }
    }
}

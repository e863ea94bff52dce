/// Data layer: record types, loading, aggregation and ordering.
///
/// Architecture:
/// ```text
///  salary_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Vec<SalaryRecord>, skipped count
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AggregationEngine │  yearly summary, per-year job titles
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  order the yearly snapshot for display / export
///   └──────────┘
/// ```

pub mod engine;
pub mod export;
pub mod loader;
pub mod model;
pub mod sort;

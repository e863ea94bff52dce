use serde::Serialize;

// ---------------------------------------------------------------------------
// SalaryRecord – one validated row of the source file
// ---------------------------------------------------------------------------

/// A single compensation record (one row of the source CSV).
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    /// Four-digit calendar year the salary was paid in.
    pub work_year: i32,
    pub experience_level: String,
    pub employment_type: String,
    /// Free-text job title, used as a grouping key.
    pub job_title: String,
    /// Gross salary in `salary_currency`.
    pub salary: f64,
    pub salary_currency: String,
    /// Salary converted to USD – the only salary the engine aggregates.
    pub salary_in_usd: f64,
    pub employee_residence: String,
    /// Share of remote work in percent (0, 50 or 100 in practice).
    pub remote_ratio: u8,
    pub company_location: String,
    pub company_size: String,
}

// ---------------------------------------------------------------------------
// Derived aggregates
// ---------------------------------------------------------------------------

/// Job count and mean USD salary for one `work_year`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: i32,
    /// Always at least 1: years without records never get a summary.
    pub total_jobs: usize,
    pub average_salary: f64,
}

/// How many jobs carry a given title within one selected year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleBreakdown {
    pub job_title: String,
    pub total_jobs: usize,
}

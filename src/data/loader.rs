use std::path::Path;
use std::str::FromStr;

use csv::{StringRecord, Trim};
use thiserror::Error;

use super::model::SalaryRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a whole load.  No partially initialised dataset is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source could not be read, or holds no data rows.
    #[error("dataset unavailable: {0}")]
    Unavailable(String),

    #[error("header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unreadable header row: {0}")]
    Header(#[source] csv::Error),
}

/// Why a single row was dropped.  Never aborts a load; only counted.
#[derive(Debug, Error, PartialEq)]
pub enum RowParseError {
    #[error("line {line}: column '{field}' is missing")]
    MissingField { line: u64, field: &'static str },

    #[error("line {line}: '{value}' is not a valid {field}")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {field} value {value} is out of range")]
    OutOfRange {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// The csv reader rejected the line.  Input is already `&str` and the
    /// reader is flexible, so this only guards against future reader changes.
    #[error("line {line}: undecodable row: {reason}")]
    Undecodable { line: u64, reason: String },
}

// ---------------------------------------------------------------------------
// Options and result
// ---------------------------------------------------------------------------

/// Reader settings for delimited input.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Valid records, in source order.
    pub records: Vec<SalaryRecord>,
    /// Rows excluded because a field failed validation.
    pub skipped_rows: usize,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse salary records from raw delimited text with default options.
pub fn load(raw_text: &str) -> Result<LoadReport, LoadError> {
    load_with(raw_text, &LoadOptions::default())
}

/// Read a file and parse it.  An unreadable file counts as unavailable.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<LoadReport, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        LoadError::Unavailable(format!("cannot read {}: {e}", path.display()))
    })?;
    load_with(&text, options)
}

/// CSV layout: a header row naming the eleven salary columns (any order),
/// followed by one row per job.  Extra columns are ignored.
///
/// Every physical line is one record: a quote left open never runs into the
/// following lines.  Lines with no content (blank, or only delimiters and
/// whitespace) are not rows.
pub fn load_with(raw_text: &str, options: &LoadOptions) -> Result<LoadReport, LoadError> {
    let mut rows = raw_text
        .lines()
        .enumerate()
        .map(|(i, text)| (i as u64 + 1, split_line(text, options)))
        .filter(|(_, row)| !matches!(row, Ok(fields) if is_blank(fields)));

    let Some((_, header)) = rows.next() else {
        return Err(LoadError::Unavailable("input is empty".into()));
    };
    let columns = ColumnIndex::from_headers(&header.map_err(LoadError::Header)?)?;

    let mut report = LoadReport::default();
    let mut data_rows = 0usize;

    for (line, row) in rows {
        data_rows += 1;
        let parsed = row
            .map_err(|e| RowParseError::Undecodable {
                line,
                reason: e.to_string(),
            })
            .and_then(|fields| columns.parse_row(&fields, line));

        match parsed {
            Ok(record) => report.records.push(record),
            Err(e) => {
                log::debug!("Skipping row: {e}");
                report.skipped_rows += 1;
            }
        }
    }

    if data_rows == 0 {
        return Err(LoadError::Unavailable("no data rows after header".into()));
    }

    if report.skipped_rows > 0 {
        log::warn!(
            "{} of {data_rows} rows skipped during load",
            report.skipped_rows
        );
    }
    log::info!("Parsed {} salary records", report.records.len());

    Ok(report)
}

/// Split one physical line into trimmed fields.
fn split_line(text: &str, options: &LoadOptions) -> Result<StringRecord, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let mut fields = StringRecord::new();
    reader.read_record(&mut fields)?;
    Ok(fields)
}

fn is_blank(fields: &StringRecord) -> bool {
    fields.iter().all(str::is_empty)
}

// ---------------------------------------------------------------------------
// Schema: header name → column position
// ---------------------------------------------------------------------------

const WORK_YEAR: &str = "work_year";
const EXPERIENCE_LEVEL: &str = "experience_level";
const EMPLOYMENT_TYPE: &str = "employment_type";
const JOB_TITLE: &str = "job_title";
const SALARY: &str = "salary";
const SALARY_CURRENCY: &str = "salary_currency";
const SALARY_IN_USD: &str = "salary_in_usd";
const EMPLOYEE_RESIDENCE: &str = "employee_residence";
const REMOTE_RATIO: &str = "remote_ratio";
const COMPANY_LOCATION: &str = "company_location";
const COMPANY_SIZE: &str = "company_size";

/// Positions of the required columns as declared by the header row.
#[derive(Debug)]
struct ColumnIndex {
    work_year: usize,
    experience_level: usize,
    employment_type: usize,
    job_title: usize,
    salary: usize,
    salary_currency: usize,
    salary_in_usd: usize,
    employee_residence: usize,
    remote_ratio: usize,
    company_location: usize,
    company_size: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            work_year: find(WORK_YEAR)?,
            experience_level: find(EXPERIENCE_LEVEL)?,
            employment_type: find(EMPLOYMENT_TYPE)?,
            job_title: find(JOB_TITLE)?,
            salary: find(SALARY)?,
            salary_currency: find(SALARY_CURRENCY)?,
            salary_in_usd: find(SALARY_IN_USD)?,
            employee_residence: find(EMPLOYEE_RESIDENCE)?,
            remote_ratio: find(REMOTE_RATIO)?,
            company_location: find(COMPANY_LOCATION)?,
            company_size: find(COMPANY_SIZE)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<SalaryRecord, RowParseError> {
        let cells = Cells { row, line };

        let work_year: i32 = cells.integer(self.work_year, WORK_YEAR)?;
        if !(1000..=9999).contains(&work_year) {
            return Err(cells.out_of_range(WORK_YEAR, work_year));
        }

        let remote_ratio: u8 = cells.integer(self.remote_ratio, REMOTE_RATIO)?;
        if remote_ratio > 100 {
            return Err(cells.out_of_range(REMOTE_RATIO, remote_ratio));
        }

        Ok(SalaryRecord {
            work_year,
            experience_level: cells.text(self.experience_level, EXPERIENCE_LEVEL)?,
            employment_type: cells.text(self.employment_type, EMPLOYMENT_TYPE)?,
            job_title: cells.text(self.job_title, JOB_TITLE)?,
            salary: cells.amount(self.salary, SALARY)?,
            salary_currency: cells.text(self.salary_currency, SALARY_CURRENCY)?,
            salary_in_usd: cells.amount(self.salary_in_usd, SALARY_IN_USD)?,
            employee_residence: cells.text(self.employee_residence, EMPLOYEE_RESIDENCE)?,
            remote_ratio,
            company_location: cells.text(self.company_location, COMPANY_LOCATION)?,
            company_size: cells.text(self.company_size, COMPANY_SIZE)?,
        })
    }
}

// -- Per-field conversion helpers --

struct Cells<'r> {
    row: &'r StringRecord,
    line: u64,
}

impl Cells<'_> {
    fn raw(&self, idx: usize, field: &'static str) -> Result<&str, RowParseError> {
        self.row.get(idx).ok_or(RowParseError::MissingField {
            line: self.line,
            field,
        })
    }

    fn text(&self, idx: usize, field: &'static str) -> Result<String, RowParseError> {
        self.raw(idx, field).map(str::to_string)
    }

    fn integer<T: FromStr>(&self, idx: usize, field: &'static str) -> Result<T, RowParseError> {
        let raw = self.raw(idx, field)?;
        raw.parse::<T>().map_err(|_| self.invalid(field, raw))
    }

    /// Non-negative, finite decimal amount.
    fn amount(&self, idx: usize, field: &'static str) -> Result<f64, RowParseError> {
        let raw = self.raw(idx, field)?;
        let value: f64 = raw.parse().map_err(|_| self.invalid(field, raw))?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(self.out_of_range(field, raw))
        }
    }

    fn invalid(&self, field: &'static str, raw: &str) -> RowParseError {
        RowParseError::InvalidNumber {
            line: self.line,
            field,
            value: raw.to_string(),
        }
    }

    fn out_of_range(&self, field: &'static str, value: impl ToString) -> RowParseError {
        RowParseError::OutOfRange {
            line: self.line,
            field,
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::YearlySummary;

/// Write the yearly summary as a pretty-printed JSON array:
///
/// ```json
/// [
///   { "year": 2021, "totalJobs": 2, "averageSalary": 150000.0 },
///   ...
/// ]
/// ```
pub fn write_summary_json(path: &Path, summaries: &[YearlySummary]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summaries).context("serialising summary")?;
    writer.flush().context("flushing summary file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn writes_camel_case_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let rows = vec![YearlySummary {
            year: 2021,
            total_jobs: 2,
            average_salary: 150000.0,
        }];

        write_summary_json(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!([{ "year": 2021, "totalJobs": 2, "averageSalary": 150000.0 }])
        );
    }

    #[test]
    fn unwritable_path_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");
        let err = write_summary_json(&path, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}

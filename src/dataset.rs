//! Dataset loading and publish-year derivation.
//!
//! This module turns the pre-cleaned metadata CSV into a typed, in-memory
//! collection of [`PaperRecord`]s. The collection is loaded once and never
//! mutated afterwards; every view elsewhere in the crate is a read-only
//! projection over it.

use crate::error::{ExplorerError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Columns the input file must provide
pub const REQUIRED_COLUMNS: &[&str] = &["title", "journal", "source_x", "publish_time"];

/// One row of the input table describing a single research paper's metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title
    pub title: Option<String>,
    /// Journal name
    pub journal: Option<String>,
    /// Provenance of the record (e.g. "PMC", "WHO")
    pub source_x: Option<String>,
    /// Raw publication date text (e.g. "2020-03-15")
    pub publish_time: Option<String>,
    /// Publication year, derived from `publish_time` when the input lacks it
    #[serde(default, deserialize_with = "lenient_year")]
    pub publish_year: Option<i32>,
}

/// Deserialize a year cell that may be empty, an integer, or a
/// float-formatted integer ("2020.0" from spreadsheet exports).
/// Anything unparseable coerces to `None` instead of failing the load.
fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_year_cell))
}

fn parse_year_cell(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    raw.parse::<f64>().ok().map(|year| year as i32)
}

/// Derive a publication year from raw `publish_time` text.
///
/// Accepts full ISO dates ("2020-03-15") and any value with a leading
/// four-digit year ("2020", "2020-03", "2020 Apr 17"). Returns `None` when
/// nothing parseable is found.
pub fn derive_year(publish_time: &str) -> Option<i32> {
    let raw = publish_time.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        return digits.parse().ok();
    }
    None
}

/// Fill in `publish_year` for every record that lacks one by parsing its
/// `publish_time`. Records that already carry a year are untouched, so
/// re-running this is a no-op.
///
/// Returns the number of records left without a year.
pub fn ensure_years(records: &mut [PaperRecord]) -> usize {
    let mut missing = 0;
    for record in records.iter_mut() {
        if record.publish_year.is_none() {
            record.publish_year = record.publish_time.as_deref().and_then(derive_year);
        }
        if record.publish_year.is_none() {
            missing += 1;
        }
    }
    missing
}

/// Immutable, ordered in-memory collection of paper records
pub struct Dataset {
    records: Vec<PaperRecord>,
    missing_year: usize,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the metadata CSV
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, the CSV is
    /// malformed, or a required column is absent. Malformed individual
    /// cells (unparseable years, empty text) never fail the load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                return Err(ExplorerError::MissingColumn((*column).to_string()));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PaperRecord = row?;
            records.push(record);
        }

        info!(path = %path.display(), rows = records.len(), "Loaded dataset");
        Ok(Self::from_records(records))
    }

    /// Build a dataset from already-parsed records, deriving missing years.
    pub fn from_records(mut records: Vec<PaperRecord>) -> Self {
        let missing_year = ensure_years(&mut records);
        if missing_year > 0 {
            warn!(
                count = missing_year,
                "Records without a parseable publish_time; excluded from year-based views"
            );
        }
        Self {
            records,
            missing_year,
        }
    }

    /// All records, in input order
    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    /// Number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose publication year could not be determined
    pub fn missing_year_count(&self) -> usize {
        self.missing_year
    }

    /// `(min, max)` over all non-null publication years.
    ///
    /// Returns `None` when no record has a year. Feeds the year-selector
    /// bounds on the rendering side.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.publish_year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(publish_time: Option<&str>, publish_year: Option<i32>) -> PaperRecord {
        PaperRecord {
            publish_time: publish_time.map(str::to_string),
            publish_year,
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_year() {
        assert_eq!(derive_year("2020-03-15"), Some(2020));
        assert_eq!(derive_year("2020-03"), Some(2020));
        assert_eq!(derive_year("2020"), Some(2020));
        assert_eq!(derive_year(" 2021 Apr 17 "), Some(2021));
        assert_eq!(derive_year("spring"), None);
        assert_eq!(derive_year(""), None);
    }

    #[test]
    fn test_ensure_years_fills_missing_only() {
        let mut records = vec![
            record(Some("2020-01-02"), None),
            record(Some("2020-01-02"), Some(1999)),
            record(Some("not a date"), None),
            record(None, None),
        ];

        let missing = ensure_years(&mut records);
        assert_eq!(missing, 2);
        assert_eq!(records[0].publish_year, Some(2020));
        // a year already present is never overwritten
        assert_eq!(records[1].publish_year, Some(1999));
        assert_eq!(records[2].publish_year, None);
        assert_eq!(records[3].publish_year, None);
    }

    #[test]
    fn test_ensure_years_idempotent() {
        let mut records = vec![
            record(Some("2020-01-02"), None),
            record(Some("garbled"), None),
        ];
        ensure_years(&mut records);
        let snapshot: Vec<Option<i32>> = records.iter().map(|r| r.publish_year).collect();

        let missing = ensure_years(&mut records);
        let again: Vec<Option<i32>> = records.iter().map(|r| r.publish_year).collect();
        assert_eq!(snapshot, again);
        assert_eq!(missing, 1);
    }

    #[test]
    fn test_load_derives_years() -> Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "title,journal,source_x,publish_time")?;
        writeln!(temp, "Covid study,Lancet,PMC,2020-03-15")?;
        writeln!(temp, "Vaccine trial,BMJ,WHO,2021")?;
        writeln!(temp, "Unknown date,Nature,PMC,n.d.")?;

        let dataset = Dataset::load(temp.path())?;
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].publish_year, Some(2020));
        assert_eq!(dataset.records()[1].publish_year, Some(2021));
        assert_eq!(dataset.records()[2].publish_year, None);
        assert_eq!(dataset.missing_year_count(), 1);
        assert_eq!(dataset.year_range(), Some((2020, 2021)));
        Ok(())
    }

    #[test]
    fn test_load_accepts_existing_year_column() -> Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "title,journal,source_x,publish_time,publish_year")?;
        writeln!(temp, "A,J1,PMC,2020-01-01,2019")?;
        writeln!(temp, "B,J2,WHO,2020-01-01,2020.0")?;
        writeln!(temp, "C,J3,PMC,2021-06-01,")?;

        let dataset = Dataset::load(temp.path())?;
        // present years win over publish_time
        assert_eq!(dataset.records()[0].publish_year, Some(2019));
        // float-formatted cells from spreadsheet exports still parse
        assert_eq!(dataset.records()[1].publish_year, Some(2020));
        // empty cells fall back to publish_time
        assert_eq!(dataset.records()[2].publish_year, Some(2021));
        Ok(())
    }

    #[test]
    fn test_load_rejects_missing_column() -> Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "title,journal,publish_time")?;
        writeln!(temp, "A,J1,2020-01-01")?;

        match Dataset::load(temp.path()) {
            Err(ExplorerError::MissingColumn(column)) => assert_eq!(column, "source_x"),
            other => panic!("expected MissingColumn, got {:?}", other.map(|d| d.len())),
        }
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load("/nonexistent/metadata.csv");
        assert!(matches!(result, Err(ExplorerError::Io(_))));
    }

    #[test]
    fn test_year_range_empty() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_range(), None);
    }
}

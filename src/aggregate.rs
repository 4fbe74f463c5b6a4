//! Grouping and counting views over the loaded records.
//!
//! Every function here is a pure projection: it takes the full record slice,
//! returns a freshly computed view, and touches nothing else. Views are
//! recomputed on each interaction rather than cached.

use crate::dataset::PaperRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Papers counted for one publication year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Papers counted for one label (journal, source, or title word)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Count records per publication year, ascending by year.
///
/// Records without a year are excluded, so the counts sum to the number of
/// records with a non-null `publish_year`.
pub fn count_by_year(records: &[PaperRecord]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.publish_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Count occurrences of each label, descending by count.
///
/// Ties keep the order in which a label was first seen; the sort is stable.
pub(crate) fn count_labels<'a, I>(labels: I) -> Vec<LabelCount>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for label in labels {
        let entry = counts.entry(label).or_insert(0);
        if *entry == 0 {
            first_seen.push(label);
        }
        *entry += 1;
    }

    let mut out: Vec<LabelCount> = first_seen
        .into_iter()
        .map(|label| LabelCount {
            label: label.to_string(),
            count: counts.get(label).copied().unwrap_or(0),
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Top `n` journals by paper count, descending.
///
/// Records without a journal are excluded; `n = 0` yields an empty view.
pub fn top_journals(records: &[PaperRecord], n: usize) -> Vec<LabelCount> {
    let mut journals = count_labels(
        records
            .iter()
            .filter_map(|r| r.journal.as_deref())
            .filter(|j| !j.trim().is_empty()),
    );
    journals.truncate(n);
    journals
}

/// Paper count per source, descending for display.
pub fn count_by_source(records: &[PaperRecord]) -> Vec<LabelCount> {
    count_labels(
        records
            .iter()
            .filter_map(|r| r.source_x.as_deref())
            .filter(|s| !s.trim().is_empty()),
    )
}

/// Records published in the given year, in dataset order.
///
/// An empty result is valid, not an error.
pub fn filter_by_year(records: &[PaperRecord], year: i32) -> Vec<&PaperRecord> {
    records
        .iter()
        .filter(|r| r.publish_year == Some(year))
        .collect()
}

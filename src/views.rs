//! Dashboard view assembly.
//!
//! One [`DashboardView`] carries everything a single dashboard refresh
//! renders: the sample table, the year selector state, the time series, the
//! journal and source charts, and the title word frequencies. It is rebuilt
//! from the loaded dataset on every interaction; nothing is cached between
//! requests.

use crate::aggregate::{self, LabelCount, YearCount};
use crate::dataset::{Dataset, PaperRecord};
use crate::error::Result;
use crate::{sample, titles};
use serde::Serialize;

/// Knobs for one dashboard refresh
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Rows in the random sample table
    pub sample_size: usize,
    /// Journals shown in the top-journals chart
    pub top_journals: usize,
    /// Words shown in the title word-frequency view
    pub top_words: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sample_size: 5,
            top_journals: 10,
            top_words: 25,
        }
    }
}

/// Everything one dashboard refresh renders
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_papers: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    /// Records excluded from year-based views for lack of a parseable date
    pub records_without_year: usize,
    pub selected_year: Option<i32>,
    pub papers_in_selected_year: usize,
    pub sample: Vec<PaperRecord>,
    pub papers_per_year: Vec<YearCount>,
    pub top_journals: Vec<LabelCount>,
    pub title_words: Vec<LabelCount>,
    pub papers_by_source: Vec<LabelCount>,
}

/// Build one dashboard refresh.
///
/// `selected_year` falls back to the newest year in the dataset, matching
/// the year selector's default position.
///
/// # Errors
///
/// Propagates [`crate::ExplorerError::InsufficientData`] when the dataset
/// holds fewer records than `opts.sample_size`; callers decide whether to
/// clamp or surface it.
pub fn build(
    dataset: &Dataset,
    selected_year: Option<i32>,
    opts: &ViewOptions,
) -> Result<DashboardView> {
    let records = dataset.records();
    let range = dataset.year_range();
    let selected = selected_year.or_else(|| range.map(|(_, max)| max));
    let papers_in_selected_year = selected
        .map(|year| aggregate::filter_by_year(records, year).len())
        .unwrap_or(0);

    let drawn = sample::sample(records, opts.sample_size)?;

    Ok(DashboardView {
        total_papers: records.len(),
        year_min: range.map(|(min, _)| min),
        year_max: range.map(|(_, max)| max),
        records_without_year: dataset.missing_year_count(),
        selected_year: selected,
        papers_in_selected_year,
        sample: drawn.into_iter().cloned().collect(),
        papers_per_year: aggregate::count_by_year(records),
        top_journals: aggregate::top_journals(records, opts.top_journals),
        title_words: titles::word_frequencies(records, opts.top_words)?,
        papers_by_source: aggregate::count_by_source(records),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;

    fn paper(title: &str, journal: &str, source: &str, time: &str) -> PaperRecord {
        PaperRecord {
            title: Some(title.to_string()),
            journal: Some(journal.to_string()),
            source_x: Some(source.to_string()),
            publish_time: Some(time.to_string()),
            publish_year: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            paper("Antibody dynamics", "Lancet", "PMC", "2020-05-01"),
            paper("Ventilation outcomes", "Lancet", "PMC", "2020-07-15"),
            paper("Vaccine trial design", "BMJ", "WHO", "2021-01-20"),
            paper("Transmission modelling", "Nature", "PMC", "bad date"),
        ])
    }

    #[test]
    fn test_build_defaults_to_newest_year() -> Result<()> {
        let ds = dataset();
        let opts = ViewOptions {
            sample_size: 2,
            ..Default::default()
        };

        let view = build(&ds, None, &opts)?;
        assert_eq!(view.total_papers, 4);
        assert_eq!(view.year_min, Some(2020));
        assert_eq!(view.year_max, Some(2021));
        assert_eq!(view.selected_year, Some(2021));
        assert_eq!(view.papers_in_selected_year, 1);
        assert_eq!(view.records_without_year, 1);
        assert_eq!(view.sample.len(), 2);
        assert_eq!(view.papers_per_year.len(), 2);
        assert_eq!(view.top_journals[0].label, "Lancet");
        assert_eq!(view.papers_by_source[0].label, "PMC");
        Ok(())
    }

    #[test]
    fn test_build_with_explicit_year() -> Result<()> {
        let ds = dataset();
        let opts = ViewOptions {
            sample_size: 1,
            ..Default::default()
        };

        let view = build(&ds, Some(2020), &opts)?;
        assert_eq!(view.selected_year, Some(2020));
        assert_eq!(view.papers_in_selected_year, 2);

        // a year with no matches is a valid, empty selection
        let view = build(&ds, Some(1995), &opts)?;
        assert_eq!(view.papers_in_selected_year, 0);
        Ok(())
    }

    #[test]
    fn test_build_sample_too_large() {
        let ds = dataset();
        let opts = ViewOptions {
            sample_size: 10,
            ..Default::default()
        };

        assert!(matches!(
            build(&ds, None, &opts),
            Err(ExplorerError::InsufficientData { requested: 10, .. })
        ));
    }
}

//! Title text preparation for word-frequency rendering.
//!
//! The rendering layer turns these counts into a word-cloud image; this
//! module only prepares the text and the frequencies.

use crate::aggregate::{count_labels, LabelCount};
use crate::dataset::PaperRecord;
use crate::error::{ExplorerError, Result};
use regex::Regex;
use std::collections::HashSet;

/// English stopwords excluded from title word counts
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from",
    "further", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "isn't", "it", "its", "itself", "just", "me", "more", "most", "my", "myself",
    "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought",
    "our", "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should",
    "shouldn't", "since", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "therefore", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "upon", "use", "using", "very", "was",
    "wasn't", "we", "were", "weren't", "what", "when", "where", "which", "while", "who",
    "whom", "why", "with", "within", "without", "won't", "would", "wouldn't", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Join all non-null titles with a single space.
///
/// Records without a title contribute nothing, not a placeholder.
pub fn concatenate_titles(records: &[PaperRecord]) -> String {
    records
        .iter()
        .filter_map(|r| r.title.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count title words, lowercased, with stopwords and bare numbers removed.
///
/// Returns at most `top` pairs, descending by count, ties in
/// first-encountered order.
pub fn word_frequencies(records: &[PaperRecord], top: usize) -> Result<Vec<LabelCount>> {
    // Tokens of two or more characters, keeping inner apostrophes/hyphens
    // ("covid-19" stays whole).
    let word_re = Regex::new(r"[a-z0-9][a-z0-9'\-]+")
        .map_err(|e| ExplorerError::Parse(e.to_string()))?;
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();

    let text = concatenate_titles(records).to_lowercase();
    let tokens: Vec<&str> = word_re
        .find_iter(&text)
        .map(|m| m.as_str())
        .filter(|token| !stopwords.contains(token))
        .filter(|token| token.chars().any(|c| c.is_ascii_alphabetic()))
        .collect();

    let mut frequencies = count_labels(tokens.into_iter());
    frequencies.truncate(top);
    Ok(frequencies)
}

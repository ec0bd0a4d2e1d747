//! Aggregate statistics over a record collection
//!
//! [`analyze`] is pure: it reads the records and builds a [`Report`]. An empty
//! collection is the "no data" case and yields `None`.

mod frequency;

pub use frequency::FrequencyMap;

use crate::record::Record;

/// Number of authors listed in [`Report::top_authors`]
pub const TOP_AUTHORS: usize = 5;

/// Number of tags listed in [`Report::top_tags`]
pub const TOP_TAGS: usize = 10;

/// Character-length statistics of quotation texts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStats {
    pub shortest: usize,
    pub longest: usize,

    /// Arithmetic mean rounded to one decimal place
    pub average: f64,
}

/// Analysis of a non-empty record collection
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_quotes: usize,

    /// Quotes per author
    pub authors: FrequencyMap,

    /// Author with the most quotes and that count
    pub most_quoted_author: (String, usize),

    /// Occurrences per tag across all records
    pub tags: FrequencyMap,

    /// Tag occurrences including repeats
    pub total_tags: usize,

    /// `None` when no record carries a tag
    pub most_common_tag: Option<(String, usize)>,

    pub lengths: LengthStats,

    pub top_authors: Vec<(String, usize)>,
    pub top_tags: Vec<(String, usize)>,
}

impl Report {
    pub fn unique_authors(&self) -> usize {
        self.authors.len()
    }

    pub fn unique_tags(&self) -> usize {
        self.tags.len()
    }
}

/// Computes the statistics of a record collection
///
/// # Arguments
///
/// * `records` - The collection to analyze
///
/// # Returns
///
/// * `Some(Report)` - Statistics of the collection
/// * `None` - The collection is empty
pub fn analyze(records: &[Record]) -> Option<Report> {
    let first = records.first()?;

    let authors: FrequencyMap = records.iter().map(Record::author).collect();
    let tags: FrequencyMap = records
        .iter()
        .flat_map(|record| record.tags().iter().map(String::as_str))
        .collect();

    let most_quoted_author = authors
        .most_common()
        .map(|(author, count)| (author.to_string(), count))
        .unwrap_or_else(|| (first.author().to_string(), 1));
    let most_common_tag = tags
        .most_common()
        .map(|(tag, count)| (tag.to_string(), count));

    Some(Report {
        total_quotes: records.len(),
        most_quoted_author,
        total_tags: tags.total(),
        most_common_tag,
        lengths: length_stats(records),
        top_authors: authors.top(TOP_AUTHORS),
        top_tags: tags.top(TOP_TAGS),
        authors,
        tags,
    })
}

fn length_stats(records: &[Record]) -> LengthStats {
    let lengths: Vec<usize> = records.iter().map(Record::text_len).collect();

    let shortest = lengths.iter().copied().min().unwrap_or(0);
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let mean = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    LengthStats {
        shortest,
        longest,
        average: (mean * 10.0).round() / 10.0,
    }
}

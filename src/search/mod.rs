//! Case-insensitive search over records
//!
//! A record matches when the lower-cased term is a substring of its text, its
//! author or any one of its tags. An empty term matches every record; callers
//! that want to forbid empty searches must check before calling.

use crate::record::Record;

/// Returns the records matching `term`, in collection order
///
/// # Example
///
/// ```
/// use quote_ripple::record::{timestamp, Record};
/// use quote_ripple::search;
///
/// let records = vec![
///     Record::new("Stay hungry", "Steve Jobs", vec!["work".into()], timestamp::now()).unwrap(),
/// ];
/// assert_eq!(search(&records, "HUNGRY").len(), 1);
/// assert!(search(&records, "nomatch").is_empty());
/// ```
pub fn search<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.text().to_lowercase().contains(needle)
        || record.author().to_lowercase().contains(needle)
        || record
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::timestamp;

    fn record(text: &str, author: &str, tags: &[&str]) -> Record {
        Record::new(
            text,
            author,
            tags.iter().map(|t| t.to_string()).collect(),
            timestamp::parse("2024-05-01 12:00:00").unwrap(),
        )
        .unwrap()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Imagination is more important than knowledge.", "Albert Einstein", &["imagination"]),
            record("It is our choices that show what we truly are.", "J.K. Rowling", &["abilities", "choices"]),
            record("A day without sunshine is like, you know, night.", "Steve Martin", &["humor", "obvious"]),
        ]
    }

    #[test]
    fn test_match_in_text() {
        let records = sample();
        let found = search(&records, "KNOWLEDGE");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author(), "Albert Einstein");
    }

    #[test]
    fn test_match_in_author() {
        let records = sample();
        let found = search(&records, "rowling");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author(), "J.K. Rowling");
    }

    #[test]
    fn test_match_in_tag() {
        let records = sample();
        let found = search(&records, "Humo");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author(), "Steve Martin");
    }

    #[test]
    fn test_multiple_matches_keep_order() {
        let records = sample();
        let found = search(&records, "is");
        let authors: Vec<&str> = found.iter().map(|r| r.author()).collect();
        assert_eq!(authors, vec!["Albert Einstein", "J.K. Rowling", "Steve Martin"]);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let records = sample();
        let found = search(&records, "");
        assert_eq!(found.len(), records.len());
        assert!(found.iter().zip(records.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_no_match() {
        let records = sample();
        assert!(search(&records, "XYZ-NOMATCH").is_empty());
    }

    #[test]
    fn test_search_empty_collection() {
        assert!(search(&[], "anything").is_empty());
    }
}

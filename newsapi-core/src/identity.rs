//! Deterministic identity for news records
//!
//! The identity of an article is the XXH64 hash (seed 0) of the UTF-8 bytes of
//! `title|source|author`. Other fields never participate, so the same story
//! re-fetched with an edited description keeps its id.

use twox_hash::XxHash64;

const SEED: u64 = 0;

/// Hash a string with XXH64, returned as the signed value stored and served
pub fn hash_str(value: &str) -> i64 {
    XxHash64::oneshot(SEED, value.as_bytes()) as i64
}

/// Identity of the article identified by (title, source, author)
pub fn news_id(title: &str, source: &str, author: &str) -> i64 {
    hash_str(&format!("{}|{}|{}", title, source, author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_str_matches_reference_vector() {
        assert_eq!(hash_str("abc") as u64, 0x44BC_2CF5_AD77_0999);
    }

    #[test]
    fn test_news_id_is_pipe_delimited() {
        assert_eq!(news_id("Rust 2024", "Wired", "Jane Doe"), hash_str("Rust 2024|Wired|Jane Doe"));
    }

    #[test]
    fn test_news_id_is_stable() {
        let first = news_id("Title", "Source", "Author");
        let second = news_id("Title", "Source", "Author");
        assert_eq!(first, second);
    }

    #[test]
    fn test_delimiter_separates_fields() {
        assert_ne!(news_id("ab", "cd", "efg"), news_id("abc", "d", "efg"));
    }

    #[test]
    fn test_no_collisions_over_generated_corpus() {
        let mut seen = HashSet::new();
        for i in 0..50_000 {
            let id = news_id(
                &format!("Headline number {}", i),
                &format!("Source {}", i % 37),
                &format!("Author {}", i % 101),
            );
            assert!(seen.insert(id), "collision at item {}", i);
        }

        // single character edits
        let base = news_id("Rust ships", "TechCrunch", "Alice");
        assert_ne!(base, news_id("Rust shipS", "TechCrunch", "Alice"));
        assert_ne!(base, news_id("Rust ships", "TechCrunct", "Alice"));
        assert_ne!(base, news_id("Rust ships", "TechCrunch", "Alicf"));
    }
}

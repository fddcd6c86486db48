//! Translation-memory corpus with first-seen-wins deduplication

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Canonical form used for deduplication and ordering
///
/// Trims surrounding whitespace, turns CRLF and lone CR into LF, and
/// lower-cases.
pub fn normalize_key(text: &str) -> String {
    text.trim()
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .to_lowercase()
}

/// Aligned source/target text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmPair {
    /// Source-language text
    pub source: String,
    /// Target-language text
    pub target: String,
}

impl TmPair {
    /// Create a pair
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Normalized key of the source text
    pub fn key(&self) -> String {
        normalize_key(&self.source)
    }
}

/// Deduplicated corpus keyed by normalized source text
///
/// The first pair inserted for a key is kept; later pairs with the same key
/// are ignored. Iteration is ascending by normalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmCorpus {
    pairs: BTreeMap<String, TmPair>,
}

impl TmCorpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair unless its key is empty or already present
    ///
    /// Returns whether the pair was added.
    pub fn insert(&mut self, pair: TmPair) -> bool {
        let key = pair.key();
        if key.is_empty() {
            return false;
        }
        match self.pairs.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(pair);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Whether a normalized key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs sorted by normalized key
    pub fn pairs(&self) -> impl Iterator<Item = &TmPair> {
        self.pairs.values()
    }

    /// Consume into pairs sorted by normalized key
    pub fn into_pairs(self) -> Vec<TmPair> {
        self.pairs.into_values().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Iron Sword \t"), "iron sword");
        assert_eq!(normalize_key("A\r\nB\rC\nD"), "a\nb\nc\nd");
        assert_eq!(normalize_key("   "), "");
        assert_eq!(normalize_key("ÉPÉE"), "épée");
    }

    #[test]
    fn test_first_seen_wins() {
        let mut corpus = TmCorpus::new();
        assert!(corpus.insert(TmPair::new("Iron Sword", "철검")));
        assert!(!corpus.insert(TmPair::new("iron sword ", "쇠 검")));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.pairs().next().unwrap().target, "철검");
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut corpus = TmCorpus::new();
        assert!(!corpus.insert(TmPair::new(" \r\n", "검")));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_sorted_by_normalized_key() {
        let mut corpus = TmCorpus::new();
        corpus.insert(TmPair::new("banana", "바나나"));
        corpus.insert(TmPair::new("Apple", "사과"));
        corpus.insert(TmPair::new("cherry", "체리"));

        let sources: Vec<String> = corpus.into_pairs().into_iter().map(|p| p.source).collect();
        assert_eq!(sources, vec!["Apple", "banana", "cherry"]);
    }
}

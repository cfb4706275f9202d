//! Score tables and the article and paragraph rankers built on them.

use std::collections::HashMap;
use std::hash::Hash;

pub mod article;
pub mod paragraph;

pub use article::{ArticleRanker, contains_all_nouns};
pub use paragraph::{ParagraphRanker, paragraph_score};

/// Scores keyed by entity, remembering the order entities were first inserted.
///
/// Ranking is a stable descending sort, so among equal scores the entity
/// inserted first comes first.
#[derive(Debug, Clone)]
pub struct RankingTable<K> {
    entries: Vec<(K, f64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for RankingTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> RankingTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score of `key`. A key inserted again keeps its original position.
    pub fn insert(&mut self, key: K, score: f64) {
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 = score;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, score));
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, highest score first.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&K, f64)> {
        let mut ranked: Vec<(&K, f64)> = self.entries.iter().map(|(k, s)| (k, *s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// The `n` best keys, or all of them when there are fewer.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<&K> {
        self.ranked().into_iter().take(n).map(|(k, _)| k).collect()
    }

    #[must_use]
    pub fn top(&self) -> Option<&K> {
        self.top_n(1).into_iter().next()
    }
}

impl<K: Clone + Eq + Hash> FromIterator<(K, f64)> for RankingTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, score) in iter {
            table.insert(key, score);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_scores_keep_insertion_order() {
        let table: RankingTable<&str> = [("A", 5.0), ("B", 5.0), ("C", 3.0)].into_iter().collect();
        assert_eq!(table.top(), Some(&"A"));
        assert_eq!(table.top_n(3), [&"A", &"B", &"C"]);
    }

    #[test]
    fn higher_score_wins_regardless_of_order() {
        let table: RankingTable<&str> = [("A", 1.0), ("B", 2.0), ("C", 2.0)].into_iter().collect();
        assert_eq!(table.top_n(2), [&"B", &"C"]);
    }

    #[test]
    fn reinsert_updates_score_in_place() {
        let mut table = RankingTable::new();
        table.insert("A", 1.0);
        table.insert("B", 4.0);
        table.insert("A", 4.0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"A"), Some(4.0));
        assert_eq!(table.top(), Some(&"A"));
    }

    #[test]
    fn top_n_larger_than_table() {
        let table: RankingTable<&str> = [("only", 0.0)].into_iter().collect();
        assert_eq!(table.top_n(3), [&"only"]);
        assert!(RankingTable::<&str>::new().top().is_none());
    }
}

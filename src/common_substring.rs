//! Longest common substrings of the indexed text and a query.

use std::collections::BTreeSet;

use crate::{AlphabetError, MatchStat, SuffixTree, Symbol};

/// The length of the longest common substrings and every distinct one of them,
/// in sorted order. `substrings` is empty when `length` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LongestCommon {
    pub length: usize,
    pub substrings: BTreeSet<Vec<Symbol>>,
}

impl LongestCommon {
    /// Aggregates matching statistics computed against `text`.
    #[must_use]
    pub fn from_stats(text: &[Symbol], stats: &[MatchStat]) -> Self {
        let length = stats.iter().map(|m| m.depth).max().unwrap_or(0);
        if length == 0 {
            return Self::default();
        }
        let substrings = stats
            .iter()
            .filter(|m| m.depth == length)
            .map(|m| text[m.occurrence()].to_vec())
            .collect();
        Self { length, substrings }
    }
}

impl SuffixTree {
    /// Finds the longest substrings shared by the text and `query`.
    #[must_use]
    pub fn longest_common_with(&self, query: &[Symbol]) -> LongestCommon {
        LongestCommon::from_stats(&self.text, &self.match_against(query))
    }
}

/// Indexes `text` with the default alphabet and finds its longest common
/// substrings with `query`.
pub fn longest_common_substrings(text: &[Symbol], query: &[Symbol]) -> Result<LongestCommon, AlphabetError> {
    let mut tree = SuffixTree::new();
    tree.insert(text)?;
    Ok(tree.longest_common_with(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<S: AsRef<[u8]>>(items: &[S]) -> BTreeSet<Vec<u8>> {
        items.iter().map(|s| s.as_ref().to_vec()).collect()
    }

    #[test]
    fn test_single_winner() {
        let result = longest_common_substrings(b"abcabxabcd", b"abcabca").unwrap();
        assert_eq!(result.length, 5);
        assert_eq!(result.substrings, set(&[b"abcab"]));
    }

    #[test]
    fn test_repeated_winner_is_deduplicated() {
        let result = longest_common_substrings(b"abab", b"abxab").unwrap();
        assert_eq!(result.length, 2);
        assert_eq!(result.substrings, set(&[b"ab"]));
    }

    #[test]
    fn test_ties_are_sorted() {
        let result = longest_common_substrings(b"xyzabc", b"abc-xyz").unwrap();
        assert_eq!(result.length, 3);
        assert_eq!(result.substrings.into_iter().collect::<Vec<_>>(), vec![b"abc".to_vec(), b"xyz".to_vec()]);
    }

    #[test]
    fn test_nothing_in_common() {
        let result = longest_common_substrings(b"abc", b"xyz").unwrap();
        assert_eq!(result, LongestCommon::default());
    }
}

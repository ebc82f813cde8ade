//! Matching statistics of a query against the indexed text.

use std::ops::Range;

use crate::tracing_helpers::debug_log;
use crate::{ReferencePoint, SuffixTree, Symbol, JOKER};

/// Matching statistic for one query position `i`.
///
/// `depth` is the length of the longest suffix of `query[..=i]` occurring in the
/// text, and `end` is the exclusive text index where one such occurrence ends
/// (`0` when `depth == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStat {
    pub depth: usize,
    pub end: usize,
}

impl MatchStat {
    /// Range of the text holding the matched suffix.
    #[must_use]
    pub const fn occurrence(&self) -> Range<usize> {
        self.end - self.depth..self.end
    }
}

impl SuffixTree {
    /// Computes the matching statistics of `query`, one entry per query symbol.
    ///
    /// On a mismatch the walk falls back along suffix links instead of restarting
    /// from the root, so the depth can drop by any amount but grows by at most one
    /// per symbol. Symbols outside the alphabet never match.
    #[must_use]
    pub fn match_against(&self, query: &[Symbol]) -> Vec<MatchStat> {
        let mut stats = Vec::with_capacity(query.len());
        let mut point = ReferencePoint::root();
        let mut depth = 0;
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables, unused_assignments))]
        let mut fallbacks = 0usize;

        for &ch in query {
            loop {
                if self.is_node(point) {
                    let edge = self.get_edge(point.edge);
                    if let Some(next_id) = self.transition(edge.to, ch) {
                        point = ReferencePoint::new(next_id, self.get_edge(next_id).start + 1);
                        depth += 1;
                        break;
                    }
                    if edge.from == JOKER {
                        // Nothing matches even at the root.
                        break;
                    }
                } else if point.offset < self.text.len() && self.text[point.offset] == ch {
                    point.offset += 1;
                    depth += 1;
                    break;
                }
                point = self.suffix_of(point);
                depth -= 1;
                fallbacks += 1;
            }
            let end = if depth == 0 { 0 } else { point.offset };
            stats.push(MatchStat { depth, end });
        }

        debug_log!(query_len = query.len(), fallbacks, "match_against");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depths(text: &[u8], query: &[u8]) -> Vec<usize> {
        let mut tree = SuffixTree::new();
        tree.insert(text).unwrap();
        tree.match_against(query).iter().map(|m| m.depth).collect()
    }

    #[test]
    fn test_depths() {
        assert_eq!(depths(b"abcabxabcd", b"abcabca"), vec![1, 2, 3, 4, 5, 3, 4]);
        assert_eq!(depths(b"aaaaa", b"aaa"), vec![1, 2, 3]);
        assert_eq!(depths(b"abc", b"xyz"), vec![0, 0, 0]);
        assert_eq!(depths(b"abab", b"ab"), vec![1, 2]);
        assert_eq!(depths(b"", b"ab"), vec![0, 0]);
        assert_eq!(depths(b"abc", b""), Vec::<usize>::new());
    }

    #[test]
    fn test_query_past_end_of_text() {
        // "abc" followed by "d": the walk runs off the leaf end and falls back.
        assert_eq!(depths(b"abc", b"abcd"), vec![1, 2, 3, 0]);
        assert_eq!(depths(b"abcab", b"abcabc"), vec![1, 2, 3, 4, 5, 3]);
    }

    #[test]
    fn test_occurrence_points_into_text() {
        let text = b"xxabcabyy";
        let mut tree = SuffixTree::new();
        tree.insert(text).unwrap();
        let query = b"zzcaby";
        for (i, stat) in tree.match_against(query).iter().enumerate() {
            let expected = &query[i + 1 - stat.depth..=i];
            assert_eq!(&text[stat.occurrence()], expected);
        }
    }

    #[test]
    fn test_out_of_alphabet_query_symbols_reset_depth() {
        let mut tree = SuffixTree::with_alphabet(crate::Alphabet::ASCII);
        tree.insert(b"abab").unwrap();
        let stats = tree.match_against(&[b'a', b'b', 200, b'a']);
        let depths: Vec<usize> = stats.iter().map(|m| m.depth).collect();
        assert_eq!(depths, vec![1, 2, 0, 1]);
        assert_eq!(stats[2], MatchStat::default());
    }
}

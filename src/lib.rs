//! An online suffix tree over a bounded byte alphabet.
//!
//! Symbols are appended one at a time; after every append the tree represents
//! all suffixes of the text seen so far. The tree answers matching statistics
//! queries: for each prefix of a query, the longest suffix of that prefix which
//! occurs somewhere in the indexed text.
//!
//! # Examples
//!
//! ```
//! use online_suffix_tree::SuffixTree;
//! let mut tree = SuffixTree::new();
//! tree.insert(b"abcabxabcd").unwrap();
//! let depths: Vec<usize> = tree.match_against(b"abcabca").iter().map(|m| m.depth).collect();
//! assert_eq!(depths, vec![1, 2, 3, 4, 5, 3, 4]);
//! ```
mod alphabet;
mod common_substring;
mod matching;
mod tracing_helpers;

use std::collections::HashMap;

pub use alphabet::{Alphabet, AlphabetError, Symbol};
pub use common_substring::{longest_common_substrings, LongestCommon};
pub use matching::MatchStat;

use tracing_helpers::{debug_log, trace_log};

type NodeID = usize;
type EdgeID = usize;
type IndexType = usize;

// Special nodes.
const ROOT: NodeID = 0;
const JOKER: NodeID = 1;
const INVALID: NodeID = NodeID::MAX;

// Special edges.
const ROOT_EDGE: EdgeID = 0;
const JOKER_EDGE: EdgeID = 1;

/// End of every leaf edge: the label grows with the text.
const OPEN_END: IndexType = IndexType::MAX;

/// A labelled edge `[start, end)` into the text buffer.
/// `first` is the symbol the edge is keyed by in `from`'s transitions.
#[derive(Debug, Clone, Copy)]
struct Edge {
    from: NodeID,
    to: NodeID,
    start: IndexType,
    end: IndexType,
    first: Symbol,
}

impl Edge {
    const fn new(from: NodeID, to: NodeID, start: IndexType, end: IndexType, first: Symbol) -> Self {
        Self { from, to, start, end, first }
    }

    /// Label length; effectively unbounded for leaf edges.
    const fn len(&self) -> IndexType {
        self.end - self.start
    }

    const fn is_leaf(&self) -> bool {
        self.end == OPEN_END
    }
}

/// `transitions` maps the first symbol of every outgoing edge to that edge.
/// `parent_edge` is the edge leading into this node.
#[derive(Debug)]
struct Node {
    transitions: HashMap<Symbol, EdgeID>,

    suffix_link: NodeID,

    parent_edge: EdgeID,
}

impl Node {
    fn new(parent_edge: EdgeID) -> Self {
        Self {
            transitions: HashMap::new(),
            suffix_link: INVALID,
            parent_edge,
        }
    }

    fn get_suffix_link(&self) -> NodeID {
        assert!(self.suffix_link != INVALID, "Invalid suffix link");
        self.suffix_link
    }
}

/// A position in the tree: `offset` is an index into the text along `edge`.
/// `offset == end` of the edge means the position is the node `edge.to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReferencePoint {
    edge: EdgeID,
    offset: IndexType,
}

impl ReferencePoint {
    const fn new(edge: EdgeID, offset: IndexType) -> Self {
        Self { edge, offset }
    }

    const fn root() -> Self {
        Self::new(ROOT_EDGE, 1)
    }
}

/// A suffix tree built online, one symbol at a time.
///
/// Nodes and edges live in two arenas and refer to each other by index.
/// Dropping the tree releases everything at once.
#[derive(Debug)]
pub struct SuffixTree {
    node_storage: Vec<Node>,
    edge_storage: Vec<Edge>,
    text: Vec<Symbol>,
    alphabet: Alphabet,

    /// Deepest suffix of the text not yet made explicit.
    active: ReferencePoint,
}

impl Default for SuffixTree {
    fn default() -> Self {
        Self::with_alphabet(Alphabet::default())
    }
}

impl SuffixTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        // The root edge is [0, 1) so that it consumes exactly one symbol whenever a
        // suffix descent passes from the joker to the root. Nothing else ever reads
        // the label of either sentinel edge.
        let root_edge = Edge::new(JOKER, ROOT, 0, 1, 0);
        let joker_edge = Edge::new(JOKER, JOKER, 0, 1, 0);

        let mut root = Node::new(ROOT_EDGE);
        let joker = Node::new(JOKER_EDGE);
        root.suffix_link = JOKER;

        Self {
            node_storage: vec![root, joker],
            edge_storage: vec![root_edge, joker_edge],
            text: Vec::new(),
            alphabet,
            active: ReferencePoint::root(),
        }
    }

    #[must_use]
    pub const fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// The indexed text.
    #[must_use]
    pub fn text(&self) -> &[Symbol] {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of nodes in the tree, root and leaves included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_storage.len() - 1
    }

    /// Appends every symbol of `s`. Nothing is appended if any symbol is outside
    /// the alphabet.
    pub fn insert(&mut self, s: &[Symbol]) -> Result<(), AlphabetError> {
        self.alphabet.validate(s)?;
        for &ch in s {
            self.extend(ch);
        }
        debug_log!(
            appended = s.len(),
            text_len = self.text.len(),
            nodes = self.node_storage.len(),
            "insert"
        );
        Ok(())
    }

    /// Appends one symbol to the text and updates the tree.
    pub fn append_symbol(&mut self, ch: Symbol) -> Result<(), AlphabetError> {
        if !self.alphabet.contains(ch) {
            return Err(AlphabetError::SymbolOutOfRange {
                symbol: ch,
                position: 0,
                bound: self.alphabet.bound(),
            });
        }
        self.extend(ch);
        Ok(())
    }

    /// Checks whether `pattern` occurs in the text.
    #[must_use]
    pub fn contains(&self, pattern: &[Symbol]) -> bool {
        let mut node = ROOT;
        let mut index = 0;
        while index < pattern.len() {
            let Some(edge_id) = self.transition(node, pattern[index]) else {
                return false;
            };
            let edge = self.get_edge(edge_id);
            for &ch in &self.text[edge.start..self.label_end(edge)] {
                if index == pattern.len() {
                    return true;
                }
                if ch != pattern[index] {
                    return false;
                }
                index += 1;
            }
            node = edge.to;
        }
        true
    }

    pub fn pretty_print(&self) {
        self.print_recursive(ROOT, 0);
    }

    fn print_recursive(&self, node: NodeID, space_count: usize) {
        let mut edges: Vec<EdgeID> = self.get_node(node).transitions.values().copied().collect();
        edges.sort_by_key(|&e| self.get_edge(e).first);
        for edge_id in edges {
            let edge = self.get_edge(edge_id);
            let label = &self.text[edge.start..self.label_end(edge)];
            println!("{:indent$}{:?}", "", String::from_utf8_lossy(label), indent = space_count);
            self.print_recursive(edge.to, space_count + 4);
        }
    }

    /// One step of the online construction.
    fn extend(&mut self, ch: Symbol) {
        let mut point = self.active;
        loop {
            if !self.is_node(point) {
                if self.text[point.offset] == ch {
                    point.offset += 1;
                    break;
                }
                let node = self.split(point);
                let parent_edge = self.get_node(node).parent_edge;
                point = ReferencePoint::new(parent_edge, self.get_edge(parent_edge).end);
            }

            let node = self.get_edge(point.edge).to;
            if let Some(edge_id) = self.transition(node, ch) {
                point = ReferencePoint::new(edge_id, self.get_edge(edge_id).start + 1);
                break;
            }
            self.create_leaf(node, ch);
            if self.get_edge(point.edge).from == JOKER {
                break;
            }
            point = self.suffix_of(point);
        }
        self.text.push(ch);
        self.active = point;
    }

    /// Maps a position spelling `cα` to the position spelling `α`.
    /// Positions at the root are returned unchanged.
    fn suffix_of(&self, point: ReferencePoint) -> ReferencePoint {
        let edge = self.get_edge(point.edge);
        if edge.from == JOKER {
            return point;
        }
        let mut node = self.get_node(edge.from).get_suffix_link();
        let mut cursor = edge.start;
        // Skip down one edge per iteration, comparing only first symbols.
        loop {
            let remaining = point.offset - cursor;
            let Some(next_id) = self.transition(node, self.text[cursor]) else {
                panic!("suffix descent fell off the tree below node {node}");
            };
            let next = self.get_edge(next_id);
            assert!(next.len() != 0, "zero-length edge {next_id} on a suffix descent");
            if remaining <= next.len() {
                return ReferencePoint::new(next_id, next.start + remaining);
            }
            cursor += next.len();
            node = next.to;
        }
    }

    /// Makes `point` explicit and returns its node. Every node created on the way
    /// gets its suffix link, splitting further edges along the suffix chain until
    /// an existing node is reached.
    fn split(&mut self, point: ReferencePoint) -> NodeID {
        let mut point = point;
        let mut first: Option<NodeID> = None;
        let mut pending: Option<NodeID> = None;
        loop {
            let at_node = self.is_node(point);
            let node = if at_node {
                self.get_edge(point.edge).to
            } else {
                self.split_edge(point)
            };
            if let Some(prev) = pending {
                self.get_node_mut(prev).suffix_link = node;
            }
            let head = *first.get_or_insert(node);
            if at_node {
                return head;
            }
            pending = Some(node);
            point = self.suffix_of(point);
        }
    }

    /// Cuts the edge under `point` in two and returns the new middle node.
    /// The upper half keeps its id and its key in the parent's transitions.
    fn split_edge(&mut self, point: ReferencePoint) -> NodeID {
        let edge = *self.get_edge(point.edge);
        let ch = self.text[point.offset];

        let middle = self.create_node(point.edge);
        let lower = self.create_edge(Edge::new(middle, edge.to, point.offset, edge.end, ch));
        self.set_transition(middle, ch, lower);
        self.get_node_mut(edge.to).parent_edge = lower;

        let upper = self.get_edge_mut(point.edge);
        upper.end = point.offset;
        upper.to = middle;

        trace_log!(edge = point.edge, at = point.offset, node = middle, "split edge");
        middle
    }

    fn create_leaf(&mut self, node: NodeID, ch: Symbol) {
        let start = self.text.len();
        let leaf = self.node_storage.len();
        let edge_id = self.create_edge(Edge::new(node, leaf, start, OPEN_END, ch));
        self.create_node(edge_id);
        self.set_transition(node, ch, edge_id);
        trace_log!(from = node, start, symbol = ch, "leaf");
    }

    fn is_node(&self, point: ReferencePoint) -> bool {
        self.get_edge(point.edge).end == point.offset
    }

    fn label_end(&self, edge: &Edge) -> IndexType {
        if edge.is_leaf() {
            self.text.len()
        } else {
            edge.end
        }
    }

    fn transition(&self, node: NodeID, ch: Symbol) -> Option<EdgeID> {
        if node == JOKER {
            // The joker reaches the root on any symbol.
            return Some(ROOT_EDGE);
        }
        self.get_node(node).transitions.get(&ch).copied()
    }

    fn set_transition(&mut self, node: NodeID, ch: Symbol, edge: EdgeID) {
        self.get_node_mut(node).transitions.insert(ch, edge);
    }

    fn create_node(&mut self, parent_edge: EdgeID) -> NodeID {
        self.node_storage.push(Node::new(parent_edge));
        self.node_storage.len() - 1
    }

    fn create_edge(&mut self, edge: Edge) -> EdgeID {
        self.edge_storage.push(edge);
        self.edge_storage.len() - 1
    }

    fn get_node(&self, node_id: NodeID) -> &Node {
        &self.node_storage[node_id]
    }

    fn get_node_mut(&mut self, node_id: NodeID) -> &mut Node {
        &mut self.node_storage[node_id]
    }

    fn get_edge(&self, edge_id: EdgeID) -> &Edge {
        &self.edge_storage[edge_id]
    }

    fn get_edge_mut(&mut self, edge_id: EdgeID) -> &mut Edge {
        &mut self.edge_storage[edge_id]
    }
}

use std::collections::{HashMap, HashSet};

/// Position of a node in the trie's arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// Normalize a word or prefix: trim surrounding whitespace and lowercase.
pub fn normalize_word(s: &str) -> String {
    s.trim().to_lowercase()
}

/// One character position in the trie.
#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, NodeId>,

    /// Word-list indices of every word whose path passes through this node,
    /// in insertion order.
    indices: Vec<usize>,

    /// A word terminates exactly at this node.
    is_end: bool,
}

/// Character trie that stores word-list indices instead of strings.
/// Nodes are kept in a single arena and children are referenced by position.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Insert an already normalized word that lives at `idx` in the word list.
    pub fn insert(&mut self, word: &str, idx: usize) {
        let mut cur = ROOT;
        for ch in word.chars() {
            cur = match self.nodes[cur].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[cur].children.insert(ch, child);
                    child
                }
            };

            // Only guards against a repeated append within one insert.
            let node = &mut self.nodes[cur];
            if node.indices.last() != Some(&idx) {
                node.indices.push(idx);
            }
        }
        self.nodes[cur].is_end = true;
    }

    /// Word-list indices reachable from the end of `prefix`, de-duplicated
    /// in first-occurrence order. The prefix must already be normalized.
    pub fn lookup(&self, prefix: &str) -> Vec<usize> {
        let node = match self.find(prefix) {
            Some(n) => &self.nodes[n],
            None => return Vec::new(),
        };

        let mut seen = HashSet::with_capacity(node.indices.len());
        node.indices
            .iter()
            .copied()
            .filter(|i| seen.insert(*i))
            .collect()
    }

    /// Check whether a word terminates exactly at the end of its path.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|n| self.nodes[n].is_end)
    }

    /// Number of allocated nodes, including the root.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn find(&self, prefix: &str) -> Option<NodeId> {
        let mut cur = ROOT;
        for ch in prefix.chars() {
            cur = *self.nodes[cur].children.get(&ch)?;
        }
        Some(cur)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

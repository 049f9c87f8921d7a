use std::collections::HashMap;
use std::ops::Add;
use tracing::{debug, trace};

/// Lines kept and dropped while cleaning one or more files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub kept: usize,
    pub dropped: usize,
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            kept: self.kept + other.kept,
            dropped: self.dropped + other.dropped,
        }
    }
}

/// Represents a node in a trie.
pub struct TrieNode {
    pub children: HashMap<String, TrieNode>,
    pub counts: Option<LineCounts>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode {
            children: HashMap::new(),
            counts: None,
        }
    }

    /// Sums the line counts of the subtree.
    pub fn calculate_total(&self) -> LineCounts {
        trace!("Calculating totals for TrieNode");
        self.children
            .values()
            .map(|child| child.calculate_total())
            .fold(self.counts.unwrap_or_default(), |acc, counts| acc + counts)
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Fragment labels arranged by path component.
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        debug!("Creating new Trie");
        Trie {
            root: TrieNode::new(),
        }
    }

    /// Inserts a `/`-separated label with its line counts.
    pub fn insert(&mut self, label: &str, counts: LineCounts) {
        trace!("Inserting label: {} with {:?}", label, counts);
        let mut current_node = &mut self.root;
        for component in label.split('/').filter(|c| !c.is_empty()) {
            current_node = current_node
                .children
                .entry(component.to_string())
                .or_insert_with(TrieNode::new);
        }
        if current_node.counts.is_some() {
            trace!("Overwriting existing counts for label: {}", label);
        }
        current_node.counts = Some(counts);
    }

    pub fn get_root(&self) -> &TrieNode {
        &self.root
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

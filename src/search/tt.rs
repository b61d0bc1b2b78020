//! Transposition table keyed by the canonical position string

use std::collections::HashMap;

use crate::moves::Move;

/// Node type for transposition table entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

impl NodeType {
    /// Classify `score` against the window the node was searched with
    pub fn classify(score: f64, alpha: f64, beta: f64) -> Self {
        if score <= alpha {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTEntry {
    pub score: f64,
    pub depth: i32,
    pub node_type: NodeType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Score usable without searching, given the current window
    pub fn cutoff(&self, alpha: f64, beta: f64) -> Option<f64> {
        match self.node_type {
            NodeType::Exact => Some(self.score),
            NodeType::LowerBound if self.score >= beta => Some(self.score),
            NodeType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Unbounded map, entries are overwritten and never evicted.
#[derive(Debug, Default, Clone)]
pub struct TranspositionTable {
    entries: HashMap<String, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, key: &str) -> Option<&TTEntry> {
        self.entries.get(key)
    }

    pub fn store(&mut self, key: String, entry: TTEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

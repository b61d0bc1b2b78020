//! Search statistics and performance metrics
//!
//! Tracks nodes searched, transposition hits, cutoffs, leaf evaluations
//! and timing information.

use std::fmt;
use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched
    pub nodes: u64,

    /// Transposition table probes that returned without searching
    pub tt_hits: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Evaluator calls at depth 0
    pub leaf_evals: u64,

    /// Mate, stalemate and draw nodes
    pub terminal_nodes: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_tt_hit(&mut self) {
        self.tt_hits += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn inc_leaf_eval(&mut self) {
        self.leaf_evals += 1;
    }

    pub fn inc_terminal(&mut self) {
        self.terminal_nodes += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes searched: {}", self.nodes)?;
        writeln!(
            f,
            "TT hits: {} ({:.1}%)",
            self.tt_hits,
            if self.nodes > 0 {
                (self.tt_hits as f64 / self.nodes as f64) * 100.0
            } else {
                0.0
            }
        )?;
        writeln!(f, "Alpha-Beta cutoffs: {}", self.cutoffs)?;
        writeln!(f, "Leaf evaluations: {}", self.leaf_evals)?;
        writeln!(f, "Terminal nodes: {}", self.terminal_nodes)?;
        writeln!(f, "Search time: {} ms", self.search_time.as_millis())?;
        write!(f, "Nodes per second: {}", self.nps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_and_reset() {
        let mut stats = SearchStats::new();
        stats.inc_node();
        stats.inc_node();
        stats.inc_tt_hit();
        stats.inc_cutoff();
        stats.inc_leaf_eval();
        stats.inc_terminal();
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.tt_hits, 1);
        assert!(stats.to_string().contains("TT hits: 1 (50.0%)"));

        stats.reset();
        assert_eq!(stats.nodes, 0);
        assert!(stats.start_time.is_none());
    }
}

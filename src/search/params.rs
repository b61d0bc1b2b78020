//! Search parameters and configuration
//!
//! Controls the base depth, the game-phase extension and a hard depth cap.

use crate::board::Position;

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Base search depth in plies
    pub depth: i32,

    /// Extend the base depth as pieces leave the board
    pub phase_extension: bool,

    /// Hard cap on the effective depth
    pub max_depth: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 4,
            phase_extension: true,
            max_depth: 12,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base depth in plies
    pub fn depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Enable or disable the game-phase depth extension
    pub fn phase_extension(mut self, enable: bool) -> Self {
        self.phase_extension = enable;
        self
    }

    /// Set the hard depth cap
    pub fn max_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Effective depth for `pos`: the base depth, phase-extended if enabled,
    /// capped at `max_depth`.
    pub fn depth_for(&self, pos: &Position) -> i32 {
        let depth = if self.phase_extension {
            pos.depth_with_phase(self.depth)
        } else {
            self.depth
        };
        depth.min(self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let params = SearchParams::new()
            .depth(3)
            .phase_extension(false)
            .max_depth(5);
        assert_eq!(params.depth, 3);
        assert!(!params.phase_extension);
        assert_eq!(params.max_depth, 5);
    }

    #[test]
    fn depth_for_applies_phase_and_cap() {
        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let start = Position::new();

        let params = SearchParams::default();
        assert_eq!(params.depth_for(&start), 4);
        assert_eq!(params.depth_for(&bare), 7);

        assert_eq!(params.clone().phase_extension(false).depth_for(&bare), 4);
        assert_eq!(params.max_depth(6).depth_for(&bare), 6);
    }
}

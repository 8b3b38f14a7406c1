//! History and response tables for move ordering.

use std::collections::HashMap;

use taktic_core::Move;

/// Ceiling for history scores.
pub(crate) const HISTORY_MAX: i64 = 1 << 48;

/// History heuristic table, keyed by move fingerprint.
///
/// A move that becomes a node's new best is rewarded with the square of the
/// remaining depth, so discoveries near the root weigh more.
#[derive(Debug, Default)]
pub struct HistoryTable {
    scores: HashMap<u64, i64>,
}

impl HistoryTable {
    /// Create an empty history table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reward a move that improved a node's best value.
    pub fn reward(&mut self, mv: Move, depth: u32) {
        let depth = i64::from(depth);
        let entry = self.scores.entry(mv.fingerprint()).or_insert(0);
        *entry = entry.saturating_add(depth * depth).min(HISTORY_MAX);
    }

    /// History score of a move; unseen moves score zero.
    pub fn score(&self, mv: Move) -> i64 {
        self.scores.get(&mv.fingerprint()).copied().unwrap_or(0)
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Number of moves with a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Best reply seen to each move, keyed by the move's fingerprint.
#[derive(Debug, Default)]
pub struct ResponseTable {
    replies: HashMap<u64, Move>,
}

impl ResponseTable {
    /// Create an empty response table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `reply` as the best known answer to `prev`.
    pub fn record(&mut self, prev: Move, reply: Move) {
        self.replies.insert(prev.fingerprint(), reply);
    }

    /// Best known answer to `prev`.
    pub fn get(&self, prev: Move) -> Option<Move> {
        self.replies.get(&prev.fingerprint()).copied()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.replies.clear();
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taktic_core::{PieceKind, Square};

    fn flat(x: usize, y: usize) -> Move {
        Move::place(Square::new(x, y), PieceKind::Flat)
    }

    #[test]
    fn history_rewards_depth_squared() {
        let mut history = HistoryTable::new();
        let mv = flat(1, 2);
        assert_eq!(history.score(mv), 0);

        history.reward(mv, 3);
        assert_eq!(history.score(mv), 9);
        history.reward(mv, 2);
        assert_eq!(history.score(mv), 13);
        assert_eq!(history.score(flat(2, 1)), 0);
    }

    #[test]
    fn history_distinguishes_piece_kinds() {
        let mut history = HistoryTable::new();
        history.reward(flat(0, 0), 4);
        let wall = Move::place(Square::new(0, 0), PieceKind::Standing);
        assert_eq!(history.score(wall), 0);
    }

    #[test]
    fn history_saturates() {
        let mut history = HistoryTable::new();
        let mv = flat(0, 0);
        history.scores.insert(mv.fingerprint(), HISTORY_MAX - 1);
        history.reward(mv, 64);
        assert_eq!(history.score(mv), HISTORY_MAX);
    }

    #[test]
    fn response_overwrites() {
        let mut responses = ResponseTable::new();
        let prev = flat(0, 0);
        assert_eq!(responses.get(prev), None);

        responses.record(prev, flat(1, 1));
        responses.record(prev, flat(2, 2));
        assert_eq!(responses.get(prev), Some(flat(2, 2)));
        assert_eq!(responses.len(), 1);

        responses.clear();
        assert!(responses.is_empty());
    }
}

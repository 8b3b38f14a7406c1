//! Per-ply scratch buffers reused across nodes and iterations.

use taktic_core::{Move, Position, PositionError};

/// Scratch space owned by one ply of the search.
#[derive(Debug, Clone)]
pub struct StackEntry {
    /// Generated moves at this ply.
    pub(crate) moves: Vec<Move>,
    /// History-sort keys: (negated score, natural index, move).
    pub(crate) keyed: Vec<(i64, u32, Move)>,
    /// Destination for the child position being searched.
    pub(crate) child: Position,
}

impl StackEntry {
    fn new(size: usize) -> Result<Self, PositionError> {
        Ok(Self {
            moves: Vec::with_capacity(256),
            keyed: Vec::with_capacity(256),
            child: Position::new(size)?,
        })
    }
}

/// One [`StackEntry`] per ply, allocated once per engine.
#[derive(Debug)]
pub struct SearchStack {
    entries: Vec<StackEntry>,
}

impl SearchStack {
    /// Buffers for searches up to `max_depth` plies on a `size` board.
    pub fn new(size: usize, max_depth: u32) -> Result<Self, PositionError> {
        let entry = StackEntry::new(size)?;
        Ok(Self {
            entries: vec![entry; max_depth as usize + 1],
        })
    }

    /// Number of plies the stack can serve.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, root first.
    pub(crate) fn entries_mut(&mut self) -> &mut [StackEntry] {
        &mut self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_per_ply_plus_leaf() {
        let stack = SearchStack::new(5, 4).unwrap();
        assert_eq!(stack.len(), 5);
        assert!(stack.entries.iter().all(|e| e.child.size() == 5));
    }

    #[test]
    fn rejects_bad_size() {
        assert!(SearchStack::new(11, 3).is_err());
    }
}

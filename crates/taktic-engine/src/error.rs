//! Engine errors.

use taktic_core::PositionError;

/// Errors returned by search entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The position has no legal move: the game is over.
    #[error("no legal moves in this position")]
    NoLegalMoves,
}

/// Errors from building an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// The search buffers could not be allocated for the configured board.
    #[error("cannot allocate search buffers: {source}")]
    Position {
        /// The underlying setup error.
        #[from]
        source: PositionError,
    },
}

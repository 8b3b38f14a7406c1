//! Error types for position setup and move application.

/// Errors from constructing a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The board edge is outside the supported range.
    #[error("unsupported board size {size}, expected 3 to 8")]
    UnsupportedSize {
        /// The requested edge length.
        size: usize,
    },
    /// The number of stacks does not match the board area.
    #[error("expected {expected} squares, found {found}")]
    WrongSquareCount {
        /// `size * size`.
        expected: usize,
        /// Number of stacks supplied.
        found: usize,
    },
    /// A side has more stones on the board than its reserves allow.
    #[error("{color} has more {what} on the board than the reserves allow")]
    TooManyPieces {
        /// Which side is over its reserves.
        color: &'static str,
        /// "flats" or "capstones".
        what: &'static str,
    },
    /// A standing stone or capstone sits below the top of a stack.
    #[error("only flats may be buried, found {found} below the top")]
    BuriedNonFlat {
        /// Offending square in notation form.
        found: String,
    },
}

/// Reasons a move cannot be applied to a position.
///
/// These are expected during search: candidates from heuristic tables may
/// not fit the current position and are filtered silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game has already ended.
    #[error("game is over")]
    GameOver,
    /// The move touches a square outside the board.
    #[error("square is off the board")]
    OutOfBounds,
    /// A placement targets an occupied square.
    #[error("square is occupied")]
    Occupied,
    /// The mover has no stone of the requested kind left.
    #[error("no {kind} left in reserve")]
    NoReserves {
        /// "flats" or "capstones".
        kind: &'static str,
    },
    /// The opening plies only allow placing an opponent's flat.
    #[error("the first move must place a flat")]
    FirstMoveMustBeFlat,
    /// Slides are not allowed before both sides have placed.
    #[error("cannot slide on an opening ply")]
    NoSlideOnOpeningPly,
    /// The source stack is empty or controlled by the opponent.
    #[error("stack is not controlled by the mover")]
    NotYourStack,
    /// The slide carries more stones than allowed or than the stack holds.
    #[error("illegal carry of {carry} stones")]
    BadCarry {
        /// Stones the slide tried to lift.
        carry: usize,
    },
    /// A standing stone or capstone blocks the slide.
    #[error("slide is blocked")]
    Blocked,
}

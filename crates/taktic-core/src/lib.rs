//! Core Tak types: stacks, moves, positions, move generation, and game rules.

mod bitboard;
mod color;
mod error;
mod make_move;
mod movegen;
mod piece;
mod piece_kind;
mod position;
mod square;
mod tak_move;
mod zobrist;

pub use bitboard::Bitboard;
pub use color::Color;
pub use error::{MoveError, PositionError};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{MIN_SIZE, Outcome, Position, Reserves, WinKind};
pub use square::{Direction, MAX_SIZE, Square};
pub use tak_move::{Drops, Move, MoveKind};

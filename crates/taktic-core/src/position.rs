//! The Tak position: stacks, reserves, side to move, and game result.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::error::PositionError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::{MAX_SIZE, Square};
use crate::zobrist;

/// Smallest supported board edge.
pub const MIN_SIZE: usize = 3;

/// Stones a player still holds off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reserves {
    /// Flats, also used for standing stones.
    pub flats: u8,
    /// Capstones.
    pub capstones: u8,
}

impl Reserves {
    /// Starting reserves for a board of edge `size`.
    pub const fn for_size(size: usize) -> Reserves {
        let (flats, capstones) = match size {
            3 => (10, 0),
            4 => (15, 0),
            5 => (21, 1),
            6 => (30, 1),
            7 => (40, 2),
            _ => (50, 2),
        };
        Reserves { flats, capstones }
    }

    /// Whether every stone has been played.
    #[inline]
    pub const fn is_exhausted(self) -> bool {
        self.flats == 0 && self.capstones == 0
    }
}

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinKind {
    /// A connected line of flats/capstones between opposite edges.
    Road,
    /// More flats on top when the board filled or a reserve ran out.
    Flats,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// One side won.
    Win(Color, WinKind),
    /// Equal flat count at the end.
    Draw,
}

impl Outcome {
    /// The winning color, `None` for a draw.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Win(color, _) => Some(color),
            Outcome::Draw => None,
        }
    }
}

/// Complete Tak position state.
///
/// Stacks are stored row-major, each one top-first: `stack(x, y)[0]` is the
/// stone that controls the square.
#[derive(PartialEq, Eq)]
pub struct Position {
    size: usize,
    /// Plies played so far; White moves on even numbers.
    move_number: u32,
    squares: Vec<Vec<Piece>>,
    /// Indexed by [`Color::index()`].
    reserves: [Reserves; Color::COUNT],
    /// Cached at construction and after every move.
    outcome: Option<Outcome>,
    hash: u64,
}

impl Position {
    /// An empty board of edge `size`, White to move.
    pub fn new(size: usize) -> Result<Position, PositionError> {
        check_size(size)?;
        let reserves = Reserves::for_size(size);
        let mut pos = Position {
            size,
            move_number: 0,
            squares: vec![Vec::new(); size * size],
            reserves: [reserves; Color::COUNT],
            outcome: None,
            hash: 0,
        };
        pos.hash = zobrist::hash_from_scratch(&pos);
        Ok(pos)
    }

    /// Set up a position from explicit stacks.
    ///
    /// `stacks` is row-major from `a1` (`y * size + x`), each stack listed
    /// top-first. Reserves are whatever the stones on the board leave over.
    pub fn from_stacks(
        size: usize,
        move_number: u32,
        stacks: Vec<Vec<Piece>>,
    ) -> Result<Position, PositionError> {
        check_size(size)?;
        if stacks.len() != size * size {
            return Err(PositionError::WrongSquareCount {
                expected: size * size,
                found: stacks.len(),
            });
        }

        let start = Reserves::for_size(size);
        let mut used_flats = [0usize; Color::COUNT];
        let mut used_caps = [0usize; Color::COUNT];
        for (idx, stack) in stacks.iter().enumerate() {
            for (depth, piece) in stack.iter().enumerate() {
                if depth > 0 && piece.kind() != PieceKind::Flat {
                    return Err(PositionError::BuriedNonFlat {
                        found: Square::from_index(idx, size).to_string(),
                    });
                }
                match piece.kind() {
                    PieceKind::Capstone => used_caps[piece.color().index()] += 1,
                    _ => used_flats[piece.color().index()] += 1,
                }
            }
        }

        let mut reserves = [start; Color::COUNT];
        for color in Color::ALL {
            let i = color.index();
            let name = if color == Color::White { "white" } else { "black" };
            reserves[i].flats = (start.flats as usize)
                .checked_sub(used_flats[i])
                .ok_or(PositionError::TooManyPieces { color: name, what: "flats" })?
                as u8;
            reserves[i].capstones = (start.capstones as usize)
                .checked_sub(used_caps[i])
                .ok_or(PositionError::TooManyPieces { color: name, what: "capstones" })?
                as u8;
        }

        let mut pos = Position {
            size,
            move_number,
            squares: stacks,
            reserves,
            outcome: None,
            hash: 0,
        };
        pos.refresh();
        Ok(pos)
    }

    /// Board edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Plies played so far.
    #[inline]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        Color::for_ply(self.move_number)
    }

    /// The stack on `(x, y)`, top-first. Empty for an empty square.
    #[inline]
    pub fn stack(&self, x: usize, y: usize) -> &[Piece] {
        &self.squares[y * self.size + x]
    }

    /// The stone controlling `(x, y)`, if any.
    #[inline]
    pub fn top(&self, x: usize, y: usize) -> Option<Piece> {
        self.stack(x, y).first().copied()
    }

    /// The stack on `sq`, top-first.
    #[inline]
    pub fn stack_at(&self, sq: Square) -> &[Piece] {
        &self.squares[sq.index(self.size)]
    }

    /// Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Stones `color` still holds.
    #[inline]
    pub fn reserves(&self, color: Color) -> Reserves {
        self.reserves[color.index()]
    }

    /// The result, once the game has ended.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// The winner of a finished game. `None` while running or drawn.
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.outcome.and_then(Outcome::winner)
    }

    /// Whether the opening plies are still in progress, where each side
    /// places one of the opponent's flats.
    #[inline]
    pub fn is_opening(&self) -> bool {
        self.move_number < 2
    }

    /// Squares whose top stone is a road stone of `color`.
    pub fn road_stones(&self, color: Color) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for (idx, stack) in self.squares.iter().enumerate() {
            if let Some(top) = stack.first()
                && top.color() == color
                && top.kind().is_road()
            {
                bb = bb.with(Square::from_index(idx, self.size), self.size);
            }
        }
        bb
    }

    /// Number of squares topped by a flat of each color, indexed by [`Color::index()`].
    pub fn flat_counts(&self) -> [usize; Color::COUNT] {
        let mut counts = [0; Color::COUNT];
        for top in self.squares.iter().filter_map(|s| s.first()) {
            if top.kind() == PieceKind::Flat {
                counts[top.color().index()] += 1;
            }
        }
        counts
    }

    pub(crate) fn square_mut(&mut self, sq: Square) -> &mut Vec<Piece> {
        let idx = sq.index(self.size);
        &mut self.squares[idx]
    }

    pub(crate) fn reserves_mut(&mut self, color: Color) -> &mut Reserves {
        &mut self.reserves[color.index()]
    }

    /// Advance the ply counter and recompute derived state.
    pub(crate) fn finish_move(&mut self) {
        self.move_number += 1;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.outcome = self.compute_outcome();
        self.hash = zobrist::hash_from_scratch(self);
    }

    /// Roads take precedence over flat counts; when a move completes roads
    /// for both sides, the player who made it wins.
    fn compute_outcome(&self) -> Option<Outcome> {
        let white_road = self.road_stones(Color::White).has_road(self.size);
        let black_road = self.road_stones(Color::Black).has_road(self.size);
        match (white_road, black_road) {
            (true, true) => {
                let mover = !self.side_to_move();
                return Some(Outcome::Win(mover, WinKind::Road));
            }
            (true, false) => return Some(Outcome::Win(Color::White, WinKind::Road)),
            (false, true) => return Some(Outcome::Win(Color::Black, WinKind::Road)),
            (false, false) => {}
        }

        let full = self.squares.iter().all(|s| !s.is_empty());
        let exhausted = self.reserves.iter().any(|r| r.is_exhausted());
        if !full && !exhausted {
            return None;
        }

        let [white, black] = self.flat_counts();
        Some(match white.cmp(&black) {
            std::cmp::Ordering::Greater => Outcome::Win(Color::White, WinKind::Flats),
            std::cmp::Ordering::Less => Outcome::Win(Color::Black, WinKind::Flats),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

fn check_size(size: usize) -> Result<(), PositionError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(PositionError::UnsupportedSize { size })
    }
}

impl Clone for Position {
    fn clone(&self) -> Self {
        Position {
            size: self.size,
            move_number: self.move_number,
            squares: self.squares.clone(),
            reserves: self.reserves,
            outcome: self.outcome,
            hash: self.hash,
        }
    }

    /// Reuses the stack allocations of `self`; search buffers rely on this.
    fn clone_from(&mut self, source: &Self) {
        self.size = source.size;
        self.move_number = source.move_number;
        self.squares.clone_from(&source.squares);
        self.reserves = source.reserves;
        self.outcome = source.outcome;
        self.hash = source.hash;
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Position(size={}, move={}, to_move={})",
            self.size,
            self.move_number,
            self.side_to_move()
        )?;
        for y in (0..self.size).rev() {
            write!(f, "  {} ", y + 1)?;
            for x in 0..self.size {
                let stack = self.stack(x, y);
                if stack.is_empty() {
                    write!(f, " .")?;
                } else {
                    write!(f, " ")?;
                    for piece in stack.iter().rev() {
                        write!(f, "{piece:?}")?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flats(row_major: &[Option<Color>]) -> Vec<Vec<Piece>> {
        row_major
            .iter()
            .map(|c| match c {
                Some(color) => vec![Piece::new(PieceKind::Flat, *color)],
                None => Vec::new(),
            })
            .collect()
    }

    #[test]
    fn new_board_is_empty() {
        let pos = Position::new(5).unwrap();
        assert_eq!(pos.size(), 5);
        assert_eq!(pos.move_number(), 0);
        assert_eq!(pos.side_to_move(), Color::White);
        assert!(!pos.is_terminal());
        for y in 0..5 {
            for x in 0..5 {
                assert!(pos.stack(x, y).is_empty());
            }
        }
        assert_eq!(pos.reserves(Color::White), Reserves { flats: 21, capstones: 1 });
    }

    #[test]
    fn unsupported_sizes_rejected() {
        assert_eq!(Position::new(2).unwrap_err(), PositionError::UnsupportedSize { size: 2 });
        assert_eq!(Position::new(9).unwrap_err(), PositionError::UnsupportedSize { size: 9 });
    }

    #[test]
    fn from_stacks_counts_reserves() {
        use Color::{Black as B, White as W};
        let pos = Position::from_stacks(
            3,
            2,
            flats(&[Some(W), None, None, None, Some(B), None, None, None, Some(W)]),
        )
        .unwrap();
        assert_eq!(pos.reserves(W).flats, 8);
        assert_eq!(pos.reserves(B).flats, 9);
        assert_eq!(pos.top(1, 1), Some(Piece::BLACK_FLAT));
        assert!(!pos.is_terminal());
    }

    #[test]
    fn from_stacks_rejects_bad_layouts() {
        assert!(matches!(
            Position::from_stacks(3, 0, vec![Vec::new(); 8]),
            Err(PositionError::WrongSquareCount { expected: 9, found: 8 })
        ));

        let mut stacks = vec![Vec::new(); 9];
        stacks[0] = vec![Piece::WHITE_FLAT, Piece::BLACK_STANDING];
        assert!(matches!(
            Position::from_stacks(3, 4, stacks),
            Err(PositionError::BuriedNonFlat { .. })
        ));

        let mut stacks = vec![Vec::new(); 9];
        stacks[0] = vec![Piece::WHITE_CAPSTONE];
        assert!(matches!(
            Position::from_stacks(3, 4, stacks),
            Err(PositionError::TooManyPieces { what: "capstones", .. })
        ));
    }

    #[test]
    fn road_is_a_win() {
        use Color::{Black as B, White as W};
        let pos = Position::from_stacks(
            3,
            5,
            flats(&[Some(W), Some(W), Some(W), Some(B), Some(B), None, None, None, None]),
        )
        .unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Win(W, WinKind::Road)));
        assert_eq!(pos.winner(), Some(W));
    }

    #[test]
    fn standing_stones_break_roads() {
        let mut stacks = vec![Vec::new(); 9];
        stacks[0] = vec![Piece::WHITE_FLAT];
        stacks[1] = vec![Piece::WHITE_STANDING];
        stacks[2] = vec![Piece::WHITE_FLAT];
        let pos = Position::from_stacks(3, 4, stacks).unwrap();
        assert!(!pos.is_terminal());
    }

    #[test]
    fn double_road_goes_to_mover() {
        use Color::{Black as B, White as W};
        // Rows 0 and 2 are roads for each side; black just played ply 7.
        let layout = [Some(W), Some(W), Some(W), None, None, None, Some(B), Some(B), Some(B)];
        let pos = Position::from_stacks(3, 8, flats(&layout)).unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Win(B, WinKind::Road)));
    }

    #[test]
    fn full_board_counts_flats() {
        // 4x4 checkerboard: no roads, 8 flats each.
        let layout: Vec<Option<Color>> = (0..16)
            .map(|i| {
                let (x, y) = (i % 4, i / 4);
                Some(if (x + y) % 2 == 0 { Color::White } else { Color::Black })
            })
            .collect();
        let pos = Position::from_stacks(4, 16, flats(&layout)).unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
        assert_eq!(pos.winner(), None);

        let mut stacks = flats(&layout);
        stacks[1] = vec![Piece::WHITE_FLAT, Piece::BLACK_FLAT];
        let pos = Position::from_stacks(4, 16, stacks).unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Win(Color::White, WinKind::Flats)));
    }

    #[test]
    fn clone_from_matches_clone() {
        use Color::{Black as B, White as W};
        let pos = Position::from_stacks(
            3,
            3,
            flats(&[Some(W), None, Some(B), None, None, None, None, None, None]),
        )
        .unwrap();
        let mut buffer = Position::new(3).unwrap();
        buffer.clone_from(&pos);
        assert_eq!(buffer, pos);
        assert_eq!(buffer.hash(), pos.hash());
    }
}

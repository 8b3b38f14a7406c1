//! Tak move representation: placements and slides.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::{Direction, MAX_SIZE, Square};

/// Drop counts of a slide, one nibble per square travelled.
///
/// A slide over `n` squares carries `sum(drops)` stones and leaves
/// `drops[i]` of them on the `i`-th square. Every count is in `1..=8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Drops {
    packed: u32,
    len: u8,
}

impl Drops {
    /// Pack a slice of drop counts.
    ///
    /// Returns `None` when the slice is empty, longer than the largest
    /// board, or contains a count outside `1..=8`.
    pub fn new(counts: &[u8]) -> Option<Drops> {
        if counts.is_empty() || counts.len() > MAX_SIZE {
            return None;
        }
        let mut packed = 0u32;
        for (i, &c) in counts.iter().enumerate() {
            if c == 0 || c as usize > MAX_SIZE {
                return None;
            }
            packed |= (c as u32) << (4 * i);
        }
        Some(Drops {
            packed,
            len: counts.len() as u8,
        })
    }

    /// A single drop of `count` stones on the adjacent square.
    #[inline]
    pub fn single(count: u8) -> Option<Drops> {
        Drops::new(&[count])
    }

    /// Number of squares the slide travels.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Always false for a valid slide; present for API symmetry.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The `i`-th drop count.
    #[inline]
    pub const fn get(self, i: usize) -> u8 {
        ((self.packed >> (4 * i)) & 0x0F) as u8
    }

    /// Total number of stones carried off the source square.
    pub fn carry(self) -> usize {
        self.iter().map(usize::from).sum()
    }

    /// Iterate over the drop counts in travel order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..self.len()).map(move |i| self.get(i))
    }

    #[inline]
    const fn raw(self) -> u64 {
        self.packed as u64
    }
}

impl fmt::Debug for Drops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// What a move does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Place a stone from reserve on an empty square.
    Place(PieceKind),
    /// Pick up stones from the top of a stack and spread them in a line.
    Slide {
        /// Direction of travel.
        dir: Direction,
        /// Stones left on each square travelled.
        drops: Drops,
    },
}

/// A Tak move. Immutable once produced.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    square: Square,
    kind: MoveKind,
}

impl Move {
    /// Place a stone of `kind` on `square`.
    #[inline]
    pub const fn place(square: Square, kind: PieceKind) -> Move {
        Move {
            square,
            kind: MoveKind::Place(kind),
        }
    }

    /// Slide stones off `square` in `dir`, dropping them per `drops`.
    #[inline]
    pub const fn slide(square: Square, dir: Direction, drops: Drops) -> Move {
        Move {
            square,
            kind: MoveKind::Slide { dir, drops },
        }
    }

    /// The placement square or the slide's source square.
    #[inline]
    pub const fn square(self) -> Square {
        self.square
    }

    /// Placement or slide details.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Whether this move places a stone.
    #[inline]
    pub const fn is_placement(self) -> bool {
        matches!(self.kind, MoveKind::Place(_))
    }

    /// Stable key identifying this move, suitable for heuristic tables.
    ///
    /// ```text
    /// bits  0-2:  x
    /// bits  3-5:  y
    /// bits  6-7:  tag (placed kind 0-2, or 3 for a slide)
    /// bits  8-9:  slide direction
    /// bits 10-13: number of drops
    /// bits 16-47: packed drop nibbles
    /// ```
    ///
    /// Two moves have the same fingerprint exactly when they are equal.
    #[inline]
    pub fn fingerprint(self) -> u64 {
        let sq = self.square.x() as u64 | (self.square.y() as u64) << 3;
        match self.kind {
            MoveKind::Place(kind) => sq | (kind.index() as u64) << 6,
            MoveKind::Slide { dir, drops } => {
                sq | 3 << 6 | (dir.index() as u64) << 8 | (drops.len() as u64) << 10 | drops.raw() << 16
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Place(kind) => write!(f, "{}{}", kind.prefix(), self.square),
            MoveKind::Slide { dir, drops } => {
                let carry = drops.carry();
                if carry > 1 {
                    write!(f, "{carry}")?;
                }
                write!(f, "{}{}", self.square, dir.symbol())?;
                if drops.len() > 1 {
                    for d in drops.iter() {
                        write!(f, "{d}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_pack_and_unpack() {
        let drops = Drops::new(&[3, 1, 2]).unwrap();
        assert_eq!(drops.len(), 3);
        assert_eq!(drops.iter().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(drops.carry(), 6);
    }

    #[test]
    fn drops_reject_bad_counts() {
        assert!(Drops::new(&[]).is_none());
        assert!(Drops::new(&[1, 0]).is_none());
        assert!(Drops::new(&[9]).is_none());
        assert!(Drops::new(&[1; 9]).is_none());
    }

    #[test]
    fn display_placements() {
        assert_eq!(Move::place(Square::new(0, 0), PieceKind::Flat).to_string(), "a1");
        assert_eq!(Move::place(Square::new(2, 1), PieceKind::Standing).to_string(), "Sc2");
        assert_eq!(Move::place(Square::new(4, 4), PieceKind::Capstone).to_string(), "Ce5");
    }

    #[test]
    fn display_slides() {
        let one = Move::slide(Square::new(1, 1), Direction::Up, Drops::single(1).unwrap());
        assert_eq!(one.to_string(), "b2+");
        let spread = Move::slide(Square::new(2, 2), Direction::Right, Drops::new(&[1, 2]).unwrap());
        assert_eq!(spread.to_string(), "3c3>12");
        let stack = Move::slide(Square::new(3, 0), Direction::Left, Drops::single(2).unwrap());
        assert_eq!(stack.to_string(), "2d1<");
    }

    #[test]
    fn fingerprints_distinguish_moves() {
        let sq = Square::new(1, 2);
        let moves = [
            Move::place(sq, PieceKind::Flat),
            Move::place(sq, PieceKind::Standing),
            Move::place(sq, PieceKind::Capstone),
            Move::slide(sq, Direction::Up, Drops::single(1).unwrap()),
            Move::slide(sq, Direction::Down, Drops::single(1).unwrap()),
            Move::slide(sq, Direction::Up, Drops::single(2).unwrap()),
            Move::slide(sq, Direction::Up, Drops::new(&[1, 1]).unwrap()),
            Move::place(Square::new(2, 1), PieceKind::Flat),
        ];
        for (i, a) in moves.iter().enumerate() {
            for (j, b) in moves.iter().enumerate() {
                assert_eq!(
                    a.fingerprint() == b.fingerprint(),
                    i == j,
                    "fingerprint collision between {a} and {b}"
                );
            }
        }
    }
}

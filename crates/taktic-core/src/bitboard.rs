//! Bitboard representation for Tak — a 64-bit integer where each bit maps to a square.
//!
//! Boards up to 8x8 are supported. Square `(x, y)` on a board of edge `size`
//! lives at bit `y * size + x`, so bits at and above `size * size` are always
//! zero and every mask below is parametrised by the board edge.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::square::Square;

/// A set of squares on a board of at most 8x8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Create a bitboard from a raw `u64`.
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// Return the underlying `u64`.
    #[inline]
    pub const fn inner(self) -> u64 {
        self.0
    }

    /// Return `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count the number of set bits.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Return `true` if the given square's bit is set.
    #[inline]
    pub const fn contains(self, sq: Square, size: usize) -> bool {
        (self.0 & (1u64 << sq.index(size))) != 0
    }

    /// Return a new bitboard with the given square set.
    #[inline]
    pub const fn with(self, sq: Square, size: usize) -> Bitboard {
        Bitboard(self.0 | (1u64 << sq.index(size)))
    }

    /// Every square of a board of edge `size`.
    #[inline]
    pub const fn board(size: usize) -> Bitboard {
        let n = size * size;
        if n >= 64 {
            Bitboard(!0)
        } else {
            Bitboard((1u64 << n) - 1)
        }
    }

    /// Column `x` of a board of edge `size`.
    pub const fn column(x: usize, size: usize) -> Bitboard {
        let mut bits = 0u64;
        let mut y = 0;
        while y < size {
            bits |= 1u64 << (y * size + x);
            y += 1;
        }
        Bitboard(bits)
    }

    /// Row `y` of a board of edge `size`.
    pub const fn row(y: usize, size: usize) -> Bitboard {
        let row = (1u64 << size) - 1;
        Bitboard(row << (y * size))
    }

    /// The set plus every orthogonal neighbour of a member, clipped to the board.
    #[inline]
    pub fn grow(self, size: usize) -> Bitboard {
        let s = size as u32;
        let left = Bitboard::column(0, size);
        let right = Bitboard::column(size - 1, size);
        let up = self.0 << s;
        let down = self.0 >> s;
        let east = (self.0 & !right.0) << 1;
        let west = (self.0 & !left.0) >> 1;
        Bitboard((self.0 | up | down | east | west) & Bitboard::board(size).0)
    }

    /// Flood-fill `self` through `within` until it stops growing.
    #[inline]
    pub fn flood(self, within: Bitboard, size: usize) -> Bitboard {
        let mut current = self & within;
        loop {
            let next = current.grow(size) & within;
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Whether the squares in `self` connect opposite edges of the board.
    pub fn has_road(self, size: usize) -> bool {
        let west = Bitboard::column(0, size);
        let east = Bitboard::column(size - 1, size);
        if !(self.flood_from(west, size) & east).is_empty() {
            return true;
        }
        let south = Bitboard::row(0, size);
        let north = Bitboard::row(size - 1, size);
        !(self.flood_from(south, size) & north).is_empty()
    }

    #[inline]
    fn flood_from(self, edge: Bitboard, size: usize) -> Bitboard {
        (self & edge).flood(self, size)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;
    use crate::square::Square;

    fn from_squares(squares: &[(usize, usize)], size: usize) -> Bitboard {
        squares
            .iter()
            .fold(Bitboard::EMPTY, |bb, &(x, y)| bb.with(Square::new(x, y), size))
    }

    #[test]
    fn board_masks() {
        assert_eq!(Bitboard::board(3).count(), 9);
        assert_eq!(Bitboard::board(5).count(), 25);
        assert_eq!(Bitboard::board(8).count(), 64);
    }

    #[test]
    fn rows_and_columns() {
        for size in 3..=8 {
            for i in 0..size {
                assert_eq!(Bitboard::row(i, size).count(), size as u32);
                assert_eq!(Bitboard::column(i, size).count(), size as u32);
                assert!(Bitboard::row(i, size).contains(Square::new(0, i), size));
                assert!(Bitboard::column(i, size).contains(Square::new(i, size - 1), size));
            }
        }
    }

    #[test]
    fn grow_does_not_wrap_rows() {
        let size = 5;
        let east_edge = from_squares(&[(4, 2)], size);
        let grown = east_edge.grow(size);
        assert!(!grown.contains(Square::new(0, 3), size), "must not wrap onto the next row");
        assert_eq!(grown.count(), 4);

        let corner = from_squares(&[(0, 0)], size);
        assert_eq!(corner.grow(size).count(), 3);
    }

    #[test]
    fn straight_road_detected() {
        let size = 4;
        let row = from_squares(&[(0, 1), (1, 1), (2, 1), (3, 1)], size);
        assert!(row.has_road(size));
        let column = from_squares(&[(2, 0), (2, 1), (2, 2), (2, 3)], size);
        assert!(column.has_road(size));
    }

    #[test]
    fn winding_road_detected() {
        let size = 5;
        let path = from_squares(&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2), (3, 2), (3, 3), (4, 3)], size);
        assert!(path.has_road(size));
    }

    #[test]
    fn diagonal_is_not_a_road() {
        let size = 3;
        let diagonal = from_squares(&[(0, 0), (1, 1), (2, 2)], size);
        assert!(!diagonal.has_road(size));
    }

    #[test]
    fn broken_row_is_not_a_road() {
        let size = 5;
        let broken = from_squares(&[(0, 0), (1, 0), (3, 0), (4, 0)], size);
        assert!(!broken.has_road(size));
    }
}

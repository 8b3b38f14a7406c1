//! Board coordinates and slide directions.

use std::fmt;

/// Largest supported board edge.
pub const MAX_SIZE: usize = 8;

/// A square on the board, addressed by column `x` and row `y`.
///
/// `(0, 0)` is `a1`. The row-major index for a board of edge `size`
/// is `y * size + x`, which keeps every square of an 8x8 board inside
/// a single `u64` bitboard.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// Create a square from column and row.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Square {
        debug_assert!(x < MAX_SIZE && y < MAX_SIZE);
        Square { x: x as u8, y: y as u8 }
    }

    /// Create a square from a row-major index on a board of edge `size`.
    #[inline]
    pub const fn from_index(index: usize, size: usize) -> Square {
        Square::new(index % size, index / size)
    }

    /// Column, 0-based from the `a` file.
    #[inline]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    /// Row, 0-based from rank 1.
    #[inline]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major index on a board of edge `size`.
    #[inline]
    pub const fn index(self, size: usize) -> usize {
        self.y() * size + self.x()
    }

    /// Whether the square lies on a board of edge `size`.
    #[inline]
    pub const fn on_board(self, size: usize) -> bool {
        self.x() < size && self.y() < size
    }

    /// The neighbouring square in `dir`, or `None` off the edge.
    #[inline]
    pub fn step(self, dir: Direction, size: usize) -> Option<Square> {
        let (dx, dy) = dir.delta();
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if x < 0 || y < 0 || x >= size as i32 || y >= size as i32 {
            return None;
        }
        Some(Square::new(x as usize, y as usize))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.x) as char;
        write!(f, "{}{}", file, self.y + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

/// Direction of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards higher rows.
    Up = 0,
    /// Towards lower rows.
    Down = 1,
    /// Towards the `a` file.
    Left = 2,
    /// Away from the `a` file.
    Right = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Return the index (0..3).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(dx, dy)` offset of one step.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Notation symbol.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

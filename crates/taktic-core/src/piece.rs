//! Colored stone, bit-packed into a single byte.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored stone, bit-packed into a single byte.
///
/// Bit layout:
/// - bits 0-1: [`PieceKind`] (values 0-2)
/// - bit 2: [`Color`] (0 = White, 1 = Black)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of distinct colored stones.
    pub const COUNT: usize = 6;

    pub const WHITE_FLAT: Piece = Piece::new(PieceKind::Flat, Color::White);
    pub const WHITE_STANDING: Piece = Piece::new(PieceKind::Standing, Color::White);
    pub const WHITE_CAPSTONE: Piece = Piece::new(PieceKind::Capstone, Color::White);
    pub const BLACK_FLAT: Piece = Piece::new(PieceKind::Flat, Color::Black);
    pub const BLACK_STANDING: Piece = Piece::new(PieceKind::Standing, Color::Black);
    pub const BLACK_CAPSTONE: Piece = Piece::new(PieceKind::Capstone, Color::Black);

    /// Create a stone from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece((color as u8) << 2 | (kind as u8))
    }

    /// Return the stone kind (the lower 2 bits).
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self.0 & 0x03 {
            0 => PieceKind::Flat,
            1 => PieceKind::Standing,
            _ => PieceKind::Capstone,
        }
    }

    /// Return the color (bit 2).
    #[inline]
    pub const fn color(self) -> Color {
        match self.0 >> 2 {
            0 => Color::White,
            _ => Color::Black,
        }
    }

    /// Return a contiguous index 0-5 for use in fixed-size arrays.
    #[inline]
    pub const fn index(self) -> usize {
        let color_bit = (self.0 >> 2) as usize;
        let kind_bits = (self.0 & 0x03) as usize;
        color_bit * PieceKind::COUNT + kind_bits
    }

    /// The same stone laid flat. Used when a capstone flattens a wall.
    #[inline]
    pub const fn flattened(self) -> Piece {
        Piece::new(PieceKind::Flat, self.color())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color() {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color_prefix, self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;

    #[test]
    fn new_roundtrip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(kind, color);
                assert_eq!(piece.kind(), kind, "kind mismatch for {color:?} {kind:?}");
                assert_eq!(piece.color(), color, "color mismatch for {color:?} {kind:?}");
            }
        }
    }

    #[test]
    fn index_contiguity() {
        let mut seen = [false; Piece::COUNT];
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let idx = Piece::new(kind, color).index();
                assert!(!seen[idx], "duplicate index {idx}");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn flattening_keeps_color() {
        assert_eq!(Piece::BLACK_STANDING.flattened(), Piece::BLACK_FLAT);
        assert_eq!(Piece::WHITE_FLAT.flattened(), Piece::WHITE_FLAT);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Piece::WHITE_FLAT), "WF");
        assert_eq!(format!("{:?}", Piece::BLACK_CAPSTONE), "BC");
    }
}

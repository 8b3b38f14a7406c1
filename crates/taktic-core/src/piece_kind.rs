//! Stone kinds.

use std::fmt;

/// The kind of a stone, without color information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// A flat stone. Counts for roads and flat wins, can be stacked on.
    Flat = 0,
    /// A standing stone (wall). Blocks roads and slides.
    Standing = 1,
    /// A capstone. Counts for roads, blocks slides, flattens walls.
    Capstone = 2,
}

impl PieceKind {
    /// Total number of stone kinds.
    pub const COUNT: usize = 3;

    /// All stone kinds in index order.
    pub const ALL: [PieceKind; 3] = [PieceKind::Flat, PieceKind::Standing, PieceKind::Capstone];

    /// Return the index (0..2).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a stone of this kind on top of a stack is part of a road.
    #[inline]
    pub const fn is_road(self) -> bool {
        matches!(self, PieceKind::Flat | PieceKind::Capstone)
    }

    /// Prefix used when writing a placement, empty for flats.
    #[inline]
    pub const fn prefix(self) -> &'static str {
        match self {
            PieceKind::Flat => "",
            PieceKind::Standing => "S",
            PieceKind::Capstone => "C",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Flat => write!(f, "F"),
            PieceKind::Standing => write!(f, "S"),
            PieceKind::Capstone => write!(f, "C"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn index_values() {
        assert_eq!(PieceKind::Flat.index(), 0);
        assert_eq!(PieceKind::Standing.index(), 1);
        assert_eq!(PieceKind::Capstone.index(), 2);
    }

    #[test]
    fn road_kinds() {
        assert!(PieceKind::Flat.is_road());
        assert!(!PieceKind::Standing.is_road());
        assert!(PieceKind::Capstone.is_road());
    }

    #[test]
    fn prefixes() {
        assert_eq!(PieceKind::Flat.prefix(), "");
        assert_eq!(PieceKind::Standing.prefix(), "S");
        assert_eq!(PieceKind::Capstone.prefix(), "C");
    }
}

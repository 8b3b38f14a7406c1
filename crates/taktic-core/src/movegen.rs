//! Legal move generation.

use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::{Direction, MAX_SIZE, Square};
use crate::tak_move::{Drops, Move};

impl Position {
    /// Write every legal move into `out`, replacing its contents.
    ///
    /// Placements come first (row-major, flat → standing → capstone),
    /// then slides per source square and direction. A finished game has
    /// no moves.
    pub fn legal_moves(&self, out: &mut Vec<Move>) {
        out.clear();
        if self.is_terminal() {
            return;
        }
        generate_placements(self, out);
        if !self.is_opening() {
            generate_slides(self, out);
        }
    }

    /// Allocating convenience wrapper around [`legal_moves`](Self::legal_moves).
    pub fn all_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.legal_moves(&mut moves);
        moves
    }
}

fn generate_placements(pos: &Position, out: &mut Vec<Move>) {
    let size = pos.size();
    let reserves = pos.reserves(pos.placement_color());
    let kinds: &[PieceKind] = if pos.is_opening() {
        &[PieceKind::Flat]
    } else {
        &PieceKind::ALL
    };

    for idx in 0..size * size {
        let sq = Square::from_index(idx, size);
        if !pos.stack_at(sq).is_empty() {
            continue;
        }
        for &kind in kinds {
            let available = match kind {
                PieceKind::Capstone => reserves.capstones > 0,
                _ => reserves.flats > 0,
            };
            if available {
                out.push(Move::place(sq, kind));
            }
        }
    }
}

fn generate_slides(pos: &Position, out: &mut Vec<Move>) {
    let size = pos.size();
    let mover = pos.side_to_move();

    for idx in 0..size * size {
        let sq = Square::from_index(idx, size);
        let stack = pos.stack_at(sq);
        let Some(&top) = stack.first() else {
            continue;
        };
        if top.color() != mover {
            continue;
        }
        let max_carry = stack.len().min(size);
        let is_cap = top.kind() == PieceKind::Capstone;

        for dir in Direction::ALL {
            let (open, wall_next) = scan(pos, sq, dir);
            let flatten = is_cap && wall_next;
            for carry in 1..=max_carry {
                let mut buf = [0u8; MAX_SIZE];
                spreads(carry, open, &mut buf, 0, &mut |counts| {
                    push_slide(out, sq, dir, counts);
                });
                if flatten {
                    // Everything but the capstone is spread over the open
                    // squares, then the capstone lands alone on the wall.
                    flattening_spreads(carry, open, &mut |counts| {
                        push_slide(out, sq, dir, counts);
                    });
                }
            }
        }
    }
}

/// Number of enterable squares from `sq` in `dir`, and whether the first
/// square past them holds a standing stone.
fn scan(pos: &Position, sq: Square, dir: Direction) -> (usize, bool) {
    let size = pos.size();
    let mut open = 0;
    let mut at = sq;
    while let Some(next) = at.step(dir, size) {
        match pos.stack_at(next).first().map(|p| p.kind()) {
            None | Some(PieceKind::Flat) => open += 1,
            Some(PieceKind::Standing) => return (open, true),
            Some(PieceKind::Capstone) => return (open, false),
        }
        at = next;
    }
    (open, false)
}

/// Enumerate every way to split `remaining` stones into at most
/// `max_parts - len` further drops, each at least one.
fn spreads(
    remaining: usize,
    max_parts: usize,
    buf: &mut [u8; MAX_SIZE],
    len: usize,
    emit: &mut impl FnMut(&[u8]),
) {
    if remaining == 0 {
        if len > 0 {
            emit(&buf[..len]);
        }
        return;
    }
    if len == max_parts {
        return;
    }
    for d in 1..=remaining {
        buf[len] = d as u8;
        spreads(remaining - d, max_parts, buf, len + 1, emit);
    }
}

fn flattening_spreads(carry: usize, open: usize, emit: &mut impl FnMut(&[u8])) {
    if open == 0 {
        if carry == 1 {
            emit(&[1]);
        }
        return;
    }
    // One stone on each open square at least, plus the capstone.
    if carry <= open {
        return;
    }
    let mut buf = [0u8; MAX_SIZE];
    spreads(carry - 1, open, &mut buf, 0, &mut |prefix| {
        if prefix.len() != open {
            return;
        }
        let mut full = [0u8; MAX_SIZE];
        full[..open].copy_from_slice(prefix);
        full[open] = 1;
        emit(&full[..open + 1]);
    });
}

fn push_slide(out: &mut Vec<Move>, sq: Square, dir: Direction, counts: &[u8]) {
    if let Some(drops) = Drops::new(counts) {
        out.push(Move::slide(sq, dir, drops));
    }
}

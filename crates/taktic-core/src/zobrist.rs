//! Zobrist hashing keys for position deduplication.

use crate::color::Color;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::MAX_SIZE;

/// Stack heights beyond this share keys (modulo). Collisions only ever
/// weaken the move-ordering cache, never legality.
const HEIGHTS: usize = 16;

const SQUARES: usize = MAX_SIZE * MAX_SIZE;

/// Zobrist key for each (square, height from bottom, piece) triple.
pub(crate) static PIECE_SQUARE: [[[u64; Piece::COUNT]; HEIGHTS]; SQUARES] = {
    let mut table = [[[0u64; Piece::COUNT]; HEIGHTS]; SQUARES];
    let mut state = SEED;
    let mut sq = 0;
    while sq < SQUARES {
        let mut h = 0;
        while h < HEIGHTS {
            let mut piece = 0;
            while piece < Piece::COUNT {
                let (val, next) = xorshift64(state);
                table[sq][h][piece] = val;
                state = next;
                piece += 1;
            }
            h += 1;
        }
        sq += 1;
    }
    table
};

/// Zobrist key XORed when Black is the side to move.
pub(crate) static SIDE_TO_MOVE: u64 = {
    let mut state = SEED;
    let mut i = 0;
    while i < SQUARES * HEIGHTS * Piece::COUNT {
        let (_, next) = xorshift64(state);
        state = next;
        i += 1;
    }
    let (val, _) = xorshift64(state);
    val
};

/// Zobrist keys for the board edge, so equal layouts on different sizes differ.
pub(crate) static SIZE: [u64; MAX_SIZE + 1] = {
    let mut table = [0u64; MAX_SIZE + 1];
    let mut state = SEED;
    let mut i = 0;
    while i < SQUARES * HEIGHTS * Piece::COUNT + 1 {
        let (_, next) = xorshift64(state);
        state = next;
        i += 1;
    }
    let mut idx = 0;
    while idx <= MAX_SIZE {
        let (val, next) = xorshift64(state);
        table[idx] = val;
        state = next;
        idx += 1;
    }
    table
};

const SEED: u64 = 0x5441_4b53_5441_434b; // "TAKSTACK"

/// Xorshift64 PRNG. Returns (value, next_state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// Compute a Zobrist hash from scratch for the given position.
pub(crate) fn hash_from_scratch(pos: &Position) -> u64 {
    let size = pos.size();
    let mut hash = SIZE[size];

    for y in 0..size {
        for x in 0..size {
            let sq = y * MAX_SIZE + x;
            // Stacks are stored top-first; key by height from the bottom.
            for (h, piece) in pos.stack(x, y).iter().rev().enumerate() {
                hash ^= PIECE_SQUARE[sq][h % HEIGHTS][piece.index()];
            }
        }
    }

    if pos.side_to_move() == Color::Black {
        hash ^= SIDE_TO_MOVE;
    }

    hash
}

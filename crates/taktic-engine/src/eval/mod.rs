//! Static evaluation.
//!
//! Values are always from the side to move's perspective. Decided games
//! score near the sentinels so they dominate every heuristic value.

use taktic_core::{Outcome, PieceKind, Position};

/// Value of a won game before the distance adjustment.
pub const MAX_EVAL: i64 = 1 << 30;

/// Value of a lost game before the distance adjustment.
pub const MIN_EVAL: i64 = -MAX_EVAL;

/// Score `pos` for the side to move.
///
/// A finished game scores `MAX_EVAL - move_number` for the winner and
/// `MIN_EVAL + move_number` for the loser, preferring quick wins and slow
/// losses; a draw scores zero. Otherwise each flat on top of a stack
/// counts its distance from the nearest two edges.
pub fn evaluate(pos: &Position) -> i64 {
    if let Some(outcome) = pos.outcome() {
        return terminal_value(pos, outcome);
    }

    let size = pos.size();
    let me = pos.side_to_move();
    let mut mine = 0i64;
    let mut theirs = 0i64;
    for y in 0..size {
        for x in 0..size {
            let Some(top) = pos.top(x, y) else {
                continue;
            };
            if top.kind() != PieceKind::Flat {
                continue;
            }
            let weight = centrality(x, y, size);
            if top.color() == me {
                mine += weight;
            } else {
                theirs += weight;
            }
        }
    }
    mine - theirs
}

fn terminal_value(pos: &Position, outcome: Outcome) -> i64 {
    let plies = i64::from(pos.move_number());
    match outcome.winner() {
        None => 0,
        Some(winner) if winner == pos.side_to_move() => MAX_EVAL - plies,
        Some(_) => MIN_EVAL + plies,
    }
}

#[inline]
fn centrality(x: usize, y: usize, size: usize) -> i64 {
    let edge = size - 1;
    (x.min(edge - x) + y.min(edge - y)) as i64
}

/// Whether `value` encodes a decided game rather than a heuristic score.
#[inline]
pub fn is_decisive(value: i64) -> bool {
    value.abs() > MAX_EVAL / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use taktic_core::{Move, Piece, Square};

    fn flat(x: usize, y: usize) -> Move {
        Move::place(Square::new(x, y), PieceKind::Flat)
    }

    #[test]
    fn empty_board_is_zero() {
        for size in 3..=8 {
            assert_eq!(evaluate(&Position::new(size).unwrap()), 0);
        }
    }

    #[test]
    fn centrality_weights() {
        assert_eq!(centrality(0, 0, 5), 0);
        assert_eq!(centrality(2, 2, 5), 4);
        assert_eq!(centrality(1, 0, 5), 1);
        assert_eq!(centrality(3, 3, 6), 4);
        assert_eq!(centrality(2, 3, 6), 4);
    }

    #[test]
    fn counts_only_flat_tops() {
        let mut stacks = vec![Vec::new(); 25];
        stacks[12] = vec![Piece::WHITE_FLAT];
        stacks[6] = vec![Piece::BLACK_FLAT];
        stacks[8] = vec![Piece::BLACK_STANDING];
        stacks[18] = vec![Piece::WHITE_CAPSTONE, Piece::BLACK_FLAT];
        // Ply 4: white to move.
        let pos = Position::from_stacks(5, 4, stacks).unwrap();
        // Centre (2,2) = 4 for white; (1,1) = 2 for black.
        assert_eq!(evaluate(&pos), 4 - 2);
    }

    #[test]
    fn perspective_flips_with_side_to_move() {
        let mut stacks = vec![Vec::new(); 25];
        stacks[12] = vec![Piece::WHITE_FLAT];
        stacks[6] = vec![Piece::BLACK_FLAT];
        let white = Position::from_stacks(5, 4, stacks.clone()).unwrap();
        let black = Position::from_stacks(5, 5, stacks).unwrap();
        assert_eq!(evaluate(&white), -evaluate(&black));
    }

    #[test]
    fn road_win_scores_for_winner_distance() {
        let pos = [flat(2, 2), flat(0, 0), flat(1, 0), flat(0, 2), flat(2, 0)]
            .iter()
            .try_fold(Position::new(3).unwrap(), |p, m| p.apply(m))
            .unwrap();
        assert!(pos.is_terminal());
        // White completed the road; black is to move and has lost.
        assert_eq!(evaluate(&pos), MIN_EVAL + 5);
        assert!(is_decisive(evaluate(&pos)));
    }

    #[test]
    fn road_owned_by_side_to_move_scores_max() {
        // White flats across the bottom row, white to move at ply 6.
        let mut stacks = vec![Vec::new(); 9];
        stacks[0] = vec![Piece::WHITE_FLAT];
        stacks[1] = vec![Piece::WHITE_FLAT];
        stacks[2] = vec![Piece::WHITE_FLAT];
        stacks[4] = vec![Piece::BLACK_FLAT];
        stacks[8] = vec![Piece::BLACK_FLAT];
        let pos = Position::from_stacks(3, 6, stacks).unwrap();
        assert_eq!(pos.side_to_move(), taktic_core::Color::White);
        assert_eq!(pos.winner(), Some(taktic_core::Color::White));
        assert_eq!(evaluate(&pos), MAX_EVAL - 6);
    }

    #[test]
    fn decisive_threshold() {
        assert!(is_decisive(MAX_EVAL - 300));
        assert!(is_decisive(MIN_EVAL + 300));
        assert!(!is_decisive(0));
        assert!(!is_decisive(4 * 64));
        assert!(!is_decisive(-4 * 64));
    }

    #[test]
    fn drawn_game_is_zero() {
        // Full 3x3 board, 4 white tops and 4 black tops plus one wall.
        let stacks = vec![
            vec![Piece::WHITE_FLAT],
            vec![Piece::BLACK_FLAT],
            vec![Piece::WHITE_FLAT],
            vec![Piece::BLACK_FLAT],
            vec![Piece::WHITE_STANDING],
            vec![Piece::BLACK_FLAT],
            vec![Piece::BLACK_FLAT],
            vec![Piece::WHITE_FLAT],
            vec![Piece::WHITE_FLAT],
        ];
        let pos = Position::from_stacks(3, 9, stacks).unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
        assert_eq!(evaluate(&pos), 0);
    }
}

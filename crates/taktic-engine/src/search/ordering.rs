//! Staged move ordering.
//!
//! Candidates come out in this order: the cached best move for the
//! position, the next move of the seeded principal variation, the best
//! known reply to the previous move, then the generated move list. The
//! first three are only hints and are checked against the rules by
//! applying them; a move yielded by an earlier stage is never yielded again.

use rand::Rng;
use rand::seq::SliceRandom;
use taktic_core::{Move, Position};

use crate::search::heuristics::HistoryTable;
use crate::search::stack::StackEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    CacheMove,
    PvMove,
    Response,
    Generate,
    Remaining,
    Done,
}

/// How the generated move list is rearranged before it is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arrange {
    /// Keep the generator's order.
    Natural,
    /// Uniform random permutation (root only).
    Shuffle,
    /// Descending history score, ties in generator order.
    HistorySort,
}

/// Lazily yields the moves of one node, applying each into the ply's
/// child buffer before handing it out.
pub(crate) struct MovePicker {
    stage: Stage,
    cached: Option<Move>,
    pv: Option<Move>,
    response: Option<Move>,
    arrange: Arrange,
    tried: [u64; 3],
    tried_len: usize,
    cursor: usize,
}

impl MovePicker {
    pub(crate) fn new(
        cached: Option<Move>,
        pv: Option<Move>,
        response: Option<Move>,
        arrange: Arrange,
    ) -> Self {
        Self {
            stage: Stage::CacheMove,
            cached,
            pv,
            response,
            arrange,
            tried: [0; 3],
            tried_len: 0,
            cursor: 0,
        }
    }

    /// Next legal move. On `Some`, `entry.child` holds the position after it.
    pub(crate) fn pick_next<R: Rng + ?Sized>(
        &mut self,
        pos: &Position,
        entry: &mut StackEntry,
        history: &HistoryTable,
        rng: &mut R,
    ) -> Option<Move> {
        loop {
            match self.stage {
                Stage::CacheMove | Stage::PvMove | Stage::Response => {
                    let candidate = match self.stage {
                        Stage::CacheMove => {
                            self.stage = Stage::PvMove;
                            self.cached
                        }
                        Stage::PvMove => {
                            self.stage = Stage::Response;
                            self.pv
                        }
                        _ => {
                            self.stage = Stage::Generate;
                            self.response
                        }
                    };
                    if let Some(mv) = candidate
                        && self.try_hint(pos, mv, entry)
                    {
                        return Some(mv);
                    }
                }
                Stage::Generate => {
                    pos.legal_moves(&mut entry.moves);
                    match self.arrange {
                        Arrange::Natural => {}
                        Arrange::Shuffle => entry.moves.shuffle(rng),
                        Arrange::HistorySort => history_sort(entry, history),
                    }
                    self.cursor = 0;
                    self.stage = Stage::Remaining;
                }
                Stage::Remaining => {
                    while self.cursor < entry.moves.len() {
                        let mv = entry.moves[self.cursor];
                        self.cursor += 1;
                        if self.was_tried(mv) {
                            continue;
                        }
                        if pos.apply_into(&mv, &mut entry.child).is_ok() {
                            return Some(mv);
                        }
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return None,
            }
        }
    }

    fn was_tried(&self, mv: Move) -> bool {
        let fp = mv.fingerprint();
        self.tried[..self.tried_len].contains(&fp)
    }

    fn try_hint(&mut self, pos: &Position, mv: Move, entry: &mut StackEntry) -> bool {
        if self.was_tried(mv) {
            return false;
        }
        self.tried[self.tried_len] = mv.fingerprint();
        self.tried_len += 1;
        pos.apply_into(&mv, &mut entry.child).is_ok()
    }
}

/// Stable sort of `entry.moves` by descending history score, using the
/// entry's key buffer.
fn history_sort(entry: &mut StackEntry, history: &HistoryTable) {
    entry.keyed.clear();
    entry.keyed.extend(
        entry
            .moves
            .iter()
            .enumerate()
            .map(|(i, &mv)| (-history.score(mv), i as u32, mv)),
    );
    // (score, index) pairs are unique, so the unstable sort is deterministic.
    entry.keyed.sort_unstable_by_key(|&(score, idx, _)| (score, idx));
    entry.moves.clear();
    entry.moves.extend(entry.keyed.iter().map(|&(_, _, mv)| mv));
}

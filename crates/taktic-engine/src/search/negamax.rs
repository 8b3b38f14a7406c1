//! Negamax alpha-beta search.

use rand_xoshiro::Xoshiro256PlusPlus;
use taktic_core::{Move, Position};
use tracing::trace;

use crate::config::MoveOrdering;
use crate::eval::{MIN_EVAL, evaluate};
use crate::search::control::SearchControl;
use crate::search::heuristics::{HistoryTable, ResponseTable};
use crate::search::ordering::{Arrange, MovePicker};
use crate::search::stack::StackEntry;
use crate::search::tt::BestMoveCache;

/// Value of a node where no candidate move turned out to be legal.
pub const NO_MOVE_VALUE: i64 = MIN_EVAL - 1;

/// Per-iteration search state.
pub(super) struct SearchContext<'a> {
    /// Nodes visited this iteration.
    pub nodes: u64,
    /// Set once the control asked us to stop; the iteration is then void.
    pub aborted: bool,
    /// Whether `control` is polled at all. False for depth 1.
    pub interruptible: bool,
    pub ordering: MoveOrdering,
    pub history_sort: bool,
    pub verbosity: u8,
    pub control: &'a SearchControl,
    pub history: &'a mut HistoryTable,
    pub responses: &'a mut ResponseTable,
    pub cache: &'a mut BestMoveCache,
    pub rng: &'a mut Xoshiro256PlusPlus,
}

/// Negamax alpha-beta search, fail-soft.
///
/// Returns the best line from `pos` and its value for the side to move.
/// `seed` is the principal variation of the previous iteration, applied
/// only at the root; `prev` is the move that led to `pos`. When the search
/// is aborted the returned value is meaningless and `ctx.aborted` is set.
#[allow(clippy::too_many_arguments)]
pub(super) fn negamax(
    pos: &Position,
    depth: u32,
    ply: usize,
    seed: Option<Move>,
    prev: Option<Move>,
    mut alpha: i64,
    beta: i64,
    stack: &mut [StackEntry],
    ctx: &mut SearchContext<'_>,
) -> (Vec<Move>, i64) {
    ctx.nodes += 1;

    if ctx.interruptible && ctx.control.should_stop(ctx.nodes) {
        ctx.aborted = true;
        return (Vec::new(), 0);
    }

    if depth == 0 || pos.is_terminal() {
        return (Vec::new(), evaluate(pos));
    }

    let Some((entry, deeper)) = stack.split_first_mut() else {
        return (Vec::new(), evaluate(pos));
    };

    let heuristic = ctx.ordering == MoveOrdering::Heuristic;
    let mut picker = if heuristic {
        let cached = ctx.cache.probe(pos.hash());
        let response = prev.and_then(|p| ctx.responses.get(p));
        let arrange = if ply == 0 {
            Arrange::Shuffle
        } else if ctx.history_sort && depth > 1 {
            Arrange::HistorySort
        } else {
            Arrange::Natural
        };
        MovePicker::new(cached, seed, response, arrange)
    } else {
        MovePicker::new(None, seed, None, Arrange::Natural)
    };

    let mut best_line = Vec::new();
    let mut best_value = NO_MOVE_VALUE;
    let mut best_move = None;

    while let Some(mv) = picker.pick_next(pos, entry, &*ctx.history, &mut *ctx.rng) {
        let (child_line, child_value) = negamax(
            &entry.child,
            depth - 1,
            ply + 1,
            None,
            Some(mv),
            -beta,
            -alpha,
            deeper,
            ctx,
        );
        if ctx.aborted {
            return (Vec::new(), 0);
        }
        let value = -child_value;

        if ply == 0 && ctx.verbosity >= 2 {
            trace!(depth, %mv, value, "root move");
        }

        if value > best_value {
            best_value = value;
            best_move = Some(mv);
            best_line.clear();
            best_line.push(mv);
            best_line.extend_from_slice(&child_line);
            if heuristic {
                ctx.history.reward(mv, depth);
                if let Some(p) = prev {
                    ctx.responses.record(p, mv);
                }
            }
        }

        if value > alpha {
            alpha = value;
            if alpha > beta {
                break;
            }
        }
    }

    if heuristic && let Some(mv) = best_move {
        ctx.cache.store(pos.hash(), mv, depth);
    }

    (best_line, best_value)
}

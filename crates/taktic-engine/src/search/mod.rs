//! Iterative-deepening search and move ordering.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod stack;
pub mod tt;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use taktic_core::{Move, Position};
use tracing::debug;

use crate::config::{EngineConfig, TablePolicy};
use crate::error::{EngineError, SearchError};
use crate::eval::{MAX_EVAL, MIN_EVAL, is_decisive};
use control::SearchControl;
use heuristics::{HistoryTable, ResponseTable};
use negamax::{SearchContext, negamax};
use stack::SearchStack;
use tt::BestMoveCache;

/// Result of the deepest completed iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Principal variation; empty when the position has no legal move.
    pub pv: Vec<Move>,
    /// Value of `pv` for the side to move.
    pub value: i64,
    /// Depth of the iteration that produced `pv`.
    pub depth: u32,
    /// Nodes visited across all iterations, including a discarded one.
    pub nodes: u64,
}

/// Snapshot handed to the caller after each completed iteration.
#[derive(Debug, Clone, Copy)]
pub struct Iteration<'a> {
    pub depth: u32,
    pub value: i64,
    /// Nodes visited so far in this analysis.
    pub nodes: u64,
    pub pv: &'a [Move],
}

/// Iterative-deepening alpha-beta engine.
///
/// Ordering tables, the best-move cache, the shuffle RNG and the per-ply
/// buffers live for as long as the engine; by default what one search
/// learns biases the next. Call [`reset`](Self::reset) for a clean slate.
pub struct Engine {
    config: EngineConfig,
    history: HistoryTable,
    responses: ResponseTable,
    cache: BestMoveCache,
    stack: SearchStack,
    rng: Xoshiro256PlusPlus,
}

impl Engine {
    /// Build an engine, allocating its search buffers up front.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let stack = SearchStack::new(config.size, config.max_depth)?;
        Ok(Self {
            history: HistoryTable::new(),
            responses: ResponseTable::new(),
            cache: BestMoveCache::new(config.cache_bits),
            stack,
            rng: Xoshiro256PlusPlus::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forget all learned ordering data. The shuffle RNG keeps its state.
    pub fn reset(&mut self) {
        self.history.clear();
        self.responses.clear();
        self.cache.clear();
    }

    /// Search `pos` to the configured depth or until `control` says stop.
    pub fn analyze(&mut self, control: &SearchControl, pos: &Position) -> Analysis {
        self.analyze_with(control, pos, |_| {})
    }

    /// Like [`analyze`](Self::analyze), calling `on_iter` after every
    /// completed iteration.
    ///
    /// Depth 1 always runs to completion. Deeper iterations may be cut
    /// short by `control`, in which case the partial result is dropped and
    /// the previous iteration's answer stands.
    pub fn analyze_with<F>(&mut self, control: &SearchControl, pos: &Position, mut on_iter: F) -> Analysis
    where
        F: FnMut(&Iteration<'_>),
    {
        if self.config.table_policy == TablePolicy::ResetEachSearch {
            self.reset();
        }

        let mut completed = Analysis {
            pv: Vec::new(),
            value: 0,
            depth: 0,
            nodes: 0,
        };
        let mut nodes = 0u64;

        for depth in 1..=self.config.max_depth {
            if depth > 1 && control.should_stop_iterating() {
                break;
            }

            let mut ctx = SearchContext {
                nodes: 0,
                aborted: false,
                interruptible: depth > 1,
                ordering: self.config.ordering,
                history_sort: self.config.history_sort(),
                verbosity: self.config.verbosity,
                control,
                history: &mut self.history,
                responses: &mut self.responses,
                cache: &mut self.cache,
                rng: &mut self.rng,
            };
            let (pv, value) = negamax(
                pos,
                depth,
                0,
                completed.pv.first().copied(),
                None,
                MIN_EVAL - 1,
                MAX_EVAL + 1,
                self.stack.entries_mut(),
                &mut ctx,
            );
            nodes += ctx.nodes;

            if ctx.aborted {
                debug!(depth, nodes, "iteration abandoned");
                break;
            }

            completed.pv = pv;
            completed.value = value;
            completed.depth = depth;

            if self.config.verbosity > 0 {
                debug!(
                    depth,
                    value,
                    decisive = is_decisive(value),
                    nodes,
                    pv = %format_pv(&completed.pv),
                    "iteration complete"
                );
            }
            on_iter(&Iteration {
                depth,
                value,
                nodes,
                pv: &completed.pv,
            });
        }

        completed.nodes = nodes;
        completed
    }

    /// First move of the analysis of `pos`.
    pub fn get_move(&mut self, control: &SearchControl, pos: &Position) -> Result<Move, SearchError> {
        self.analyze(control, pos)
            .pv
            .first()
            .copied()
            .ok_or(SearchError::NoLegalMoves)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("history", &self.history.len())
            .field("responses", &self.responses.len())
            .field("cache", &self.cache.occupied())
            .finish()
    }
}

/// Render a line as `[a1 b2 3c3>12]`.
pub fn format_pv(pv: &[Move]) -> String {
    let moves: Vec<String> = pv.iter().map(|m| m.to_string()).collect();
    format!("[{}]", moves.join(" "))
}

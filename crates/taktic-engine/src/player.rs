//! Move-choosing players.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use taktic_core::{Move, Position};

use crate::error::SearchError;
use crate::search::Engine;
use crate::search::control::SearchControl;

/// Anything that can pick a move for the side to move.
pub trait Player {
    /// Choose a move in `pos`, giving up early if `control` says so.
    fn get_move(&mut self, control: &SearchControl, pos: &Position) -> Result<Move, SearchError>;
}

impl Player for Engine {
    fn get_move(&mut self, control: &SearchControl, pos: &Position) -> Result<Move, SearchError> {
        Engine::get_move(self, control, pos)
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: Xoshiro256PlusPlus,
    moves: Vec<Move>,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            moves: Vec::new(),
        }
    }
}

impl Player for RandomPlayer {
    fn get_move(&mut self, _control: &SearchControl, pos: &Position) -> Result<Move, SearchError> {
        pos.legal_moves(&mut self.moves);
        if self.moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let idx = self.rng.random_range(0..self.moves.len());
        Ok(self.moves[idx])
    }
}

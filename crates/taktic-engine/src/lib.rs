//! Search and evaluation for taktic.

pub mod config;
pub mod error;
pub mod eval;
pub mod player;
pub mod search;

pub use config::{EngineConfig, MAX_DEPTH, MoveOrdering, TablePolicy};
pub use error::{EngineError, SearchError};
pub use eval::{MAX_EVAL, MIN_EVAL, evaluate};
pub use player::{Player, RandomPlayer};
pub use search::control::SearchControl;
pub use search::{Analysis, Engine, Iteration, format_pv};

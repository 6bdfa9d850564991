//! Rules engine for Chess 39: chess where each side starts with a random
//! army worth 39 points instead of the classic setup.

pub mod army;
pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod snapshot;
pub mod special;
pub mod status;
pub mod types;
pub mod zobrist;

// Re-export the public surface
pub use army::{Army, ArmyGenerator, Composition};
pub use attacks::*;
pub use board::*;
pub use config::VariantConfig;
pub use error::*;
pub use fen::CLASSIC_FEN;
pub use game::{Game, MoveOutcome};
pub use movegen::*;
pub use perft::{divide, perft};
pub use snapshot::{GameState, MoveRecord};
pub use special::{CastleSide, PROMOTION_CHOICES};
pub use status::{GameStatus, Outcome};
pub use types::*;
pub use zobrist::ZOBRIST;

//! Error types for the rules engine.
//!
//! Every failure here is a local validation result handed back to the caller;
//! nothing in the engine is process-fatal.

use crate::status::GameStatus;
use crate::types::{Color, PieceKind, Square};

/// Errors returned by [`Game`](crate::game::Game) operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The asserted mover is not the side to move.
    #[error("not your turn: {expected} to move, got a move for {got}")]
    NotYourTurn { expected: Color, got: Color },

    /// The requested move is not in the legal-move set.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Promotion was required but missing, supplied when not applicable, or not a valid piece.
    #[error("invalid promotion: {0}")]
    InvalidPromotion(PromotionIssue),

    /// A mutating operation was attempted on a finished game.
    #[error("game is over ({status:?})")]
    GameOver { status: GameStatus },

    /// Codec text could not be decoded.
    #[error(transparent)]
    Codec(#[from] FenError),

    /// A snapshot could not be (de)serialized.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Replaying a snapshot's history did not reproduce its recorded position.
    #[error("snapshot history does not reproduce position: expected {expected}, replayed {replayed}")]
    SnapshotMismatch { expected: String, replayed: String },

    /// A resigned snapshot that does not name the winner.
    #[error("resigned snapshot has no winner")]
    MissingWinner,

    /// A caller-supplied army or board setup violates the army rules.
    #[error(transparent)]
    Army(#[from] ArmyError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PromotionIssue {
    #[error("pawn reaching the last rank must name a promotion piece")]
    Missing,
    #[error("promotion supplied for a move that does not promote")]
    NotApplicable,
    #[error("cannot promote to {0:?}")]
    Unsupported(PieceKind),
}

/// Malformed state-codec text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece letter '{0}'")]
    PieceLetter(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("{0} is in check but not to move")]
    OpponentInCheck(Color),
}

/// Violations of the army rules (the army-generation-failure class).
///
/// [`ArmyGenerator::generate`](crate::army::ArmyGenerator::generate) never returns
/// these; they surface only when validating caller-supplied armies or rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArmyError {
    #[error("army must contain exactly one king, found {0}")]
    KingCount(usize),
    #[error("army is worth {actual} points, expected {expected}")]
    PointTotal { expected: u32, actual: u32 },
    #[error("army has {actual} pawns, at most {max} allowed")]
    TooManyPawns { max: u8, actual: usize },
    #[error("{square} is outside the home ranks of {color}")]
    OutsideHomeRanks { color: Color, square: Square },
    #[error("pawn on {0} is not on its pawn rank")]
    PawnOffPawnRank(Square),
    #[error("two pieces placed on {0}")]
    DuplicateSquare(Square),
    #[error("expected an army for {expected}, got one for {got}")]
    WrongColor { expected: Color, got: Color },
    #[error("no army of {target} points with at most {max_pawns} pawns fits on the home ranks")]
    Infeasible { target: u32, max_pawns: u8 },
}

/// Failures loading or validating a [`VariantConfig`](crate::config::VariantConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Army(#[from] ArmyError),
    #[error("inactivity limit must be at least one halfmove")]
    ZeroInactivityLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square '{0}'")]
pub struct ParseSquareError(pub String);

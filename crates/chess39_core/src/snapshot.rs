//! Transport-boundary snapshot of a game.
//!
//! [`GameState`] is what a service layer stores and sends to clients. The
//! `fen` field is authoritative; `board` repeats the placement as a map from
//! square label to `[PIECE, color]` (or `null`) for clients that want it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::error::GameResult;
use crate::status::GameStatus;
use crate::types::*;

/// One accepted move as it appears in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "move")]
    pub mv: Move,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    /// Fullmove number the move was played at.
    pub move_number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Position the game started from; history replays from here.
    pub initial_fen: String,
    pub fen: String,
    pub board: BTreeMap<Square, Option<(PieceKind, Color)>>,
    pub current_turn: Color,
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub in_check: bool,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub history: Vec<MoveRecord>,
}

impl GameState {
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<GameState> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Every square, a1 through h8, with its piece as `(kind, color)`.
pub fn square_map(board: &Board) -> BTreeMap<Square, Option<(PieceKind, Color)>> {
    Square::all()
        .map(|sq| (sq, board.piece_at(sq).map(|pc| (pc.kind, pc.color))))
        .collect()
}

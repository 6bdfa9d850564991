//! Game status and terminal-state detection.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::Color;

/// Where a game stands. `Check` is an ongoing game whose side to move is in check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    DrawByInactivity,
    Resigned,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_draw(self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::DrawByInactivity)
    }
}

/// Status plus the winner, which is set only for checkmate and resignation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: GameStatus,
    pub winner: Option<Color>,
}

impl Outcome {
    pub fn new(status: GameStatus) -> Self {
        Self {
            status,
            winner: None,
        }
    }

    pub fn won_by(status: GameStatus, winner: Color) -> Self {
        Self {
            status,
            winner: Some(winner),
        }
    }
}

/// Classify a board for its side to move, given how many legal moves it has.
///
/// No legal moves ends the game as checkmate or stalemate; that takes
/// precedence over the inactivity draw, which triggers once the halfmove
/// clock reaches `inactivity_limit`.
pub fn assess_with(board: &Board, legal_count: usize, inactivity_limit: u32) -> Outcome {
    let stm = board.side_to_move();
    let in_check = board.in_check(stm);
    if legal_count == 0 {
        return if in_check {
            Outcome::won_by(GameStatus::Checkmate, stm.other())
        } else {
            Outcome::new(GameStatus::Stalemate)
        };
    }
    if board.halfmove_clock() >= inactivity_limit {
        return Outcome::new(GameStatus::DrawByInactivity);
    }
    if in_check {
        Outcome::new(GameStatus::Check)
    } else {
        Outcome::new(GameStatus::Ongoing)
    }
}

pub fn assess(board: &Board, inactivity_limit: u32) -> Outcome {
    assess_with(board, legal_moves(board).len(), inactivity_limit)
}

pub fn is_checkmate(board: &Board) -> bool {
    legal_moves(board).is_empty() && board.in_check(board.side_to_move())
}

pub fn is_stalemate(board: &Board) -> bool {
    legal_moves(board).is_empty() && !board.in_check(board.side_to_move())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;

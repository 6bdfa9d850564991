//! The game state machine.
//!
//! A [`Game`] owns one board, its move history and the authoritative status.
//! It changes only through [`Game::make_move`] and [`Game::resign`], and is
//! frozen once the status is terminal. Who is allowed to submit a move for a
//! color is the caller's business; the game only checks that the asserted
//! color is the side to move.

use tracing::{debug, info};

use crate::army::{Army, ArmyGenerator};
use crate::board::Board;
use crate::config::VariantConfig;
use crate::error::{ConfigError, GameError, GameResult};
use crate::movegen::{legal_moves, legal_moves_from};
use crate::snapshot::{GameState, MoveRecord, square_map};
use crate::special;
use crate::status::{self, GameStatus, Outcome};
use crate::types::*;

/// What an accepted move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move as resolved, with its derived flags.
    pub mv: Move,
    pub status: GameStatus,
    pub is_capture: bool,
    pub captured: Option<PieceKind>,
    /// Whether the side now to move is in check.
    pub in_check: bool,
    pub winner: Option<Color>,
}

#[derive(Clone, Debug)]
pub struct Game {
    initial: Board,
    board: Board,
    config: VariantConfig,
    history: Vec<MoveRecord>,
    status: GameStatus,
    winner: Option<Color>,
    /// Key of every position reached, the starting one included.
    position_keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Fresh game with two random armies under the standard rules.
    pub fn new() -> Self {
        let mut armies = ArmyGenerator::standard(None);
        Self::from_generator(&mut armies, VariantConfig::default())
    }

    /// Like [`Game::new`], but the armies are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut armies = ArmyGenerator::standard(Some(seed));
        Self::from_generator(&mut armies, VariantConfig::default())
    }

    /// Fresh game under custom rules, seeded if `seed` is given.
    pub fn with_config(config: VariantConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let mut armies = match seed {
            Some(seed) => ArmyGenerator::seeded(seed, &config)?,
            None => ArmyGenerator::from_entropy(&config)?,
        };
        Ok(Self::from_generator(&mut armies, config))
    }

    fn from_generator<R: rand::Rng>(armies: &mut ArmyGenerator<R>, config: VariantConfig) -> Self {
        let white = armies.generate(Color::White);
        let black = armies.generate(Color::Black);
        debug!(
            white = ?white.composition(),
            black = ?black.composition(),
            "armies generated"
        );
        Self::from_board(Board::place_armies(&white, &black), config)
    }

    /// Game from caller-supplied armies, each validated against `config`.
    pub fn from_armies(white: &Army, black: &Army, config: VariantConfig) -> GameResult<Self> {
        white.validate(&config)?;
        black.validate(&config)?;
        let board = Board::from_armies(white, black)?;
        Ok(Self::from_board(board, config))
    }

    /// Game continuing from an arbitrary position. The status is recomputed.
    pub fn from_board(board: Board, config: VariantConfig) -> Self {
        let outcome = status::assess(&board, config.inactivity_halfmoves);
        Game {
            initial: board.clone(),
            position_keys: vec![board.position_key()],
            board,
            config,
            history: Vec::new(),
            status: outcome.status,
            winner: outcome.winner,
        }
    }

    pub fn from_fen(fen: &str, config: VariantConfig) -> GameResult<Self> {
        let board = Board::from_fen(fen)?;
        Ok(Self::from_board(board, config))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
    pub fn outcome(&self) -> Outcome {
        Outcome {
            status: self.status,
            winner: self.winner,
        }
    }

    /// Validate and play a move for `mover`.
    ///
    /// Checks run in a fixed order: finished game, wrong side, promotion
    /// piece that can never be chosen, legality, then whether a promotion
    /// was required or forbidden for this move.
    pub fn make_move(
        &mut self,
        mover: Color,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> GameResult<MoveOutcome> {
        if self.status.is_terminal() {
            debug!(%from, %to, status = ?self.status, "move rejected: game over");
            return Err(GameError::GameOver {
                status: self.status,
            });
        }
        let expected = self.board.side_to_move();
        if mover != expected {
            debug!(%from, %to, %expected, got = %mover, "move rejected: not your turn");
            return Err(GameError::NotYourTurn {
                expected,
                got: mover,
            });
        }

        let legal = legal_moves(&self.board);
        let mv = special::resolve_move(&legal, from, to, promotion).inspect_err(|err| {
            debug!(%from, %to, error = %err, "move rejected");
        })?;

        let move_number = self.board.fullmove_number();
        let applied = self
            .board
            .apply_move(mv)
            .ok_or(GameError::IllegalMove { from, to })?;
        let captured = applied.captured.map(|pc| pc.kind);

        self.history.push(MoveRecord {
            mv,
            color: mover,
            piece: applied.moved.kind,
            captured,
            move_number,
        });
        self.position_keys.push(self.board.position_key());

        let outcome = status::assess(&self.board, self.config.inactivity_halfmoves);
        self.status = outcome.status;
        self.winner = outcome.winner;
        let in_check = self.board.in_check(self.board.side_to_move());

        debug!(
            mv = %mv,
            captured = ?captured,
            status = ?self.status,
            "move applied"
        );
        if self.status.is_terminal() {
            info!(status = ?self.status, winner = ?self.winner, "game over");
        }

        Ok(MoveOutcome {
            mv,
            status: self.status,
            is_capture: captured.is_some(),
            captured,
            in_check,
            winner: self.winner,
        })
    }

    /// `color` concedes; the other side wins.
    pub fn resign(&mut self, color: Color) -> GameResult<Outcome> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver {
                status: self.status,
            });
        }
        self.status = GameStatus::Resigned;
        self.winner = Some(color.other());
        info!(resigned = %color, winner = %color.other(), "game over");
        Ok(self.outcome())
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board)
    }

    /// Destinations the piece on `from` may legally move to, each listed once
    /// even when several promotion choices lead there.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.is_over() {
            return Vec::new();
        }
        let mut out: Vec<Square> = legal_moves_from(&self.board, from)
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// How many times the current position has occurred, this time included.
    pub fn repetition_count(&self) -> usize {
        let Some(current) = self.position_keys.last() else {
            return 0;
        };
        self.position_keys.iter().filter(|k| *k == current).count()
    }

    /// Reports a threefold repetition. This never ends the game by itself.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn state(&self) -> GameState {
        let stm = self.board.side_to_move();
        GameState {
            initial_fen: self.initial.to_fen(),
            fen: self.board.to_fen(),
            board: square_map(&self.board),
            current_turn: stm,
            status: self.status,
            winner: self.winner,
            in_check: self.board.in_check(stm),
            castling: self.board.castling(),
            en_passant: self.board.en_passant(),
            halfmove_clock: self.board.halfmove_clock(),
            fullmove_number: self.board.fullmove_number(),
            history: self.history.clone(),
        }
    }

    /// Rebuild a game by replaying `state.history` from `state.initial_fen`.
    ///
    /// Every recorded move goes through full validation again and the final
    /// position has to match `state.fen`. Only a resignation is taken from
    /// the snapshot as-is; any other status is recomputed.
    pub fn from_state(state: &GameState, config: VariantConfig) -> GameResult<Self> {
        let mut game = Game::from_fen(&state.initial_fen, config)?;
        for record in &state.history {
            game.make_move(record.color, record.mv.from, record.mv.to, record.mv.promotion)?;
        }

        let replayed = game.board.to_fen();
        if replayed != state.fen {
            return Err(GameError::SnapshotMismatch {
                expected: state.fen.clone(),
                replayed,
            });
        }

        if state.status == GameStatus::Resigned && !game.is_over() {
            let winner = state.winner.ok_or(GameError::MissingWinner)?;
            game.status = GameStatus::Resigned;
            game.winner = Some(winner);
        }
        Ok(game)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;

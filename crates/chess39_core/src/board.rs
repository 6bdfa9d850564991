use std::fmt;

use serde::{Deserialize, Serialize};

use crate::army::Army;
use crate::error::ArmyError;
use crate::special::{self, CastleSide};
use crate::types::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn get(self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    /// Rights only ever go from granted to revoked.
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = false,
            (Color::White, CastleSide::Queenside) => self.white_queenside = false,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = false,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = false,
        }
    }

    pub(crate) fn grant(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = true,
            (Color::White, CastleSide::Queenside) => self.white_queenside = true,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = true,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = true,
        }
    }
}

/// Canonical positional state: placement plus the metadata needed to
/// generate moves and detect draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// What [`Board::apply_move`] changed, beyond the moved piece itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Where the captured piece stood; differs from the destination on en passant.
    pub captured_on: Option<Square>,
    pub rook_move: Option<(Square, Square)>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// No pieces, White to move, no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The classic chess setup, which is itself a 39-point army per side.
    pub fn classic() -> Self {
        Self::place_armies(&Army::classic(Color::White), &Army::classic(Color::Black))
    }

    /// Places two armies on a fresh board, White to move.
    pub fn from_armies(white: &Army, black: &Army) -> Result<Self, ArmyError> {
        for (expected, army) in [(Color::White, white), (Color::Black, black)] {
            if army.color() != expected {
                return Err(ArmyError::WrongColor {
                    expected,
                    got: army.color(),
                });
            }
        }
        Ok(Self::place_armies(white, black))
    }

    pub(crate) fn place_armies(white: &Army, black: &Army) -> Self {
        let mut b = Board::empty();
        for army in [white, black] {
            for (kind, sq) in army.pieces() {
                b.set_piece(*sq, Some(Piece::new(army.color(), *kind)));
            }
        }
        b.castling = special::initial_castling_rights(&b);
        b
    }

    pub(crate) fn from_parts(
        squares: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        Board {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }
    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        matches!(self.squares[sq.index()], Some(pc) if pc.color == color)
    }
    pub(crate) fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.index()] = pc;
    }

    /// All occupied squares, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Plays `mv` unconditionally and updates all metadata.
    ///
    /// No legality checking happens here; the move must come from the
    /// generator. Castling relocates the rook, en passant removes the pawn
    /// behind the destination, and a pawn reaching the last rank becomes the
    /// move's promotion piece (queen if none was given). Returns `None`, with
    /// the board untouched, when `mv.from` is empty.
    pub fn apply_move(&mut self, mv: Move) -> Option<AppliedMove> {
        let from = mv.from;
        let to = mv.to;
        let mover = self.side_to_move;
        let moved = self.piece_at(from)?;
        let mut captured = self.piece_at(to);
        let mut captured_on = captured.map(|_| to);

        self.en_passant = None;

        if mv.is_en_passant
            && let Some(victim) = special::en_passant_victim(to, moved.color)
        {
            captured = self.piece_at(victim);
            captured_on = captured.map(|_| victim);
            self.set_piece(victim, None);
        }

        let reset_clock = moved.kind == PieceKind::Pawn || captured.is_some();

        let placed = if moved.kind == PieceKind::Pawn && special::is_promotion_square(to, moved.color)
        {
            Piece::new(moved.color, mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(from, None);
        self.set_piece(to, Some(placed));

        let mut rook_move = None;
        if mv.is_castle
            && moved.kind == PieceKind::King
            && let Some(side) = special::castle_side_for(moved.color, from, to)
        {
            let path = special::castle_path(moved.color, side);
            if let Some(rook) = self.piece_at(path.rook_from) {
                self.set_piece(path.rook_from, None);
                self.set_piece(path.rook_to, Some(rook));
                rook_move = Some((path.rook_from, path.rook_to));
            }
        }

        if moved.kind == PieceKind::King {
            self.castling.revoke(moved.color, CastleSide::Kingside);
            self.castling.revoke(moved.color, CastleSide::Queenside);
        }
        // A move from or onto a rook's home corner ends that side's right.
        for sq in [from, to] {
            if let Some((color, side)) = special::castle_corner(sq) {
                self.castling.revoke(color, side);
            }
        }

        if moved.kind == PieceKind::Pawn && (to.rank() - from.rank()).abs() == 2 {
            self.en_passant = Square::from_coords(from.file(), (from.rank() + to.rank()) / 2);
        }

        self.halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.other();

        Some(AppliedMove {
            moved,
            captured,
            captured_on,
            rook_move,
        })
    }

    /// Total point value on the board for `color`, king excluded.
    pub fn material(&self, color: Color) -> u32 {
        self.pieces()
            .filter(|(_, pc)| pc.color == color)
            .map(|(_, pc)| pc.kind.value())
            .sum()
    }
}

/// Text diagram, rank 8 at the top, White uppercase.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                let ch = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::letter);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  +----------------")?;
        write!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;

//! Attack detection.
//!
//! This module contains:
//! - Offset tables for knight and king jumps (shared with move generation)
//! - Slider directions for bishops, rooks and queens
//! - `is_square_attacked` / `in_check` on [`Board`]
//!
//! Pawns are checked on their diagonal capture squares only; a pawn never
//! attacks the square in front of it.

use crate::board::Board;
use crate::types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Board {
    /// True if any piece of `by` attacks `target`, ignoring whether moving
    /// that piece would expose its own king.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let is = |sq: Option<Square>, kinds: &[PieceKind]| {
            matches!(
                sq.and_then(|s| self.piece_at(s)),
                Some(pc) if pc.color == by && kinds.contains(&pc.kind)
            )
        };

        // A pawn of `by` attacks `target` from one rank behind it, diagonally.
        let back = -by.forward();
        if [-1, 1]
            .into_iter()
            .any(|df| is(target.offset(df, back), &[PieceKind::Pawn]))
        {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| is(target.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| is(target.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs.iter() {
                let mut cur = target.offset(df, dr);
                while let Some(sq) = cur {
                    if let Some(pc) = self.piece_at(sq) {
                        if pc.color == by && sliders.contains(&pc.kind) {
                            return true;
                        }
                        break;
                    }
                    cur = sq.offset(df, dr);
                }
            }
        }

        false
    }

    /// Whether `c`'s king is attacked. A board without that king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;

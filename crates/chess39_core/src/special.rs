//! Castling, en passant and promotion rules.
//!
//! Castling always uses the classic geometry: the king starts on the e-file
//! and lands on g or c, the rook comes from the h- or a-file corner and lands
//! beside it. Army placement puts kings and rooks on those squares so the
//! rule stays meaningful with random armies.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::error::{GameError, PromotionIssue};
use crate::types::*;

pub const KING_HOME_FILE: i8 = 4;

/// Pieces a pawn may promote to, in generation order.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];
}

/// Squares involved in one castling move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Files between king and rook that must be empty.
    pub between: &'static [i8],
    /// Files the king stands on, crosses or lands on; none may be attacked.
    pub king_walk: &'static [i8],
}

pub fn castle_path(color: Color, side: CastleSide) -> CastlePath {
    let rank = color.back_rank();
    let at = |file: i8| Square::at(file, rank);
    match side {
        CastleSide::Kingside => CastlePath {
            king_from: at(KING_HOME_FILE),
            king_to: at(6),
            rook_from: at(7),
            rook_to: at(5),
            between: &[5, 6],
            king_walk: &[4, 5, 6],
        },
        CastleSide::Queenside => CastlePath {
            king_from: at(KING_HOME_FILE),
            king_to: at(2),
            rook_from: at(0),
            rook_to: at(3),
            between: &[1, 2, 3],
            king_walk: &[4, 3, 2],
        },
    }
}

/// Which castle a king move from `from` to `to` would be, if any.
pub fn castle_side_for(color: Color, from: Square, to: Square) -> Option<CastleSide> {
    CastleSide::ALL.into_iter().find(|&side| {
        let path = castle_path(color, side);
        path.king_from == from && path.king_to == to
    })
}

/// The castling right tied to a rook home corner.
pub fn castle_corner(sq: Square) -> Option<(Color, CastleSide)> {
    Color::ALL.into_iter().find_map(|color| {
        CastleSide::ALL
            .into_iter()
            .find(|&side| castle_path(color, side).rook_from == sq)
            .map(|side| (color, side))
    })
}

/// Rights for a freshly set-up board: granted wherever a king sits on its
/// home square with an own rook in the matching corner.
pub fn initial_castling_rights(board: &Board) -> CastlingRights {
    let mut rights = CastlingRights::NONE;
    for color in Color::ALL {
        for side in CastleSide::ALL {
            let path = castle_path(color, side);
            let king = board.piece_at(path.king_from) == Some(Piece::new(color, PieceKind::King));
            let rook = board.piece_at(path.rook_from) == Some(Piece::new(color, PieceKind::Rook));
            if king && rook {
                rights.grant(color, side);
            }
        }
    }
    rights
}

/// Pushes the castling moves available to the king on `from`.
///
/// Requires the right, an own rook in the corner, empty squares between
/// king and rook, and no attacked square on the king's walk (which covers
/// castling out of check).
pub(crate) fn castling_moves(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let enemy = c.other();
    let rank = c.back_rank();
    for side in CastleSide::ALL {
        let path = castle_path(c, side);
        if from != path.king_from || !board.castling().get(c, side) {
            continue;
        }
        if board.piece_at(path.rook_from) != Some(Piece::new(c, PieceKind::Rook)) {
            continue;
        }
        let clear = path
            .between
            .iter()
            .filter_map(|&f| Square::from_coords(f, rank))
            .all(|sq| !board.is_occupied(sq));
        if !clear {
            continue;
        }
        let safe = path
            .king_walk
            .iter()
            .filter_map(|&f| Square::from_coords(f, rank))
            .all(|sq| !board.is_square_attacked(sq, enemy));
        if safe {
            let mut mv = Move::new(path.king_from, path.king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

/// Square of the pawn taken by an en-passant capture landing on `target`.
pub fn en_passant_victim(target: Square, mover: Color) -> Option<Square> {
    target.offset(0, -mover.forward())
}

pub fn is_promotion_square(sq: Square, color: Color) -> bool {
    sq.rank() == color.promotion_rank()
}

/// Matches a caller's request against the legal-move set, applying the
/// promotion rules: a promoting move must name one of
/// [`PROMOTION_CHOICES`], and a non-promoting move must not name anything.
pub fn resolve_move(
    legal: &[Move],
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Move, GameError> {
    if let Some(kind) = promotion
        && !PROMOTION_CHOICES.contains(&kind)
    {
        return Err(GameError::InvalidPromotion(PromotionIssue::Unsupported(kind)));
    }

    let mut candidates = legal.iter().filter(|m| m.from == from && m.to == to);
    let Some(first) = candidates.next() else {
        return Err(GameError::IllegalMove { from, to });
    };

    match (first.is_promotion(), promotion) {
        (false, None) => Ok(*first),
        (false, Some(_)) => Err(GameError::InvalidPromotion(PromotionIssue::NotApplicable)),
        (true, None) => Err(GameError::InvalidPromotion(PromotionIssue::Missing)),
        (true, Some(kind)) => std::iter::once(first)
            .chain(candidates)
            .find(|m| m.promotion == Some(kind))
            .copied()
            .ok_or(GameError::InvalidPromotion(PromotionIssue::Unsupported(kind))),
    }
}

#[cfg(test)]
#[path = "special_tests.rs"]
mod special_tests;

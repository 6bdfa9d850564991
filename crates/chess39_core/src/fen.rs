//! FEN text codec for [`Board`].
//!
//! Six space-separated fields: placement (rank 8 first), side to move,
//! castling (`KQkq` subset or `-`), en-passant target or `-`, halfmove clock,
//! fullmove number. The two counters may be omitted when decoding and then
//! default to `0` and `1`. Encoding always writes all six fields, so
//! `decode(encode(b)) == b` for every board.

use std::str::FromStr;

use crate::board::{Board, CastlingRights};
use crate::error::FenError;
use crate::special::CastleSide;
use crate::types::*;

/// FEN of the classic starting position.
pub const CLASSIC_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASTLING_LETTERS: [(char, Color, CastleSide); 4] = [
    ('K', Color::White, CastleSide::Kingside),
    ('Q', Color::White, CastleSide::Queenside),
    ('k', Color::Black, CastleSide::Kingside),
    ('q', Color::Black, CastleSide::Queenside),
];

pub fn encode(board: &Board) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match board.piece_at(Square::at(file, rank)) {
                Some(pc) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(pc.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match board.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = board.castling();
    let before = out.len();
    for (letter, color, side) in CASTLING_LETTERS {
        if rights.get(color, side) {
            out.push(letter);
        }
    }
    if out.len() == before {
        out.push('-');
    }

    out.push(' ');
    match board.en_passant() {
        Some(sq) => out.push_str(&sq.to_string()),
        None => out.push('-'),
    }

    out.push_str(&format!(
        " {} {}",
        board.halfmove_clock(),
        board.fullmove_number()
    ));
    out
}

pub fn decode(fen: &str) -> Result<Board, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&parts.len()) {
        return Err(FenError::FieldCount(parts.len()));
    }

    let squares = decode_placement(parts[0])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    let castling = decode_castling(parts[2])?;

    let en_passant = match parts[3] {
        "-" => None,
        text => {
            let sq: Square = text
                .parse()
                .map_err(|_| FenError::EnPassant(text.to_string()))?;
            // The target sits behind a pawn that just advanced two squares.
            if sq.rank() != 2 && sq.rank() != 5 {
                return Err(FenError::EnPassant(text.to_string()));
            }
            Some(sq)
        }
    };

    let halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
    let fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?;
    if fullmove_number == 0 {
        return Err(FenError::Counter("0".to_string()));
    }

    for color in Color::ALL {
        let count = squares
            .iter()
            .flatten()
            .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
            .count();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    let board = Board::from_parts(
        squares,
        side_to_move,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    );
    // The side that just moved can never have left its own king attacked.
    let idle = side_to_move.other();
    if board.in_check(idle) {
        return Err(FenError::OpponentInCheck(idle));
    }
    Ok(board)
}

fn decode_placement(text: &str) -> Result<[Option<Piece>; 64], FenError> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut squares = [None; 64];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as i8; // rank 8 comes first
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10)
                && (1..=8).contains(&d)
            {
                file += d as i8;
            } else {
                let pc = Piece::from_letter(ch).ok_or(FenError::PieceLetter(ch))?;
                let sq = Square::from_coords(file, rank)
                    .ok_or(FenError::RankWidth { rank: rank_idx })?;
                squares[sq.index()] = Some(pc);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth { rank: rank_idx });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth { rank: rank_idx });
        }
    }
    Ok(squares)
}

fn decode_castling(text: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for ch in text.chars() {
        let (_, color, side) = CASTLING_LETTERS
            .iter()
            .copied()
            .find(|(letter, _, _)| *letter == ch)
            .ok_or_else(|| FenError::Castling(text.to_string()))?;
        rights.grant(color, side);
    }
    Ok(rights)
}

fn parse_counter(text: &str) -> Result<u32, FenError> {
    text.parse()
        .map_err(|_| FenError::Counter(text.to_string()))
}

impl Board {
    pub fn to_fen(&self) -> String {
        encode(self)
    }

    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        decode(fen)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;

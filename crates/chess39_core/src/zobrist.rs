//! Zobrist position keys.
//!
//! A key identifies a position for repetition purposes: placement, side to
//! move, castling rights and the en-passant file. Move counters are not part
//! of it, so the same position reached at different move numbers collides
//! on purpose.

use crate::board::Board;
use crate::special::CastleSide;
use crate::types::{Color, Piece, Square};

/// Pre-computed random values, indexed `[color][piece_kind][square]` for pieces.
pub struct ZobristKeys {
    pieces: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    /// [white kingside, white queenside, black kingside, black queenside]
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    /// Fixed-seed xorshift64 stream, evaluated at compile time.
    pub const fn new() -> Self {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant_file[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Board {
    /// Hash of everything that makes two positions "the same" for repetition.
    pub fn position_key(&self) -> u64 {
        let mut key = self
            .pieces()
            .fold(0u64, |acc, (sq, pc)| acc ^ ZOBRIST.piece_key(pc, sq));

        if self.side_to_move() == Color::Black {
            key ^= ZOBRIST.black_to_move;
        }

        let rights = self.castling();
        let flags = [
            rights.get(Color::White, CastleSide::Kingside),
            rights.get(Color::White, CastleSide::Queenside),
            rights.get(Color::Black, CastleSide::Kingside),
            rights.get(Color::Black, CastleSide::Queenside),
        ];
        for (i, set) in flags.into_iter().enumerate() {
            if set {
                key ^= ZOBRIST.castling[i];
            }
        }

        if let Some(ep) = self.en_passant() {
            key ^= ZOBRIST.en_passant_file[ep.file() as usize];
        }
        key
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;

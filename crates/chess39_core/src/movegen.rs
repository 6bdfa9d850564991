use crate::{
    attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS},
    board::Board,
    special::{self, PROMOTION_CHOICES},
    types::*,
};

/// Generate all legal moves for the side to move, returning a freshly
/// allocated vector.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Every pseudo-legal candidate is played on a clone of `board`; candidates
/// that leave the mover's king attacked are discarded. The original board is
/// never touched.
pub fn legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves_into(board, out);

    let mover = board.side_to_move();
    out.retain(|&mv| leaves_king_safe(board, mv, mover));
}

/// Legal moves of the piece standing on `from`.
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    if let Some(pc) = board.piece_at(from)
        && pc.color == board.side_to_move()
    {
        piece_moves(board, from, pc, &mut out);
    }
    let mover = board.side_to_move();
    out.retain(|&mv| leaves_king_safe(board, mv, mover));
    out
}

pub fn is_legal(board: &Board, mv: Move) -> bool {
    legal_moves_from(board, mv.from).contains(&mv)
}

fn leaves_king_safe(board: &Board, mv: Move, mover: Color) -> bool {
    let mut next = board.clone();
    next.apply_move(mv);
    !next.in_check(mover)
}

/// Moves consistent with piece geometry for the side to move, ignoring the
/// safety of the mover's own king.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_legal_moves_into(board, &mut out);
    out
}

pub fn pseudo_legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    let stm = board.side_to_move();
    for (sq, pc) in board.pieces() {
        if pc.color == stm {
            piece_moves(board, sq, pc, out);
        }
    }
}

fn piece_moves(board: &Board, from: Square, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_steps(board, from, pc.color, out, &KNIGHT_OFFSETS),
        PieceKind::Bishop => gen_slider(board, from, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(board, from, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, out, &DIAGONALS);
            gen_slider(board, from, pc.color, out, &ORTHOGONALS);
        }
        PieceKind::King => {
            gen_steps(board, from, pc.color, out, &KING_OFFSETS);
            special::castling_moves(board, from, pc.color, out);
        }
    }
}

fn push_pawn_move(out: &mut Vec<Move>, mv: Move, c: Color) {
    if special::is_promotion_square(mv.to, c) {
        for pk in PROMOTION_CHOICES {
            out.push(Move {
                promotion: Some(pk),
                ..mv
            });
        }
    } else {
        out.push(mv);
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();

    // forward 1, then forward 2 from the pawn rank
    if let Some(to) = from.offset(0, dir)
        && !board.is_occupied(to)
    {
        push_pawn_move(out, Move::new(from, to), c);

        if from.rank() == c.pawn_rank()
            && let Some(to2) = from.offset(0, 2 * dir)
            && !board.is_occupied(to2)
        {
            out.push(Move::new(from, to2));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(out, Move::capture(from, to), c),
            Some(_) => {}
            None if board.en_passant() == Some(to) => {
                let victim = special::en_passant_victim(to, c).and_then(|s| board.piece_at(s));
                if victim == Some(Piece::new(c.other(), PieceKind::Pawn)) {
                    let mut mv = Move::capture(from, to);
                    mv.is_en_passant = true;
                    out.push(mv);
                }
            }
            None => {}
        }
    }
}

/// Single-step pieces: knights and the king's ordinary moves.
fn gen_steps(board: &Board, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::capture(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::capture(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

use crate::{board::Board, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from `board` down to `depth`, playing each
/// move on a copy so `board` itself is never modified.
pub fn perft(board: &Board, depth: u8) -> u64 {
    fn inner(board: &Board, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(board, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let mut next = board.clone();
            next.apply_move(mv);
            nodes += inner(&next, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(board, depth, &mut layers[..])
}

/// Per-root-move node counts, sorted by move text. Handy for diffing
/// against another generator.
pub fn divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::new();
    legal_moves_into(board, &mut roots);
    let mut out: Vec<(Move, u64)> = roots
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.apply_move(mv);
            (mv, perft(&next, depth.saturating_sub(1)))
        })
        .collect();
    out.sort_by_key(|(mv, _)| mv.to_string());
    out
}

//! Random playouts from random armies, checking the engine's invariants
//! after every accepted move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use chess39_core::{Board, Color, Game, GameState, PieceKind, VariantConfig};

const GAMES: u64 = 64;
const MAX_PLIES: usize = 300;

fn king_count(board: &Board, color: Color) -> usize {
    board
        .pieces()
        .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
        .count()
}

fn playout(seed: u64) -> Game {
    let mut rng = StdRng::seed_from_u64(seed ^ 0xC0FFEE);
    let mut game = Game::with_seed(seed);

    for _ in 0..MAX_PLIES {
        if game.is_over() {
            break;
        }
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            panic!("seed {seed}: live game without legal moves");
        };

        let before = game.board().clone();
        let mover = before.side_to_move();
        let out = game
            .make_move(mover, mv.from, mv.to, mv.promotion)
            .unwrap_or_else(|e| panic!("seed {seed}: generated move {mv} rejected: {e}"));
        let after = game.board();

        assert!(!after.in_check(mover), "seed {seed}: {mv} left the king attacked");
        assert_eq!(after.side_to_move(), mover.other());
        for color in Color::ALL {
            assert_eq!(king_count(after, color), 1, "seed {seed}");
        }

        let pawn_or_capture = out.is_capture
            || before.piece_at(mv.from).map(|pc| pc.kind) == Some(PieceKind::Pawn);
        let expected_clock = if pawn_or_capture {
            0
        } else {
            before.halfmove_clock() + 1
        };
        assert_eq!(after.halfmove_clock(), expected_clock, "seed {seed}");

        let rights_before = before.castling();
        let rights_after = after.castling();
        for (was, now) in [
            (rights_before.white_kingside, rights_after.white_kingside),
            (rights_before.white_queenside, rights_after.white_queenside),
            (rights_before.black_kingside, rights_after.black_kingside),
            (rights_before.black_queenside, rights_after.black_queenside),
        ] {
            assert!(was || !now, "seed {seed}: castling right regained");
        }

        if let Some(ep) = after.en_passant() {
            let piece = before.piece_at(mv.from).map(|pc| pc.kind);
            assert_eq!(piece, Some(PieceKind::Pawn), "seed {seed}: stray en passant {ep}");
            assert_eq!((mv.to.rank() - mv.from.rank()).abs(), 2);
        }

        let decoded = Board::from_fen(&after.to_fen()).expect("encoded board decodes");
        assert_eq!(&decoded, after, "seed {seed}: codec round trip");
    }
    game
}

#[test]
fn random_playouts_keep_invariants() {
    (0..GAMES).into_par_iter().for_each(|seed| {
        playout(seed);
    });
}

#[test]
fn random_playouts_restore_from_snapshot() {
    (0..16u64).into_par_iter().for_each(|seed| {
        let game = playout(seed);
        let json = game.state().to_json().expect("serialize");
        let state = GameState::from_json(&json).expect("deserialize");
        let restored = Game::from_state(&state, VariantConfig::default())
            .unwrap_or_else(|e| panic!("seed {seed}: restore failed: {e}"));
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.status(), game.status());
        assert_eq!(restored.winner(), game.winner());
        assert_eq!(restored.history(), game.history());
    });
}

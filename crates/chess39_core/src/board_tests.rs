use super::*;

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).expect("valid fen")
}

#[test]
fn test_classic_setup() {
    let b = Board::classic();
    assert_eq!(b.piece_at(sq("e1")), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(b.piece_at(sq("d8")), Some(Piece::new(Color::Black, PieceKind::Queen)));
    assert_eq!(b.material(Color::White), 39);
    assert_eq!(b.material(Color::Black), 39);
    assert_eq!(b.castling(), board(crate::fen::CLASSIC_FEN).castling());
    assert_eq!(b.side_to_move(), Color::White);
}

#[test]
fn test_occupancy_queries() {
    let b = Board::classic();
    assert!(b.is_occupied(sq("a2")));
    assert!(!b.is_occupied(sq("a3")));
    assert!(b.is_occupied_by(sq("a7"), Color::Black));
    assert!(!b.is_occupied_by(sq("a7"), Color::White));
    assert_eq!(b.king_square(Color::Black), Some(sq("e8")));
}

#[test]
fn test_apply_move_from_empty_square_is_noop() {
    let mut b = Board::classic();
    let before = b.clone();
    assert!(b.apply_move(Move::new(sq("e4"), sq("e5"))).is_none());
    assert_eq!(b, before);
}

#[test]
fn test_double_push_sets_en_passant_then_clears() {
    let mut b = Board::classic();
    b.apply_move(Move::new(sq("e2"), sq("e4")));
    assert_eq!(b.en_passant(), Some(sq("e3")));
    assert_eq!(b.side_to_move(), Color::Black);
    assert_eq!(b.fullmove_number(), 1);

    b.apply_move(Move::new(sq("g8"), sq("f6")));
    assert_eq!(b.en_passant(), None);
    assert_eq!(b.fullmove_number(), 2);
    assert_eq!(b.halfmove_clock(), 1);
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let mut b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    let mut mv = Move::capture(sq("e5"), sq("d6"));
    mv.is_en_passant = true;
    let applied = b.apply_move(mv).expect("piece on e5");

    assert_eq!(applied.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(applied.captured_on, Some(sq("d5")));
    assert_eq!(b.piece_at(sq("d5")), None);
    assert_eq!(b.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(b.halfmove_clock(), 0);
}

#[test]
fn test_castle_moves_rook_and_revokes_rights() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
    let mut mv = Move::new(sq("e1"), sq("g1"));
    mv.is_castle = true;
    let applied = b.apply_move(mv).expect("king on e1");

    assert_eq!(applied.rook_move, Some((sq("h1"), sq("f1"))));
    assert_eq!(b.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(b.piece_at(sq("h1")), None);
    assert!(!b.castling().white_kingside);
    assert!(!b.castling().white_queenside);
    assert!(b.castling().black_kingside);
    assert_eq!(b.halfmove_clock(), 4);
}

#[test]
fn test_rook_capture_revokes_opponent_right() {
    let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    b.apply_move(Move::capture(sq("a1"), sq("a8")));
    assert!(!b.castling().white_queenside);
    assert!(!b.castling().black_queenside);
    assert!(b.castling().white_kingside);
    assert!(b.castling().black_kingside);
}

#[test]
fn test_promotion_defaults_to_queen() {
    let mut b = board("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    b.apply_move(Move::new(sq("a7"), sq("a8")));
    assert_eq!(b.piece_at(sq("a8")), Some(Piece::new(Color::White, PieceKind::Queen)));

    let mut b = board("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    b.apply_move(Move {
        promotion: Some(PieceKind::Knight),
        ..Move::new(sq("a7"), sq("a8"))
    });
    assert_eq!(b.piece_at(sq("a8")), Some(Piece::new(Color::White, PieceKind::Knight)));
}

#[test]
fn test_display_diagram() {
    let text = Board::classic().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "8 | r n b q k b n r");
    assert_eq!(lines[7], "1 | R N B Q K B N R");
    assert_eq!(lines[4], "4 | . . . . . . . .");
    assert_eq!(lines[9], "    a b c d e f g h");
}

#[test]
fn test_counters_saturate_at_max() {
    let mut b = board("4k3/8/8/8/8/8/8/R3K3 b - - 4294967295 4294967295");
    let mv = crate::movegen::legal_moves(&b)
        .into_iter()
        .find(|m| m.from == sq("e8") && m.to == sq("d8"))
        .expect("king step");
    b.apply_move(mv).expect("piece on e8");
    assert_eq!(b.halfmove_clock(), u32::MAX);
    assert_eq!(b.fullmove_number(), u32::MAX);
    assert_eq!(b.side_to_move(), Color::White);
}

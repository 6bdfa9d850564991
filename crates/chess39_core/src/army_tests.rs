use super::*;

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

#[test]
fn test_classic_composition_fits() {
    let config = VariantConfig::default();
    assert_eq!(Composition::CLASSIC.points(), 39);
    assert!(Composition::CLASSIC.fits(&config));
    assert_eq!(Army::classic(Color::White).composition(), Composition::CLASSIC);
    assert!(Army::classic(Color::Black).validate(&config).is_ok());
}

#[test]
fn test_enumerate_only_valid_compositions() {
    let config = VariantConfig::default();
    let all = Composition::enumerate(&config);
    assert!(all.contains(&Composition::CLASSIC));
    for comp in &all {
        assert_eq!(comp.points(), 39);
        assert!(comp.pawns <= 8);
        assert!(comp.piece_count() + 1 <= HOME_SQUARES);
    }
    // Four queens and a bishop: 39 points with no pawns.
    assert!(all.contains(&Composition {
        queens: 4,
        bishops: 1,
        ..Composition::default()
    }));
}

#[test]
fn test_enumerate_rejects_overfull_armies() {
    // 13 knights need 14 squares with the king. 7N + 4B + 6P need 18.
    let config = VariantConfig::default();
    let all = Composition::enumerate(&config);
    assert!(all.contains(&Composition {
        knights: 13,
        ..Composition::default()
    }));
    assert!(!all.contains(&Composition {
        knights: 7,
        bishops: 4,
        pawns: 6,
        ..Composition::default()
    }));
}

#[test]
fn test_generated_army_is_valid() {
    let config = VariantConfig::default();
    let mut generator = ArmyGenerator::seeded(7, &config).expect("valid config");
    for color in Color::ALL {
        for _ in 0..200 {
            let army = generator.generate(color);
            army.validate(&config).expect("generated army must be valid");
            assert_eq!(army.color(), color);
        }
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let config = VariantConfig::default();
    let mut a = ArmyGenerator::seeded(42, &config).expect("valid config");
    let mut b = ArmyGenerator::seeded(42, &config).expect("valid config");
    for _ in 0..20 {
        assert_eq!(a.generate(Color::White), b.generate(Color::White));
    }
}

#[test]
fn test_placement_puts_king_and_rooks_home() {
    let config = VariantConfig::default();
    let mut generator = ArmyGenerator::seeded(1, &config).expect("valid config");
    let comp = Composition {
        queens: 1,
        rooks: 3,
        bishops: 2,
        knights: 1,
        pawns: 6,
    };
    let army = generator.place(Color::Black, &comp);
    army.validate(&config).expect("valid placement");

    let at = |s: &str| army.pieces().iter().find(|(_, q)| *q == sq(s)).map(|(k, _)| *k);
    assert_eq!(at("e8"), Some(PieceKind::King));
    assert_eq!(at("h8"), Some(PieceKind::Rook));
    assert_eq!(at("a8"), Some(PieceKind::Rook));
    assert_eq!(at("d8"), Some(PieceKind::Queen));
    assert_eq!(at("c8"), Some(PieceKind::Bishop));
    assert_eq!(at("b8"), Some(PieceKind::Knight));
    assert_eq!(at("g8"), Some(PieceKind::Rook));
    assert_eq!(army.count(PieceKind::Rook), 3);
    assert_eq!(army.count(PieceKind::Pawn), 6);
}

#[test]
fn test_overflow_pieces_use_spare_pawn_squares() {
    let config = VariantConfig::default();
    let mut generator = ArmyGenerator::seeded(3, &config).expect("valid config");
    let comp = Composition {
        knights: 13,
        ..Composition::default()
    };
    let army = generator.place(Color::White, &comp);
    army.validate(&config).expect("valid placement");
    assert_eq!(army.count(PieceKind::Knight), 13);
    let on_pawn_rank = army.pieces().iter().filter(|(_, s)| s.rank() == 1).count();
    assert_eq!(on_pawn_rank, 6);
}

#[test]
fn test_validate_rejects_bad_armies() {
    let config = VariantConfig::default();
    let mut pieces = Army::classic(Color::White).pieces().to_vec();

    pieces.retain(|(k, _)| *k != PieceKind::King);
    assert_eq!(
        Army::new(Color::White, pieces.clone(), &config).unwrap_err(),
        ArmyError::KingCount(0)
    );

    pieces.push((PieceKind::King, sq("e1")));
    pieces.retain(|(_, s)| *s != sq("a2"));
    assert_eq!(
        Army::new(Color::White, pieces.clone(), &config).unwrap_err(),
        ArmyError::PointTotal {
            expected: 39,
            actual: 38
        }
    );

    pieces.push((PieceKind::Pawn, sq("a3")));
    assert!(matches!(
        Army::new(Color::White, pieces.clone(), &config),
        Err(ArmyError::OutsideHomeRanks { .. })
    ));

    pieces.pop();
    pieces.push((PieceKind::Pawn, sq("b2")));
    assert_eq!(
        Army::new(Color::White, pieces, &config).unwrap_err(),
        ArmyError::DuplicateSquare(sq("b2"))
    );
}

#[test]
fn test_validate_pawn_rules() {
    let config = VariantConfig::default();
    let mut pieces = Army::classic(Color::White).pieces().to_vec();
    // Swap the b1 knight and the a2 pawn.
    pieces.retain(|(_, s)| *s != sq("b1") && *s != sq("a2"));
    pieces.push((PieceKind::Knight, sq("a2")));
    pieces.push((PieceKind::Pawn, sq("b1")));
    assert_eq!(
        Army::new(Color::White, pieces, &config).unwrap_err(),
        ArmyError::PawnOffPawnRank(sq("b1"))
    );

    let capped = VariantConfig {
        max_pawns: 4,
        ..VariantConfig::default()
    };
    assert!(matches!(
        Army::classic(Color::White).validate(&capped),
        Err(ArmyError::TooManyPawns { max: 4, actual: 8 })
    ));
}

#[test]
fn test_generator_rejects_infeasible_rules() {
    let config = VariantConfig {
        target_points: 2,
        max_pawns: 0,
        ..VariantConfig::default()
    };
    assert!(matches!(
        ArmyGenerator::seeded(0, &config),
        Err(ConfigError::Army(ArmyError::Infeasible { target: 2, max_pawns: 0 }))
    ));
    assert!(ArmyGenerator::from_entropy(&config).is_err());
}

#[test]
fn test_standard_generator_uses_default_rules() {
    let mut generator = ArmyGenerator::standard(Some(11));
    assert_eq!(generator.config(), &VariantConfig::default());
    for _ in 0..50 {
        let army = generator.generate(Color::White);
        army.validate(&VariantConfig::default()).expect("valid army");
    }
}

#[test]
fn test_square_in_front_of_king_never_holds_heavy_piece() {
    // Seven rooks, a bishop and a pawn: one rook has to spill onto the pawn rank.
    let config = VariantConfig::default();
    let mut generator = ArmyGenerator::seeded(5, &config).expect("valid config");
    let comp = Composition {
        rooks: 7,
        bishops: 1,
        pawns: 1,
        ..Composition::default()
    };
    for _ in 0..50 {
        let army = generator.place(Color::White, &comp);
        army.validate(&config).expect("valid placement");
        let front = army.pieces().iter().find(|(_, s)| *s == sq("e2")).map(|(k, _)| *k);
        assert_eq!(front, Some(PieceKind::Pawn));
    }
}

#[test]
fn test_generated_games_never_start_with_a_king_attacked() {
    for seed in 0..500 {
        let board = crate::game::Game::with_seed(seed).board().clone();
        for color in Color::ALL {
            assert!(!board.in_check(color), "seed {seed}: {color} starts in check");
        }
        crate::board::Board::from_fen(&board.to_fen()).expect("start position decodes");
    }
}

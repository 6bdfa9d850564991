//! Army generation properties over many draws.

use rayon::prelude::*;

use chess39_core::{
    ArmyGenerator, Board, Color, Game, PieceKind, VariantConfig, is_legal, legal_moves,
    pseudo_legal_moves,
};

const GENERATIONS: u64 = 10_000;

#[test]
fn every_generated_army_is_valid() {
    let config = VariantConfig::default();
    (0..GENERATIONS).into_par_iter().for_each(|seed| {
        let mut generator = ArmyGenerator::seeded(seed, &config).expect("valid config");
        for color in Color::ALL {
            let army = generator.generate(color);
            assert_eq!(army.points(), 39, "seed {seed}");
            assert!(army.count(PieceKind::Pawn) <= 8, "seed {seed}");
            assert_eq!(army.count(PieceKind::King), 1, "seed {seed}");
            army.validate(&config)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        }
    });
}

#[test]
fn entropy_armies_are_valid() {
    let config = VariantConfig::default();
    (0..1_000).into_par_iter().for_each(|_| {
        let mut generator = ArmyGenerator::from_entropy(&config).expect("valid config");
        let army = generator.generate(Color::Black);
        assert!(army.validate(&config).is_ok());
    });
}

#[test]
fn custom_budget_is_respected() {
    let config = VariantConfig {
        target_points: 25,
        max_pawns: 3,
        ..VariantConfig::default()
    };
    config.validate().expect("feasible");
    (0..1_000u64).into_par_iter().for_each(|seed| {
        let army = ArmyGenerator::seeded(seed, &config)
            .expect("valid config")
            .generate(Color::White);
        assert_eq!(army.points(), 25);
        assert!(army.count(PieceKind::Pawn) <= 3);
    });
}

#[test]
fn generated_armies_are_varied() {
    let config = VariantConfig::default();
    let mut generator = ArmyGenerator::seeded(99, &config).expect("valid config");
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(generator.generate(Color::White).composition());
    }
    assert!(seen.len() > 10, "only {} distinct compositions", seen.len());
}

#[test]
fn initial_move_count_matches_recount() {
    // No fixed literal exists for random armies; recount independently.
    (0..200u64).into_par_iter().for_each(|seed| {
        let g = Game::with_seed(seed);
        let board: &Board = g.board();
        let legal = legal_moves(board);
        let recount = pseudo_legal_moves(board)
            .into_iter()
            .filter(|mv| is_legal(board, *mv))
            .count();
        assert_eq!(legal.len(), recount, "seed {seed}");
        assert!(!legal.is_empty(), "seed {seed}");
        assert_eq!(g.legal_moves().len(), legal.len());
    });
}

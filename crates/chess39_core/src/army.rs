//! Random point-balanced armies.
//!
//! An army is one side's starting material: exactly one king plus knights,
//! bishops, rooks, queens and pawns worth exactly the configured budget
//! (39 points by default) with at most eight pawns. Everything has to fit on
//! the side's two home ranks, so at most 16 pieces including the king.
//!
//! Generation follows a fill-and-retry scheme: the four piece types are
//! visited in random order, each taking a random share of the remaining
//! budget, and pawns make up the rest. Draws that need too many pawns or too
//! many squares are thrown away. If a long run of draws fails, the generator
//! picks uniformly among all valid compositions instead, so it always
//! terminates with a valid army.

use std::cmp::Reverse;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::VariantConfig;
use crate::error::{ArmyError, ConfigError};
use crate::special::KING_HOME_FILE;
use crate::types::*;

/// Squares available on the two home ranks.
pub const HOME_SQUARES: u32 = 16;

/// Random draws attempted before falling back to enumeration.
const MAX_DRAWS: usize = 10_000;

const MAJOR_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Piece counts for one army, king excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composition {
    pub queens: u32,
    pub rooks: u32,
    pub bishops: u32,
    pub knights: u32,
    pub pawns: u32,
}

impl Composition {
    /// The classic chess set: Q, 2R, 2B, 2N, 8P = 39 points.
    pub const CLASSIC: Composition = Composition {
        queens: 1,
        rooks: 2,
        bishops: 2,
        knights: 2,
        pawns: 8,
    };

    pub fn count(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Queen => self.queens,
            PieceKind::Rook => self.rooks,
            PieceKind::Bishop => self.bishops,
            PieceKind::Knight => self.knights,
            PieceKind::Pawn => self.pawns,
            PieceKind::King => 0,
        }
    }

    fn add(&mut self, kind: PieceKind, n: u32) {
        match kind {
            PieceKind::Queen => self.queens += n,
            PieceKind::Rook => self.rooks += n,
            PieceKind::Bishop => self.bishops += n,
            PieceKind::Knight => self.knights += n,
            PieceKind::Pawn => self.pawns += n,
            PieceKind::King => {}
        }
    }

    pub fn points(&self) -> u32 {
        MAJOR_PIECES
            .iter()
            .chain(std::iter::once(&PieceKind::Pawn))
            .map(|&k| self.count(k) * k.value())
            .sum()
    }

    /// Non-king pieces.
    pub fn piece_count(&self) -> u32 {
        self.queens + self.rooks + self.bishops + self.knights + self.pawns
    }

    /// Exact budget, pawn cap, and room on the home ranks for everything plus the king.
    pub fn fits(&self, config: &VariantConfig) -> bool {
        let pawn_cap = u32::from(config.max_pawns).min(8);
        self.points() == config.target_points
            && self.pawns <= pawn_cap
            && self.piece_count() < HOME_SQUARES
    }

    /// Every composition satisfying `config`.
    pub fn enumerate(config: &VariantConfig) -> Vec<Composition> {
        // No count can exceed the free home squares.
        let room = HOME_SQUARES - 1;
        let t = config.target_points;
        let mut out = Vec::new();
        for queens in 0..=(t / 9).min(room) {
            let after_q = t - queens * 9;
            for rooks in 0..=(after_q / 5).min(room - queens) {
                let after_r = after_q - rooks * 5;
                for bishops in 0..=(after_r / 3).min(room - queens - rooks) {
                    let after_b = after_r - bishops * 3;
                    for knights in 0..=(after_b / 3).min(room - queens - rooks - bishops) {
                        let comp = Composition {
                            queens,
                            rooks,
                            bishops,
                            knights,
                            pawns: after_b - knights * 3,
                        };
                        if comp.fits(config) {
                            out.push(comp);
                        }
                    }
                }
            }
        }
        out
    }
}

/// One side's pieces and their starting squares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Army {
    color: Color,
    pieces: Vec<(PieceKind, Square)>,
}

impl Army {
    /// Validate a caller-supplied placement against `config`.
    pub fn new(
        color: Color,
        pieces: Vec<(PieceKind, Square)>,
        config: &VariantConfig,
    ) -> Result<Army, ArmyError> {
        let army = Army { color, pieces };
        army.validate(config)?;
        Ok(army)
    }

    /// The classic chess setup for `color`.
    pub fn classic(color: Color) -> Army {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut pieces = Vec::with_capacity(16);
        for (f, &kind) in back.iter().enumerate() {
            pieces.push((kind, Square::at(f as i8, color.back_rank())));
        }
        for f in 0..8 {
            pieces.push((PieceKind::Pawn, Square::at(f, color.pawn_rank())));
        }
        Army { color, pieces }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pieces(&self) -> &[(PieceKind, Square)] {
        &self.pieces
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Point total, king excluded.
    pub fn points(&self) -> u32 {
        self.pieces.iter().map(|(k, _)| k.value()).sum()
    }

    pub fn composition(&self) -> Composition {
        let mut comp = Composition::default();
        for (kind, _) in &self.pieces {
            comp.add(*kind, 1);
        }
        comp
    }

    pub fn validate(&self, config: &VariantConfig) -> Result<(), ArmyError> {
        let kings = self.count(PieceKind::King);
        if kings != 1 {
            return Err(ArmyError::KingCount(kings));
        }
        let points = self.points();
        if points != config.target_points {
            return Err(ArmyError::PointTotal {
                expected: config.target_points,
                actual: points,
            });
        }
        let pawns = self.count(PieceKind::Pawn);
        if pawns > usize::from(config.max_pawns) {
            return Err(ArmyError::TooManyPawns {
                max: config.max_pawns,
                actual: pawns,
            });
        }

        let mut seen = [false; 64];
        for &(kind, sq) in &self.pieces {
            let rank = sq.rank();
            if rank != self.color.back_rank() && rank != self.color.pawn_rank() {
                return Err(ArmyError::OutsideHomeRanks {
                    color: self.color,
                    square: sq,
                });
            }
            if kind == PieceKind::Pawn && rank != self.color.pawn_rank() {
                return Err(ArmyError::PawnOffPawnRank(sq));
            }
            if std::mem::replace(&mut seen[sq.index()], true) {
                return Err(ArmyError::DuplicateSquare(sq));
            }
        }
        Ok(())
    }
}

/// Back-rank files each piece type tries first, in order.
fn preferred_files(kind: PieceKind) -> &'static [i8] {
    match kind {
        PieceKind::Rook => &[7, 0],
        PieceKind::Queen => &[3],
        PieceKind::Bishop => &[2, 5],
        PieceKind::Knight => &[1, 6],
        PieceKind::Pawn | PieceKind::King => &[],
    }
}

/// Produces random armies under a [`VariantConfig`].
pub struct ArmyGenerator<R = StdRng> {
    rng: R,
    config: VariantConfig,
    /// Every composition the rules allow; never empty.
    compositions: Vec<Composition>,
}

impl ArmyGenerator<StdRng> {
    pub fn from_entropy(config: &VariantConfig) -> Result<Self, ConfigError> {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    /// Reproducible generation: the same seed and config give the same armies.
    pub fn seeded(seed: u64, config: &VariantConfig) -> Result<Self, ConfigError> {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    /// Generator under the default rules, seeded if `seed` is given.
    ///
    /// The default rules always admit the classic set, so this cannot fail.
    pub fn standard(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let config = VariantConfig::default();
        let mut compositions = Composition::enumerate(&config);
        if compositions.is_empty() {
            compositions.push(Composition::CLASSIC);
        }
        Self {
            rng,
            config,
            compositions,
        }
    }
}

impl<R: Rng> ArmyGenerator<R> {
    /// Fails when `config` is invalid or no army can satisfy it.
    pub fn with_rng(rng: R, config: &VariantConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let compositions = Composition::enumerate(config);
        if compositions.is_empty() {
            return Err(ArmyError::Infeasible {
                target: config.target_points,
                max_pawns: config.max_pawns,
            }
            .into());
        }
        Ok(Self {
            rng,
            config: config.clone(),
            compositions,
        })
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// A random army for `color`, placed on its home ranks.
    pub fn generate(&mut self, color: Color) -> Army {
        let comp = self.draw_composition();
        self.place(color, &comp)
    }

    /// Draw piece counts whose values sum exactly to the target.
    pub fn draw_composition(&mut self) -> Composition {
        let mut order = MAJOR_PIECES;
        for attempt in 0..MAX_DRAWS {
            order.shuffle(&mut self.rng);

            let mut comp = Composition::default();
            let mut remaining = self.config.target_points;
            for &kind in &order {
                let max_possible = remaining / kind.value();
                let n = self.rng.gen_range(0..=max_possible);
                comp.add(kind, n);
                remaining -= n * kind.value();
            }
            comp.pawns = remaining;

            if comp.fits(&self.config) {
                return comp;
            }
            trace!(attempt, pawns = comp.pawns, pieces = comp.piece_count(), "army draw rejected");
        }

        debug!(draws = MAX_DRAWS, "falling back to exhaustive army selection");
        let pick = self.rng.gen_range(0..self.compositions.len());
        self.compositions[pick]
    }

    /// Lay out `comp` on `color`'s home ranks.
    ///
    /// King on the e-file, rooks in the h then a corners, queen on d, bishops
    /// on c/f, knights on b/g. Whatever is left goes to the free back-rank
    /// squares, heaviest first, then to pawn-rank squares no pawn took.
    /// A pawn stands in front of the king whenever there is one; the other
    /// pawn files are random.
    pub fn place(&mut self, color: Color, comp: &Composition) -> Army {
        let back = color.back_rank();
        let pawn_rank = color.pawn_rank();

        let mut pieces = vec![(PieceKind::King, Square::at(KING_HOME_FILE, back))];
        let mut back_free: Vec<i8> = (0..8).filter(|&f| f != KING_HOME_FILE).collect();
        let mut leftovers = Vec::new();

        for kind in [
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            for _ in 0..comp.count(kind) {
                let home = preferred_files(kind)
                    .iter()
                    .copied()
                    .find(|f| back_free.contains(f));
                match home {
                    Some(file) => {
                        back_free.retain(|&f| f != file);
                        pieces.push((kind, Square::at(file, back)));
                    }
                    None => leftovers.push(kind),
                }
            }
        }

        back_free.shuffle(&mut self.rng);
        // The king's file comes first for pawns and last for spare pieces,
        // so no rook or queen opens the game facing the enemy king.
        let mut files: Vec<i8> = (0..8).filter(|&f| f != KING_HOME_FILE).collect();
        files.shuffle(&mut self.rng);
        if comp.pawns > 0 {
            files.insert(0, KING_HOME_FILE);
        } else {
            files.push(KING_HOME_FILE);
        }
        let (pawn_files, spare_files) = files.split_at((comp.pawns as usize).min(8));

        pieces.extend(
            pawn_files
                .iter()
                .map(|&f| (PieceKind::Pawn, Square::at(f, pawn_rank))),
        );

        leftovers.sort_by_key(|k| Reverse(k.value()));
        let slots = back_free
            .iter()
            .map(|&f| Square::at(f, back))
            .chain(spare_files.iter().map(|&f| Square::at(f, pawn_rank)));
        pieces.extend(leftovers.into_iter().zip(slots));

        Army { color, pieces }
    }
}

#[cfg(test)]
#[path = "army_tests.rs"]
mod army_tests;

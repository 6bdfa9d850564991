//! Variant rules, loadable from TOML.
//!
//! ```toml
//! target_points = 39
//! max_pawns = 8
//! inactivity_halfmoves = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::army::Composition;
use crate::error::{ArmyError, ConfigError};

/// Standard Chess 39 budget per side, king excluded.
pub const DEFAULT_TARGET_POINTS: u32 = 39;
pub const DEFAULT_MAX_PAWNS: u8 = 8;
/// 50 full moves per side without a pawn move or capture.
pub const DEFAULT_INACTIVITY_HALFMOVES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Point sum every generated army must hit exactly
    pub target_points: u32,
    /// Pawn cap per army
    pub max_pawns: u8,
    /// Halfmove clock value at which the game is drawn
    pub inactivity_halfmoves: u32,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            target_points: DEFAULT_TARGET_POINTS,
            max_pawns: DEFAULT_MAX_PAWNS,
            inactivity_halfmoves: DEFAULT_INACTIVITY_HALFMOVES,
        }
    }
}

impl VariantConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: VariantConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject rules no army can satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inactivity_halfmoves == 0 {
            return Err(ConfigError::ZeroInactivityLimit);
        }
        if Composition::enumerate(self).is_empty() {
            return Err(ArmyError::Infeasible {
                target: self.target_points,
                max_pawns: self.max_pawns,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

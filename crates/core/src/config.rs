//! Engine configuration
//!
//! Every field has a default that reproduces the standard rules, so a
//! partial JSON document only needs to name what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::RotationSystem;
use crate::types::{
    BASE_DROP_MS, ENERGY_PER_SPECIAL, LINES_PER_LEVEL, LOCK_DELAY_MS, MIN_DROP_MS,
    SPECIAL_CAP, SPEED_FACTOR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// What a soft drop does when the cell below is already blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoftDropMode {
    /// Behave like gravity grounding: the lock delay keeps running
    #[default]
    GroundCheck,
    /// Lock the piece immediately
    Lock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bag seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub lock_delay_ms: u32,
    pub base_drop_ms: u32,
    pub min_drop_ms: u32,
    /// Gravity interval multiplier per level, in (0, 1]
    pub speed_factor: f64,
    pub lines_per_level: u32,
    pub special_cap: u8,
    pub energy_per_special: u32,
    pub hold_enabled: bool,
    pub rotation_system: RotationSystem,
    pub spin_bonus_enabled: bool,
    pub soft_drop_mode: SoftDropMode,
    /// Cap on grounded move/rotate lock resets per piece; `None` is uncapped
    pub max_lock_resets: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            lock_delay_ms: LOCK_DELAY_MS,
            base_drop_ms: BASE_DROP_MS,
            min_drop_ms: MIN_DROP_MS,
            speed_factor: SPEED_FACTOR,
            lines_per_level: LINES_PER_LEVEL,
            special_cap: SPECIAL_CAP,
            energy_per_special: ENERGY_PER_SPECIAL,
            hold_enabled: true,
            rotation_system: RotationSystem::Srs,
            spin_bonus_enabled: true,
            soft_drop_mode: SoftDropMode::GroundCheck,
            max_lock_resets: None,
        }
    }
}

impl EngineConfig {
    /// Default rules with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed_factor > 0.0 && self.speed_factor <= 1.0) {
            return Err(invalid("speed_factor", "must be in (0, 1]"));
        }
        if self.min_drop_ms == 0 {
            return Err(invalid("min_drop_ms", "must be at least 1"));
        }
        if self.base_drop_ms < self.min_drop_ms {
            return Err(invalid(
                "base_drop_ms",
                format!("must be >= min_drop_ms ({})", self.min_drop_ms),
            ));
        }
        if self.lock_delay_ms == 0 {
            return Err(invalid("lock_delay_ms", "must be at least 1"));
        }
        if self.lines_per_level == 0 {
            return Err(invalid("lines_per_level", "must be at least 1"));
        }
        if self.special_cap == 0 {
            return Err(invalid("special_cap", "must be at least 1"));
        }
        if self.energy_per_special == 0 {
            return Err(invalid("energy_per_special", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

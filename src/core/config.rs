//! Squad behavior configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose.
//! Values default to the ones the tactical states were balanced around;
//! hosts may override them from a TOML table.

use serde::Deserialize;

use crate::core::error::{Result, TacticsError};

/// Squared world units of leader drift tolerated per evaluation interval
///
/// Multiplied by `attack_force_interval` to derive the stuck-distance
/// threshold: a leader that has moved less than this (squared) since the
/// last snapshot is treated as making no progress.
pub const STUCK_DIST_PER_INTERVAL: i64 = 142_179;

/// Configuration for squad tactical behavior
///
/// Radii are in map cells, intervals and tick counts in game ticks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SquadConfig {
    /// Radius around the squad target scanned for enemies while idle
    pub idle_scan_radius: i32,

    /// Radius around the leader scanned while advancing; contact inside it
    /// switches the squad to its engagement state
    pub attack_scan_radius: i32,

    /// Scan radius for protection/escort squads
    pub protection_scan_radius: i32,

    /// Ticks between bot squad evaluations; also scales the stuck-distance
    /// threshold (slower evaluation tolerates more drift per check)
    pub attack_force_interval: u64,

    /// Consecutive no-progress checks before stuck recovery starts
    pub max_attempts_to_advance: i32,

    /// Ticks spent in the "make way" phase of stuck recovery
    pub make_way_ticks: i32,

    /// Ticks a guerrilla squad withdraws before re-engaging
    pub run_cooldown_ticks: i32,

    /// Ticks a protection squad tolerates losing sight of its target
    /// before fleeing
    pub backoff_ticks: i32,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            idle_scan_radius: 10,
            attack_scan_radius: 12,
            protection_scan_radius: 8,
            attack_force_interval: 75,
            max_attempts_to_advance: 6,
            make_way_ticks: 2,
            run_cooldown_ticks: 2,
            backoff_ticks: 4,
        }
    }
}

impl SquadConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a TOML document, then validate it
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SquadConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Squared distance threshold under which a unit counts as stuck
    pub fn stuck_dist_threshold(&self) -> i64 {
        STUCK_DIST_PER_INTERVAL * self.attack_force_interval as i64
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.idle_scan_radius <= 0
            || self.attack_scan_radius <= 0
            || self.protection_scan_radius <= 0
        {
            return Err(TacticsError::InvalidConfig(
                "scan radii must be positive".into(),
            ));
        }

        if self.attack_force_interval == 0 {
            return Err(TacticsError::InvalidConfig(
                "attack_force_interval must be at least 1 tick".into(),
            ));
        }

        if self.max_attempts_to_advance <= 0 || self.make_way_ticks <= 0 {
            return Err(TacticsError::InvalidConfig(
                "stuck recovery budgets must be positive".into(),
            ));
        }

        if self.run_cooldown_ticks < 0 || self.backoff_ticks < 0 {
            return Err(TacticsError::InvalidConfig(
                "cooldown tick counts must not be negative".into(),
            ));
        }

        Ok(())
    }
}

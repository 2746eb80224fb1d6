//! Arena configuration
//!
//! Defaults are the live game constants. Deployments may override the
//! scoring knobs from the environment or a JSON document.

use crate::{ArenaError, ArenaResult};
use arena_types::{TierType, BASE_DEFEAT_POINT, BASE_VICTORY_POINT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Main arena configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Rating update rules
    pub scoring: ScoringConfig,
    /// Weekly payout per tier
    pub rewards: RewardSchedule,
}

/// Rating update rules.
///
/// The score floor is not configurable: every update path clamps at
/// `DEFAULT_SCORE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Delta for a win between equal ratings
    pub base_victory_point: i32,
    /// Delta for a loss between equal ratings
    pub base_defeat_point: i32,
    /// Exponent applied to the rating ratio when ratings differ
    pub rating_exponent: Decimal,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_victory_point: BASE_VICTORY_POINT,
            base_defeat_point: BASE_DEFEAT_POINT,
            rating_exponent: dec!(0.75),
        }
    }
}

/// Weekly payout per tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardSchedule {
    pub platinum: Decimal,
    pub gold: Decimal,
    pub silver: Decimal,
    pub bronze: Decimal,
    pub rookie: Decimal,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            platinum: dec!(200),
            gold: dec!(150),
            silver: dec!(100),
            bronze: dec!(80),
            rookie: dec!(70),
        }
    }
}

impl RewardSchedule {
    /// Payout for one tier
    pub fn amount(&self, tier: TierType) -> Decimal {
        match tier {
            TierType::Platinum => self.platinum,
            TierType::Gold => self.gold,
            TierType::Silver => self.silver,
            TierType::Bronze => self.bronze,
            TierType::Rookie => self.rookie,
        }
    }

    /// Full reward table, one entry per tier
    pub fn table(&self) -> BTreeMap<TierType, Decimal> {
        TierType::all()
            .into_iter()
            .map(|tier| (tier, self.amount(tier)))
            .collect()
    }
}

impl ArenaConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = ScoringConfig::default();
        let config = Self {
            scoring: ScoringConfig {
                base_victory_point: env_or("ARENA_BASE_VICTORY_POINT", defaults.base_victory_point),
                base_defeat_point: env_or("ARENA_BASE_DEFEAT_POINT", defaults.base_defeat_point),
                rating_exponent: env_or("ARENA_RATING_EXPONENT", defaults.rating_exponent),
            },
            rewards: RewardSchedule::default(),
        };
        tracing::debug!(scoring = ?config.scoring, "Loaded arena config from environment");
        config
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> ArenaResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ArenaError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable for rating updates and payouts
    pub fn validate(&self) -> ArenaResult<()> {
        if self.scoring.rating_exponent.is_sign_negative() {
            return Err(ArenaError::invalid_config(
                "scoring.rating_exponent",
                "must not be negative",
            ));
        }
        for tier in TierType::all() {
            if self.rewards.amount(tier).is_sign_negative() {
                return Err(ArenaError::invalid_config(
                    format!("rewards.{}", tier.name().to_lowercase()),
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, raw = %raw, ?default, "Ignoring unparsable arena setting");
                default
            }
        },
        Err(_) => default,
    }
}

//! Rating updates and reward settlement
//!
//! ## Scoring
//!
//! ```text
//! equal ratings:  delta = base
//! win:            delta = trunc(base_victory * (enemy / self)^0.75)
//! lose:           delta = trunc(base_defeat  * (self / enemy)^0.75)
//! score           = max(1000, score + delta)
//! ```
//!
//! The power is rounded to `FACTOR_SCALE` places before scaling, so exact
//! powers such as `16^0.75 = 8` are not truncated one point short.
//!
//! Beating a stronger opponent pays more; losing to a weaker one costs more.

use crate::{
    ArenaConfig, ArenaError, ArenaResult, AvatarView, MatchRecord, ScoringConfig, WeeklyArenaState,
};
use arena_types::{Address, MatchOutcome, TierType};
use rust_decimal::prelude::{MathematicalOps, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places kept of the rating factor
pub const FACTOR_SCALE: u32 = 16;

/// Score change for one decisive battle. Draws move nothing.
pub fn score_delta(
    rules: &ScoringConfig,
    outcome: MatchOutcome,
    rating: i32,
    enemy_rating: i32,
) -> ArenaResult<i32> {
    let base = match outcome {
        MatchOutcome::Win => rules.base_victory_point,
        MatchOutcome::Lose => rules.base_defeat_point,
        MatchOutcome::Draw => return Ok(0),
    };
    if rating == enemy_rating {
        return Ok(base);
    }

    let invalid = || ArenaError::InvalidRating {
        rating,
        enemy_rating,
    };
    if rating <= 0 || enemy_rating <= 0 {
        return Err(invalid());
    }

    let (numerator, denominator) = match outcome {
        MatchOutcome::Win => (enemy_rating, rating),
        _ => (rating, enemy_rating),
    };
    let ratio = Decimal::from(numerator)
        .checked_div(Decimal::from(denominator))
        .ok_or_else(invalid)?;
    let factor = ratio
        .checked_powd(rules.rating_exponent)
        .ok_or_else(invalid)?
        .round_dp(FACTOR_SCALE);
    factor
        .checked_mul(Decimal::from(base))
        .and_then(|scaled| scaled.trunc().to_i32())
        .ok_or_else(invalid)
}

/// Outcome of resolving one battle against the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettlement {
    pub challenger: Address,
    pub enemy: Address,
    pub outcome: MatchOutcome,
    pub score_before: i32,
    pub score_after: i32,
    pub record: MatchRecord,
    pub daily_challenge_count: i32,
}

impl MatchSettlement {
    /// Score change actually applied, after the floor
    pub fn applied_delta(&self) -> i32 {
        self.score_after - self.score_before
    }
}

/// A paid-out weekly reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub address: Address,
    pub tier: TierType,
    pub amount: Decimal,
}

/// Applies battle results and settles weekly rewards on a snapshot.
///
/// The engine holds no state besides its configuration; callers serialize
/// access to a snapshot through `&mut`.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: ArenaConfig,
}

impl RankingEngine {
    /// Create an engine, rejecting unusable configuration
    pub fn new(config: ArenaConfig) -> ArenaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Apply a battle of `avatar` against `enemy` and write the challenger back.
    /// The enemy's entry is read, never modified.
    pub fn resolve_match(
        &self,
        state: &mut WeeklyArenaState,
        avatar: &impl AvatarView,
        enemy: Address,
        outcome: MatchOutcome,
    ) -> ArenaResult<MatchSettlement> {
        let challenger = avatar.address();
        let mut info = state
            .get(&challenger)
            .cloned()
            .ok_or(ArenaError::ParticipantNotFound {
                address: challenger,
            })?;
        let enemy_info = state
            .get(&enemy)
            .ok_or(ArenaError::ParticipantNotFound { address: enemy })?;

        let score_before = info.score();
        info.apply_match_result_with(&self.config.scoring, avatar, enemy_info, outcome)?;

        let settlement = MatchSettlement {
            challenger,
            enemy,
            outcome,
            score_before,
            score_after: info.score(),
            record: *info.record(),
            daily_challenge_count: info.daily_challenge_count(),
        };
        state.upsert(info);

        tracing::debug!(
            challenger = %challenger,
            enemy = %enemy,
            %outcome,
            score_before,
            score_after = settlement.score_after,
            "Resolved arena match"
        );
        Ok(settlement)
    }

    /// As `resolve_match`, taking the raw outcome code of a battle log
    pub fn resolve_match_code(
        &self,
        state: &mut WeeklyArenaState,
        avatar: &impl AvatarView,
        enemy: Address,
        outcome_code: u8,
    ) -> ArenaResult<MatchSettlement> {
        let outcome = MatchOutcome::try_from(outcome_code)?;
        self.resolve_match(state, avatar, enemy, outcome)
    }

    /// Close the week: store the configured reward table
    pub fn finalize(&self, state: &mut WeeklyArenaState) {
        state.compute_reward_table_with(&self.config.rewards);
    }

    /// Pay out the weekly reward for one participant, at most once
    pub fn claim_reward(
        &self,
        state: &mut WeeklyArenaState,
        address: Address,
    ) -> ArenaResult<RewardGrant> {
        let info = state
            .get(&address)
            .ok_or(ArenaError::ParticipantNotFound { address })?;
        if !info.active() {
            return Err(ArenaError::ParticipantInactive { address });
        }
        if info.received_reward() {
            return Err(ArenaError::RewardAlreadyReceived { address });
        }
        let tier = state.tier_of(info);
        let amount = state.reward_for(tier)?;

        if let Some(info) = state.get_mut(&address) {
            info.mark_reward_received();
        }
        tracing::info!(address = %address, %tier, %amount, "Weekly arena reward claimed");
        Ok(RewardGrant {
            address,
            tier,
            amount,
        })
    }

    /// Open the next week's snapshot, carrying over `previous`'s active participants
    pub fn begin_next_week(
        &self,
        previous: &WeeklyArenaState,
        next_address: Address,
        checkpoint: i64,
    ) -> WeeklyArenaState {
        let mut next = WeeklyArenaState::new(next_address);
        next.roll_over(previous, checkpoint);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rules() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_equal_ratings_use_base() {
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 1500, 1500).unwrap(), 20);
        assert_eq!(score_delta(&rules(), MatchOutcome::Lose, 1500, 1500).unwrap(), -15);
        assert_eq!(score_delta(&rules(), MatchOutcome::Draw, 1500, 900).unwrap(), 0);
    }

    #[test]
    fn test_win_scaling() {
        // 2^0.75 = 1.6818 -> 33.6
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 1000, 2000).unwrap(), 33);
        // 0.5^0.75 = 0.5946 -> 11.9
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 2000, 1000).unwrap(), 11);
    }

    #[test]
    fn test_lose_scaling_truncates_toward_zero() {
        // -15 * 1.6818 = -25.2
        assert_eq!(score_delta(&rules(), MatchOutcome::Lose, 2000, 1000).unwrap(), -25);
        // -15 * 0.5946 = -8.9
        assert_eq!(score_delta(&rules(), MatchOutcome::Lose, 1000, 2000).unwrap(), -8);
    }

    #[test]
    fn test_non_positive_rating_rejected() {
        assert_eq!(
            score_delta(&rules(), MatchOutcome::Win, 0, 1000),
            Err(ArenaError::InvalidRating {
                rating: 0,
                enemy_rating: 1000
            })
        );
        assert!(score_delta(&rules(), MatchOutcome::Lose, 1000, -5).is_err());
        // equal ratings never divide
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 0, 0).unwrap(), 20);
    }

    #[test]
    fn test_exact_powers_not_truncated_short() {
        // 16^0.75 = 8, 81^0.75 = 27
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 1000, 16000).unwrap(), 160);
        assert_eq!(score_delta(&rules(), MatchOutcome::Lose, 16000, 1000).unwrap(), -120);
        assert_eq!(score_delta(&rules(), MatchOutcome::Win, 1000, 81000).unwrap(), 540);
    }

    #[test]
    fn test_custom_exponent() {
        let linear = ScoringConfig {
            rating_exponent: dec!(1),
            ..ScoringConfig::default()
        };
        assert_eq!(score_delta(&linear, MatchOutcome::Win, 1000, 2000).unwrap(), 40);
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        let mut config = ArenaConfig::default();
        config.scoring.rating_exponent = dec!(-1);
        assert!(RankingEngine::new(config).is_err());
    }

    #[test]
    fn test_configured_engine_keeps_score_floor() {
        use crate::{ArenaInfo, AvatarSnapshot};

        let config = ArenaConfig::from_json_str(r#"{"scoring": {"base_defeat_point": -40}}"#)
            .unwrap();
        let engine = RankingEngine::new(config).unwrap();
        let me = AvatarSnapshot::new(Address::new([1; 20]), Address::ZERO, "me", 1);
        let rival = AvatarSnapshot::new(Address::new([2; 20]), Address::ZERO, "rival", 1);
        let mut state = WeeklyArenaState::new(Address::ZERO);
        state.upsert(ArenaInfo::new(&me, true));
        state.upsert(ArenaInfo::new(&rival, true));

        let settlement = engine
            .resolve_match(&mut state, &me, rival.address, MatchOutcome::Lose)
            .unwrap();
        assert_eq!(settlement.score_after, 1000);
        assert_eq!(settlement.applied_delta(), 0);
    }
}

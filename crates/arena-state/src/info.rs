//! One participant's standing for the week

use crate::ranking::score_delta;
use crate::{ArenaResult, AvatarView, MatchRecord, ScoringConfig};
use arena_codec::{CodecResult, Decode, Dictionary, Encode, Value};
use arena_types::{
    Address, MatchOutcome, TierType, DAILY_CHALLENGE_COUNT, DEFAULT_COMBAT_POINT, DEFAULT_SCORE,
};
use serde::Serialize;

/// Arena entry of a single avatar.
///
/// Identity fields are fixed at creation. Standing changes only through the
/// methods below, which keep `score` at or above the floor.
///
/// Serializes for JSON views only; rebuild entries through `Decode`.
///
/// ```compile_fail
/// let _: arena_state::ArenaInfo = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArenaInfo {
    avatar_address: Address,
    agent_address: Address,
    avatar_name: String,
    armor_id: i32,
    level: i32,
    combat_point: i32,
    score: i32,
    daily_challenge_count: i32,
    active: bool,
    receive: bool,
    record: MatchRecord,
}

impl ArenaInfo {
    /// Enter the arena from an avatar snapshot
    pub fn new(avatar: &impl AvatarView, active: bool) -> Self {
        Self {
            avatar_address: avatar.address(),
            agent_address: avatar.agent_address(),
            avatar_name: avatar.name_with_hash(),
            armor_id: avatar.armor_id(),
            level: avatar.level(),
            combat_point: DEFAULT_COMBAT_POINT,
            score: DEFAULT_SCORE,
            daily_challenge_count: DAILY_CHALLENGE_COUNT,
            active,
            receive: false,
            record: MatchRecord::new(),
        }
    }

    /// Fresh standing for a new week, identity kept
    pub fn carry_over(previous: &ArenaInfo) -> Self {
        Self {
            avatar_address: previous.avatar_address,
            agent_address: previous.agent_address,
            avatar_name: previous.avatar_name.clone(),
            armor_id: previous.armor_id,
            level: previous.level,
            combat_point: DEFAULT_COMBAT_POINT,
            score: DEFAULT_SCORE,
            daily_challenge_count: DAILY_CHALLENGE_COUNT,
            active: false,
            receive: false,
            record: MatchRecord::new(),
        }
    }

    pub fn avatar_address(&self) -> Address {
        self.avatar_address
    }

    pub fn agent_address(&self) -> Address {
        self.agent_address
    }

    pub fn avatar_name(&self) -> &str {
        &self.avatar_name
    }

    pub fn armor_id(&self) -> i32 {
        self.armor_id
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn combat_point(&self) -> i32 {
        self.combat_point
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn daily_challenge_count(&self) -> i32 {
        self.daily_challenge_count
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether this week's reward was already paid out
    pub fn received_reward(&self) -> bool {
        self.receive
    }

    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    /// Adjust score outside a match. Consumes one challenge.
    pub fn apply_simple_delta(&mut self, delta: i32) {
        self.apply_delta(delta);
    }

    /// Apply a resolved battle against `enemy` with the default scoring rules
    pub fn apply_match_result(
        &mut self,
        avatar: &impl AvatarView,
        enemy: &ArenaInfo,
        outcome: MatchOutcome,
    ) -> ArenaResult<()> {
        self.apply_match_result_with(&ScoringConfig::default(), avatar, enemy, outcome)
    }

    /// Apply a resolved battle against `enemy`.
    ///
    /// A draw only counts in the record. A win or loss moves the score by the
    /// rating-scaled delta, consumes one challenge and refreshes armor and
    /// level from `avatar`. On error the entry is left untouched.
    pub fn apply_match_result_with(
        &mut self,
        rules: &ScoringConfig,
        avatar: &impl AvatarView,
        enemy: &ArenaInfo,
        outcome: MatchOutcome,
    ) -> ArenaResult<()> {
        if outcome == MatchOutcome::Draw {
            self.record.record(outcome);
            return Ok(());
        }

        let delta = score_delta(rules, outcome, self.score, enemy.score)?;
        self.record.record(outcome);
        self.apply_delta(delta);
        self.armor_id = avatar.armor_id();
        self.level = avatar.level();
        Ok(())
    }

    /// Take the currently equipped armor from `avatar`
    pub fn refresh_armor(&mut self, avatar: &impl AvatarView) {
        self.armor_id = avatar.armor_id();
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Restore the daily challenge quota
    pub fn reset_challenge_count(&mut self) {
        self.daily_challenge_count = DAILY_CHALLENGE_COUNT;
    }

    pub fn mark_reward_received(&mut self) {
        self.receive = true;
    }

    /// Tier from this entry's own win count
    pub fn tier(&self) -> TierType {
        TierType::from_wins(self.record.win)
    }

    // No floor on the challenge count: it may go negative.
    fn apply_delta(&mut self, delta: i32) {
        self.adjust_score(delta);
        self.daily_challenge_count = self.daily_challenge_count.saturating_sub(1);
    }

    /// Score never drops below `DEFAULT_SCORE`
    pub(crate) fn adjust_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta).max(DEFAULT_SCORE);
    }

    pub(crate) fn consume_challenges(&mut self, count: i32) {
        self.daily_challenge_count = self.daily_challenge_count.saturating_sub(count);
    }

    pub(crate) fn record_mut(&mut self) -> &mut MatchRecord {
        &mut self.record
    }
}

impl Encode for ArenaInfo {
    fn to_value(&self) -> Value {
        let dict = Dictionary::new()
            .with("avatarAddress", self.avatar_address.to_value())
            .with("agentAddress", self.agent_address.to_value())
            .with("armorId", self.armor_id)
            .with("level", self.level)
            .with("avatarName", self.avatar_name.clone())
            .with("combatPoint", self.combat_point)
            .with("score", self.score)
            .with("dailyChallengeCount", self.daily_challenge_count)
            .with("active", self.active)
            .with("arenaRecord", self.record.to_value());
        // Written only once set so unclaimed entries keep their legacy bytes
        if self.receive {
            dict.with("receive", true).into()
        } else {
            dict.into()
        }
    }
}

impl Decode for ArenaInfo {
    fn from_value(value: &Value) -> CodecResult<Self> {
        let dict = value.as_dictionary()?;
        Ok(Self {
            avatar_address: dict.get_as("avatarAddress")?,
            agent_address: dict.get_as("agentAddress")?,
            armor_id: dict.get_as("armorId")?,
            level: dict.get_as("level")?,
            avatar_name: dict.get_as("avatarName")?,
            combat_point: dict.get_as("combatPoint")?,
            score: dict.get_as("score")?,
            daily_challenge_count: dict.get_as("dailyChallengeCount")?,
            active: dict.get_as("active")?,
            receive: dict.get_optional("receive")?.unwrap_or(false),
            record: dict.get_optional("arenaRecord")?.unwrap_or_default(),
        })
    }
}

//! Weekly arena snapshot
//!
//! An address-keyed collection of `ArenaInfo` plus the reward table, the
//! block index of the last challenge reset, and the gold pool.
//!
//! ## Lifecycle
//!
//! ```text
//! Created → Active → Finalized (reward table) → RolledOver (next week)
//! ```
//!
//! Decoding does not enforce this order; a decoded snapshot may carry a
//! reward table and still receive match results.

use crate::{ArenaError, ArenaInfo, ArenaResult, AvatarView, RewardSchedule};
use arena_codec::{
    digest_hex, from_bytes, to_bytes, CodecError, Decode, Dictionary, Encode, Key, Value,
};
use arena_types::{Address, TierType, DEFAULT_GOLD_POOL};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Weekly arena state stored at one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyArenaState {
    address: Address,
    gold: Decimal,
    reset_index: i64,
    map: BTreeMap<Address, ArenaInfo>,
    reward_map: BTreeMap<TierType, Decimal>,
}

impl WeeklyArenaState {
    /// Empty snapshot with the starting gold pool
    pub fn new(address: Address) -> Self {
        Self {
            address,
            gold: Decimal::from(DEFAULT_GOLD_POOL),
            reset_index: 0,
            map: BTreeMap::new(),
            reward_map: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn gold(&self) -> Decimal {
        self.gold
    }

    /// Block index of the last challenge-count reset
    pub fn reset_index(&self) -> i64 {
        self.reset_index
    }

    // ------------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------------

    /// Insert or replace an entry under its own address
    pub fn upsert(&mut self, info: ArenaInfo) -> Option<ArenaInfo> {
        self.map.insert(info.avatar_address(), info)
    }

    /// Register `avatar` with a fresh, inactive entry
    pub fn set(&mut self, avatar: &impl AvatarView) -> Option<ArenaInfo> {
        self.upsert(ArenaInfo::new(avatar, false))
    }

    pub fn get(&self, address: &Address) -> Option<&ArenaInfo> {
        self.map.get(address)
    }

    pub fn get_mut(&mut self, address: &Address) -> Option<&mut ArenaInfo> {
        self.map.get_mut(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.map.contains_key(address)
    }

    pub fn remove(&mut self, address: &Address) -> Option<ArenaInfo> {
        self.map.remove(address)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Address, ArenaInfo> {
        self.map.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Address, ArenaInfo> {
        self.map.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, Address, ArenaInfo> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Restore every entry's daily challenges and record the block index
    pub fn reset_count(&mut self, block_index: i64) {
        for info in self.map.values_mut() {
            info.reset_challenge_count();
        }
        self.reset_index = block_index;
        tracing::info!(
            address = %self.address,
            block_index,
            entries = self.map.len(),
            "Reset weekly arena challenge counts"
        );
    }

    /// Carry `previous`'s active entries into this snapshot with fresh standings.
    /// Inactive entries are dropped.
    pub fn roll_over(&mut self, previous: &WeeklyArenaState, block_index: i64) {
        let mut carried = 0usize;
        for (address, info) in previous.iter().filter(|(_, info)| info.active()) {
            self.map.insert(*address, ArenaInfo::carry_over(info));
            carried += 1;
        }
        self.reset_index = block_index;
        tracing::info!(
            from = %previous.address,
            to = %self.address,
            carried,
            dropped = previous.len() - carried,
            block_index,
            "Rolled over weekly arena"
        );
    }

    // ------------------------------------------------------------------------
    // Rewards
    // ------------------------------------------------------------------------

    /// Close the week with the standard payout table
    pub fn end(&mut self) {
        self.compute_reward_table();
    }

    /// Replace the reward table with the standard payouts
    pub fn compute_reward_table(&mut self) {
        self.compute_reward_table_with(&RewardSchedule::default());
    }

    /// Replace the reward table with `schedule`. Never merges.
    pub fn compute_reward_table_with(&mut self, schedule: &RewardSchedule) {
        self.reward_map = schedule.table();
        tracing::debug!(address = %self.address, "Stored weekly arena reward table");
    }

    pub fn reward_table(&self) -> &BTreeMap<TierType, Decimal> {
        &self.reward_map
    }

    pub fn reward_for(&self, tier: TierType) -> ArenaResult<Decimal> {
        self.reward_map
            .get(&tier)
            .copied()
            .ok_or(ArenaError::MissingTier { tier })
    }

    /// Tier of `info` within this week.
    ///
    /// Only the entry's own win count decides the tier; the rest of the
    /// snapshot is not consulted.
    pub fn tier_of(&self, info: &ArenaInfo) -> TierType {
        info.tier()
    }

    // ------------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------------

    /// Rebuild a snapshot from its canonical value
    pub fn from_value(value: &Value) -> ArenaResult<Self> {
        let dict = value.as_dictionary()?;

        let map_dict: Dictionary = dict.get_as("map")?;
        let mut map = BTreeMap::new();
        for (key, entry) in &map_dict {
            let key = match key {
                Key::Binary(bytes) => Address::from_slice(bytes)
                    .map_err(|e| CodecError::from(e).in_field("map"))?,
                Key::Text(_) => {
                    return Err(CodecError::TypeMismatch {
                        expected: "binary",
                        found: "text",
                    }
                    .in_field("map")
                    .into())
                }
            };
            let info = ArenaInfo::from_value(entry).map_err(|e| e.in_field("map"))?;
            if info.avatar_address() != key {
                return Err(ArenaError::EntryKeyMismatch {
                    key,
                    address: info.avatar_address(),
                });
            }
            map.insert(key, info);
        }

        let mut reward_map = BTreeMap::new();
        if let Some(rewards) = dict.get_optional::<Dictionary>("rewardMap")? {
            for (key, amount) in &rewards {
                let key_value = match key {
                    Key::Binary(bytes) => Value::Binary(bytes.clone()),
                    Key::Text(text) => Value::Text(text.clone()),
                };
                let tier =
                    TierType::from_value(&key_value).map_err(|e| e.in_field("rewardMap"))?;
                let amount =
                    Decimal::from_value(amount).map_err(|e| e.in_field("rewardMap"))?;
                reward_map.insert(tier, amount);
            }
        }

        Ok(Self {
            address: dict.get_as("address")?,
            gold: dict.get_as("gold")?,
            reset_index: dict.get_as("resetIndex")?,
            map,
            reward_map,
        })
    }

    /// Canonical bytes of this snapshot
    pub fn to_bytes(&self) -> Vec<u8> {
        to_bytes(&self.to_value())
    }

    /// Rebuild a snapshot from canonical bytes
    pub fn from_bytes(bytes: &[u8]) -> ArenaResult<Self> {
        Self::from_value(&from_bytes(bytes)?)
    }

    /// SHA-256 of the canonical bytes, hex encoded
    pub fn state_hash(&self) -> String {
        digest_hex(&self.to_value())
    }

    fn base_state(&self) -> Dictionary {
        Dictionary::new().with("address", self.address.to_value())
    }
}

impl Encode for WeeklyArenaState {
    fn to_value(&self) -> Value {
        let map: Dictionary = self
            .map
            .iter()
            .map(|(address, info)| (Key::Binary(address.as_bytes().to_vec()), info.to_value()))
            .collect();
        let rewards: Dictionary = self
            .reward_map
            .iter()
            .map(|(tier, amount)| (Key::Binary(vec![tier.as_byte()]), amount.to_value()))
            .collect();

        Dictionary::new()
            .with("map", map)
            .with("resetIndex", self.reset_index)
            .with("rewardMap", rewards)
            .with("gold", self.gold.to_value())
            .union(self.base_state())
            .into()
    }
}

impl<'a> IntoIterator for &'a WeeklyArenaState {
    type Item = (&'a Address, &'a ArenaInfo);
    type IntoIter = btree_map::Iter<'a, Address, ArenaInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AvatarSnapshot;
    use rust_decimal_macros::dec;

    fn avatar(byte: u8) -> AvatarSnapshot {
        AvatarSnapshot::new(Address::new([byte; 20]), Address::new([0xa0; 20]), "hero", 1)
    }

    fn state_address() -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = 0x10;
        Address::new(bytes)
    }

    #[test]
    fn test_new_snapshot() {
        let state = WeeklyArenaState::new(state_address());
        assert!(state.is_empty());
        assert_eq!(state.gold(), dec!(100));
        assert_eq!(state.reset_index(), 0);
        assert!(state.reward_table().is_empty());
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let mut state = WeeklyArenaState::new(state_address());
        assert!(state.set(&avatar(1)).is_none());

        let mut active = ArenaInfo::new(&avatar(1), false);
        active.activate();
        let previous = state.upsert(active).unwrap();
        assert!(!previous.active());

        assert_eq!(state.len(), 1);
        assert!(state.get(&Address::new([1; 20])).unwrap().active());
    }

    #[test]
    fn test_map_accessors() {
        let mut state = WeeklyArenaState::new(state_address());
        state.set(&avatar(2));
        state.set(&avatar(1));

        assert!(state.contains(&Address::new([1; 20])));
        let keys: Vec<_> = state.keys().copied().collect();
        assert_eq!(keys, vec![Address::new([1; 20]), Address::new([2; 20])]);
        assert_eq!(state.values().count(), 2);
        assert_eq!((&state).into_iter().count(), 2);

        assert!(state.remove(&Address::new([1; 20])).is_some());
        assert!(state.remove(&Address::new([1; 20])).is_none());
        assert_eq!(state.len(), 1);

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_reset_count() {
        let mut state = WeeklyArenaState::new(state_address());
        state.set(&avatar(1));
        state.set(&avatar(2));
        for info in state.map.values_mut() {
            info.apply_simple_delta(10);
            info.apply_simple_delta(10);
        }

        state.reset_count(4242);
        assert_eq!(state.reset_index(), 4242);
        for info in state.values() {
            assert_eq!(info.daily_challenge_count(), 5);
            assert_eq!(info.score(), 1020);
        }
    }

    #[test]
    fn test_roll_over_carries_active_only() {
        let mut previous = WeeklyArenaState::new(state_address());
        let mut active = ArenaInfo::new(&avatar(1).with_armor(10251000), true);
        active.apply_simple_delta(80);
        previous.upsert(active);
        previous.set(&avatar(2));

        let mut next = WeeklyArenaState::new(Address::new([9; 20]));
        next.roll_over(&previous, 100);

        assert_eq!(next.len(), 1);
        assert_eq!(next.reset_index(), 100);
        let carried = next.get(&Address::new([1; 20])).unwrap();
        assert_eq!(carried.score(), 1000);
        assert_eq!(carried.armor_id(), 10251000);
        assert!(!carried.active());
        assert!(!next.contains(&Address::new([2; 20])));
    }

    #[test]
    fn test_reward_lookup_requires_table() {
        let mut state = WeeklyArenaState::new(state_address());
        assert_eq!(
            state.reward_for(TierType::Gold),
            Err(ArenaError::MissingTier {
                tier: TierType::Gold
            })
        );

        state.end();
        assert_eq!(state.reward_for(TierType::Platinum).unwrap(), dec!(200));
        assert_eq!(state.reward_for(TierType::Gold).unwrap(), dec!(150));
        assert_eq!(state.reward_for(TierType::Silver).unwrap(), dec!(100));
        assert_eq!(state.reward_for(TierType::Bronze).unwrap(), dec!(80));
        assert_eq!(state.reward_for(TierType::Rookie).unwrap(), dec!(70));
    }

    #[test]
    fn test_reward_table_replaced_not_merged() {
        let mut state = WeeklyArenaState::new(state_address());
        let custom = RewardSchedule {
            platinum: dec!(1),
            ..RewardSchedule::default()
        };
        state.compute_reward_table_with(&custom);
        assert_eq!(state.reward_for(TierType::Platinum).unwrap(), dec!(1));

        state.compute_reward_table();
        assert_eq!(state.reward_for(TierType::Platinum).unwrap(), dec!(200));
        assert_eq!(state.reward_table().len(), 5);
    }

    #[test]
    fn test_tier_of_uses_own_wins() {
        let mut state = WeeklyArenaState::new(state_address());
        state.set(&avatar(1));
        let info = state.get(&Address::new([1; 20])).unwrap();
        assert_eq!(state.tier_of(info), TierType::Rookie);
    }

    #[test]
    fn test_top_level_keys() {
        let state = WeeklyArenaState::new(state_address());
        let value = state.to_value();
        let dict = value.as_dictionary().unwrap();
        let keys: Vec<_> = dict.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                Key::from("address"),
                Key::from("gold"),
                Key::from("map"),
                Key::from("resetIndex"),
                Key::from("rewardMap"),
            ]
        );
    }

    #[test]
    fn test_decode_rejects_key_mismatch() {
        let mut state = WeeklyArenaState::new(state_address());
        state.set(&avatar(1));
        let entry = state.get(&Address::new([1; 20])).unwrap().to_value();

        let map = Dictionary::new().with(vec![2u8; 20], entry);
        let value: Value = state
            .to_value()
            .as_dictionary()
            .unwrap()
            .clone()
            .with("map", map)
            .into();

        assert_eq!(
            WeeklyArenaState::from_value(&value),
            Err(ArenaError::EntryKeyMismatch {
                key: Address::new([2; 20]),
                address: Address::new([1; 20]),
            })
        );
    }

    #[test]
    fn test_decode_without_reward_map() {
        let mut state = WeeklyArenaState::new(state_address());
        state.end();
        let mut dict = state.to_value().as_dictionary().unwrap().clone();
        dict.remove(&Key::from("rewardMap"));

        let decoded = WeeklyArenaState::from_value(&dict.into()).unwrap();
        assert!(decoded.reward_table().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_canonical_gold() {
        let state = WeeklyArenaState::new(state_address());
        let value: Value = state
            .to_value()
            .as_dictionary()
            .unwrap()
            .clone()
            .with("gold", b"1_00".to_vec())
            .into();

        let err = WeeklyArenaState::from_value(&value).unwrap_err();
        assert_eq!(
            err,
            ArenaError::Decode(CodecError::InvalidDecimal("1_00".to_string()).in_field("gold"))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_tier() {
        let state = WeeklyArenaState::new(state_address());
        let rewards = Dictionary::new().with(vec![7u8], b"10".to_vec());
        let value: Value = state
            .to_value()
            .as_dictionary()
            .unwrap()
            .clone()
            .with("rewardMap", rewards)
            .into();

        let err = WeeklyArenaState::from_value(&value).unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }
}

//! Read-only view of the avatar model
//!
//! The arena never owns avatars. It reads the handful of fields it snapshots
//! into an entry through `AvatarView`.

use arena_types::{Address, DEFAULT_ARMOR_ID};
use serde::{Deserialize, Serialize};

/// What the arena needs to know about an avatar
pub trait AvatarView {
    /// Avatar (participant) address
    fn address(&self) -> Address;

    /// Owning agent address
    fn agent_address(&self) -> Address;

    fn level(&self) -> i32;

    /// Display name with the short address suffix
    fn name_with_hash(&self) -> String;

    /// Equipped armor id, or the default armor when nothing is equipped
    fn armor_id(&self) -> i32;
}

/// Plain avatar snapshot for callers that already hold the fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarSnapshot {
    pub address: Address,
    pub agent_address: Address,
    pub name: String,
    pub level: i32,
    /// `None` when no armor is equipped
    pub equipped_armor: Option<i32>,
}

impl AvatarSnapshot {
    pub fn new(address: Address, agent_address: Address, name: impl Into<String>, level: i32) -> Self {
        Self {
            address,
            agent_address,
            name: name.into(),
            level,
            equipped_armor: None,
        }
    }

    pub fn with_armor(mut self, armor_id: i32) -> Self {
        self.equipped_armor = Some(armor_id);
        self
    }
}

impl AvatarView for AvatarSnapshot {
    fn address(&self) -> Address {
        self.address
    }

    fn agent_address(&self) -> Address {
        self.agent_address
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn name_with_hash(&self) -> String {
        let hex = self.address.to_hex();
        format!("{} #{}", self.name, &hex[..4])
    }

    fn armor_id(&self) -> i32 {
        self.equipped_armor.unwrap_or(DEFAULT_ARMOR_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_armor() {
        let avatar = AvatarSnapshot::new(Address::ZERO, Address::ZERO, "hero", 3);
        assert_eq!(avatar.armor_id(), DEFAULT_ARMOR_ID);
        assert_eq!(avatar.with_armor(10251000).armor_id(), 10251000);
    }

    #[test]
    fn test_name_with_hash() {
        let avatar = AvatarSnapshot::new(
            Address::new([0xab; 20]),
            Address::ZERO,
            "hero",
            1,
        );
        assert_eq!(avatar.name_with_hash(), "hero #abab");
    }
}

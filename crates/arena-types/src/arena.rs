//! Arena enumerations
//!
//! Tiers are derived from a participant's win count and key the reward table;
//! their discriminant byte is what the canonical encoding stores.

use crate::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TierType {
    /// Fewer than two wins
    Rookie = 0,
    /// Two wins
    Bronze = 1,
    /// Three wins
    Silver = 2,
    /// Four wins
    Gold = 3,
    /// Five or more wins
    Platinum = 4,
}

impl TierType {
    /// All tiers in ascending order
    pub fn all() -> [TierType; 5] {
        [
            TierType::Rookie,
            TierType::Bronze,
            TierType::Silver,
            TierType::Gold,
            TierType::Platinum,
        ]
    }

    /// Classify a win count
    pub fn from_wins(wins: u32) -> Self {
        match wins {
            w if w >= 5 => Self::Platinum,
            4 => Self::Gold,
            3 => Self::Silver,
            2 => Self::Bronze,
            _ => Self::Rookie,
        }
    }

    /// Wire discriminant
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rookie => "Rookie",
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

impl TryFrom<u8> for TierType {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rookie),
            1 => Ok(Self::Bronze),
            2 => Ok(Self::Silver),
            3 => Ok(Self::Gold),
            4 => Ok(Self::Platinum),
            other => Err(TypeError::InvalidTier(other)),
        }
    }
}

impl fmt::Display for TierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a resolved battle from the challenger's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MatchOutcome {
    Win = 0,
    Lose = 1,
    /// Battle hit the turn limit
    Draw = 2,
}

impl MatchOutcome {
    /// Whether this outcome moves score and consumes a challenge
    pub fn is_decisive(&self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

impl TryFrom<u8> for MatchOutcome {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Win),
            1 => Ok(Self::Lose),
            2 => Ok(Self::Draw),
            other => Err(TypeError::InvalidOutcome(other)),
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => f.write_str("win"),
            Self::Lose => f.write_str("lose"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(TierType::from_wins(0), TierType::Rookie);
        assert_eq!(TierType::from_wins(1), TierType::Rookie);
        assert_eq!(TierType::from_wins(2), TierType::Bronze);
        assert_eq!(TierType::from_wins(3), TierType::Silver);
        assert_eq!(TierType::from_wins(4), TierType::Gold);
        assert_eq!(TierType::from_wins(5), TierType::Platinum);
        assert_eq!(TierType::from_wins(40), TierType::Platinum);
    }

    #[test]
    fn test_tier_byte_mapping() {
        for tier in TierType::all() {
            assert_eq!(TierType::try_from(tier.as_byte()).unwrap(), tier);
        }
        assert_eq!(TierType::try_from(5), Err(TypeError::InvalidTier(5)));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(TierType::Rookie < TierType::Bronze);
        assert!(TierType::Gold < TierType::Platinum);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(MatchOutcome::try_from(0).unwrap(), MatchOutcome::Win);
        assert_eq!(MatchOutcome::try_from(2).unwrap(), MatchOutcome::Draw);
        assert_eq!(
            MatchOutcome::try_from(3),
            Err(TypeError::InvalidOutcome(3))
        );
        assert!(MatchOutcome::Lose.is_decisive());
        assert!(!MatchOutcome::Draw.is_decisive());
    }
}

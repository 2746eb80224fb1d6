//! Game constants shared by scoring and rewards

/// Score every participant starts a week with, and the floor it never drops below
pub const DEFAULT_SCORE: i32 = 1000;

/// Placeholder combat point assigned on entry
pub const DEFAULT_COMBAT_POINT: i32 = 100;

/// Challenges granted per daily reset
pub const DAILY_CHALLENGE_COUNT: i32 = 5;

/// Armor id used when the avatar has nothing equipped
pub const DEFAULT_ARMOR_ID: i32 = 10200000;

/// Base score delta for a win between equally rated participants
pub const BASE_VICTORY_POINT: i32 = 20;

/// Base score delta for a loss between equally rated participants
pub const BASE_DEFEAT_POINT: i32 = -15;

/// Starting gold pool of a weekly arena state
pub const DEFAULT_GOLD_POOL: i64 = 100;

//! Error types for the arena ledger
//!
//! Failures are explicit: nothing here retries or recovers silently.

use arena_codec::CodecError;
use arena_types::{Address, TierType, TypeError};
use thiserror::Error;

/// Result type for arena operations
pub type ArenaResult<T> = std::result::Result<T, ArenaError>;

/// Arena error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    // ========================================================================
    // Encoding Errors
    // ========================================================================

    /// Malformed or type-mismatched canonical value
    #[error("Decode failed: {0}")]
    Decode(#[from] CodecError),

    /// Raw input could not be converted to a foundation type
    #[error(transparent)]
    Type(TypeError),

    /// A map entry is stored under a key other than its own address
    #[error("Entry stored under {key} belongs to {address}")]
    EntryKeyMismatch { key: Address, address: Address },

    // ========================================================================
    // Contract Errors
    // ========================================================================

    /// Reward lookup before the reward table was computed
    #[error("Reward table has no entry for tier {tier}")]
    MissingTier { tier: TierType },

    /// Match outcome code outside the defined set
    #[error("Invalid match outcome code: {code}")]
    InvalidOutcome { code: u8 },

    /// Ratings that cannot be used to scale a score delta
    #[error("Cannot scale score delta: rating {rating}, enemy rating {enemy_rating}")]
    InvalidRating { rating: i32, enemy_rating: i32 },

    /// Modifiers of different kinds were combined
    #[error("Cannot combine {expected} modifier with {actual} modifier")]
    ModifierKindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    // ========================================================================
    // Participant Errors
    // ========================================================================

    /// No entry for the address
    #[error("Participant {address} not found")]
    ParticipantNotFound { address: Address },

    /// Entry exists but never activated this week
    #[error("Participant {address} is not active")]
    ParticipantInactive { address: Address },

    /// Weekly reward claimed twice
    #[error("Participant {address} already received the weekly reward")]
    RewardAlreadyReceived { address: Address },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl From<TypeError> for ArenaError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOutcome(code) => Self::InvalidOutcome { code },
            other => Self::Type(other),
        }
    }
}

impl ArenaError {
    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Programming errors on the caller's side, as opposed to bad data or state
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidOutcome { .. } | Self::MissingTier { .. } | Self::ModifierKindMismatch { .. }
        )
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::Type(_) => "INVALID_TYPE",
            Self::EntryKeyMismatch { .. } => "ENTRY_KEY_MISMATCH",
            Self::MissingTier { .. } => "MISSING_TIER",
            Self::InvalidOutcome { .. } => "INVALID_OUTCOME",
            Self::InvalidRating { .. } => "INVALID_RATING",
            Self::ModifierKindMismatch { .. } => "MODIFIER_KIND_MISMATCH",
            Self::ParticipantNotFound { .. } => "PARTICIPANT_NOT_FOUND",
            Self::ParticipantInactive { .. } => "PARTICIPANT_INACTIVE",
            Self::RewardAlreadyReceived { .. } => "REWARD_ALREADY_RECEIVED",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

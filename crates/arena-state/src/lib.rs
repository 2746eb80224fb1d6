//! Arena State - Weekly arena ledger
//!
//! This crate keeps one week of ranked player-versus-player standings:
//!
//! - **Entries**: per-avatar score, daily challenges, win/lose/draw record
//! - **Snapshots**: address-keyed entries plus the weekly reward table
//! - **Ranking**: rating-scaled score updates, reward settlement, rollover
//! - **Modifiers**: pending entry changes that combine before landing
//!
//! Snapshots encode to canonical bytes, so every node that applies the same
//! sequence of operations ends with the same `state_hash`.
//!
//! # Example
//!
//! ```
//! use arena_state::{ArenaInfo, AvatarSnapshot, RankingEngine, WeeklyArenaState};
//! use arena_types::{weekly_arena_addresses, Address, MatchOutcome};
//!
//! let addresses = weekly_arena_addresses();
//! let mut week = WeeklyArenaState::new(addresses[0]);
//!
//! let alice = AvatarSnapshot::new(Address::new([1; 20]), Address::new([0xa1; 20]), "alice", 10);
//! let bob = AvatarSnapshot::new(Address::new([2; 20]), Address::new([0xb2; 20]), "bob", 10);
//! week.upsert(ArenaInfo::new(&alice, true));
//! week.upsert(ArenaInfo::new(&bob, true));
//!
//! let engine = RankingEngine::default();
//! let settlement = engine
//!     .resolve_match(&mut week, &alice, bob.address, MatchOutcome::Win)
//!     .unwrap();
//! assert_eq!(settlement.score_after, 1020);
//! ```

pub mod error;
pub mod config;
pub mod avatar;
pub mod record;
pub mod info;
pub mod weekly;
pub mod ranking;
pub mod modifier;

pub use error::{ArenaError, ArenaResult};
pub use config::{ArenaConfig, RewardSchedule, ScoringConfig};
pub use avatar::{AvatarSnapshot, AvatarView};
pub use record::MatchRecord;
pub use info::ArenaInfo;
pub use weekly::WeeklyArenaState;
pub use ranking::{score_delta, MatchSettlement, RankingEngine, RewardGrant};
pub use modifier::{ArenaInfoModifier, StateModifier};

// Re-export foundation types used in this crate's signatures
pub use arena_types::{Address, MatchOutcome, TierType};

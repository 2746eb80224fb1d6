//! Arena Types - Foundation types for the weekly arena ledger
//!
//! This crate contains the types shared by every layer of the arena with zero
//! dependencies on other arena crates:
//!
//! - Identity types (`Address`) and the standard weekly-arena address space
//! - Tier and match-outcome enumerations
//! - Game constants used by scoring and rewards
//!
//! # Lifecycle
//!
//! ```text
//! Created → Active → Finalized → RolledOver
//! ```

pub mod identity;
pub mod arena;
pub mod constants;
pub mod error;

pub use identity::*;
pub use arena::*;
pub use constants::*;
pub use error::*;

/// Version of the arena types schema
pub const TYPES_VERSION: &str = "0.1.0";

//! Identity types for the arena
//!
//! Every participant and every stored state is identified by a 20-byte
//! account address. Addresses order bytewise, which is also the order the
//! canonical encoding sorts them in.

use crate::{TypeError, TypeResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of bytes in an address
pub const ADDRESS_LENGTH: usize = 20;

/// First value of the varying byte in the standard weekly-arena address space
pub const WEEKLY_ARENA_ADDRESS_FIRST: u8 = 0x10;

/// Last value (inclusive) of the varying byte in the standard weekly-arena address space
pub const WEEKLY_ARENA_ADDRESS_LAST: u8 = 0x61;

/// A 20-byte account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// The all-zero address
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    /// Create from raw bytes
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, checking the length
    pub fn from_slice(bytes: &[u8]) -> TypeResult<Self> {
        let array: [u8; ADDRESS_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| TypeError::InvalidAddressLength {
                    expected: ADDRESS_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Parse from a hex string (with or without `0x` prefix)
    pub fn parse(s: &str) -> TypeResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidAddressHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::parse(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The standard weekly-arena address space.
///
/// 82 addresses, all zero except the last byte, which runs from `0x10`
/// through `0x61` inclusive. External code uses this to pre-enumerate the
/// storage slots a weekly arena state may live at.
pub fn weekly_arena_addresses() -> Vec<Address> {
    (WEEKLY_ARENA_ADDRESS_FIRST..=WEEKLY_ARENA_ADDRESS_LAST)
        .map(|i| {
            let mut bytes = [0u8; ADDRESS_LENGTH];
            bytes[ADDRESS_LENGTH - 1] = i;
            Address(bytes)
        })
        .collect()
}

//! Arena Codec - Canonical value encoding
//!
//! This crate provides:
//! - A typed value tree (`Value`, `Key`, `Dictionary`)
//! - A canonical byte form for that tree (Bencodex-compatible)
//! - `Encode`/`Decode` conversions for integers, decimals, text, booleans,
//!   addresses and tiers
//! - SHA-256 digests over the canonical bytes
//!
//! # Determinism
//!
//! Dictionaries are always written with binary keys first, then text keys,
//! each group ascending by raw bytes. Equal trees therefore produce equal
//! bytes, and the decoder rejects anything not in that form.

pub mod value;
pub mod encode;
pub mod decode;
pub mod convert;
pub mod hash;

pub use value::*;
pub use encode::*;
pub use decode::*;
pub use convert::*;
pub use hash::*;

use arena_types::TypeError;
use thiserror::Error;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("Unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    #[error("Malformed integer at offset {offset}")]
    InvalidInteger { offset: usize },

    #[error("Integer at offset {offset} does not fit in 64 bits")]
    IntegerOverflow { offset: usize },

    #[error("Malformed length prefix at offset {offset}")]
    InvalidLength { offset: usize },

    #[error("Invalid UTF-8 text at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Dictionary key at offset {offset} is out of canonical order or duplicated")]
    NonCanonicalKeyOrder { offset: usize },

    #[error("Trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: usize },

    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Integer {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("Field `{field}`: {source}")]
    InField {
        field: String,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attach the dictionary key a nested error occurred under
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::InField {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with field context removed
    pub fn root_cause(&self) -> &CodecError {
        match self {
            Self::InField { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

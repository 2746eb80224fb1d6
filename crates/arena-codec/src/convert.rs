//! Conversions between domain primitives and canonical values
//!
//! | Rust type | Canonical form |
//! |-----------|----------------|
//! | `i32`, `i64`, `u32` | integer |
//! | `bool` | boolean |
//! | `String` | text |
//! | `Address` | 20-byte binary |
//! | `Decimal` | binary holding the ASCII invariant string (`"100"`, `"-2.5"`) |
//! | `TierType` | 1-byte binary |

use crate::value::mismatch;
use crate::{CodecError, CodecResult, Dictionary, Value};
use arena_types::{Address, TierType};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Types that have a canonical value form
pub trait Encode {
    fn to_value(&self) -> Value;
}

/// Types that can be rebuilt from their canonical value form
pub trait Decode: Sized {
    fn from_value(value: &Value) -> CodecResult<Self>;
}

impl Encode for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Decode for Value {
    fn from_value(value: &Value) -> CodecResult<Self> {
        Ok(value.clone())
    }
}

impl Decode for Dictionary {
    fn from_value(value: &Value) -> CodecResult<Self> {
        value.as_dictionary().cloned()
    }
}

impl Encode for i64 {
    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl Decode for i64 {
    fn from_value(value: &Value) -> CodecResult<Self> {
        value.as_integer()
    }
}

impl Encode for i32 {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl Decode for i32 {
    fn from_value(value: &Value) -> CodecResult<Self> {
        let n = value.as_integer()?;
        i32::try_from(n).map_err(|_| CodecError::OutOfRange {
            value: n,
            target: "i32",
        })
    }
}

impl Encode for u32 {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl Decode for u32 {
    fn from_value(value: &Value) -> CodecResult<Self> {
        let n = value.as_integer()?;
        u32::try_from(n).map_err(|_| CodecError::OutOfRange {
            value: n,
            target: "u32",
        })
    }
}

impl Encode for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl Decode for bool {
    fn from_value(value: &Value) -> CodecResult<Self> {
        value.as_boolean()
    }
}

impl Encode for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Decode for String {
    fn from_value(value: &Value) -> CodecResult<Self> {
        value.as_text().map(str::to_string)
    }
}

impl Encode for Address {
    fn to_value(&self) -> Value {
        Value::Binary(self.as_bytes().to_vec())
    }
}

impl Decode for Address {
    fn from_value(value: &Value) -> CodecResult<Self> {
        Ok(Address::from_slice(value.as_binary()?)?)
    }
}

impl Encode for Decimal {
    fn to_value(&self) -> Value {
        Value::Binary(self.to_string().into_bytes())
    }
}

impl Decode for Decimal {
    fn from_value(value: &Value) -> CodecResult<Self> {
        let bytes = value.as_binary()?;
        let text = std::str::from_utf8(bytes)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or_else(|| CodecError::InvalidDecimal(hex::encode(bytes)))?;
        // Separators, signs and exponents parse but would not re-encode to these bytes
        match Decimal::from_str(text) {
            Ok(parsed) if parsed.to_string() == text => Ok(parsed),
            _ => Err(CodecError::InvalidDecimal(text.to_string())),
        }
    }
}

impl Encode for TierType {
    fn to_value(&self) -> Value {
        Value::Binary(vec![self.as_byte()])
    }
}

impl Decode for TierType {
    fn from_value(value: &Value) -> CodecResult<Self> {
        match value.as_binary()? {
            [byte] => Ok(TierType::try_from(*byte)?),
            _ => Err(mismatch("1-byte binary", value)),
        }
    }
}

//! Canonical byte decoder
//!
//! Only the canonical form is accepted: integers without leading zeros or
//! `-0`, length prefixes without leading zeros, dictionary keys strictly
//! ascending, and no bytes after the top-level value.

use crate::{CodecError, CodecResult, Dictionary, Key, Value};

/// Maximum nesting of lists and dictionaries
pub const MAX_DEPTH: usize = 64;

/// Decode canonical bytes into a value
pub fn from_bytes(bytes: &[u8]) -> CodecResult<Value> {
    let mut reader = Reader::new(bytes);
    let value = reader.read_value(0)?;
    if reader.pos != bytes.len() {
        return Err(CodecError::TrailingBytes { offset: reader.pos });
    }
    Ok(value)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> CodecResult<u8> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or(CodecError::UnexpectedEof { offset: self.pos })
    }

    fn bump(&mut self) -> CodecResult<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(CodecError::UnexpectedEof {
                offset: self.bytes.len(),
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_value(&mut self, depth: usize) -> CodecResult<Value> {
        let offset = self.pos;
        match self.peek()? {
            b'n' => {
                self.pos += 1;
                Ok(Value::Null)
            }
            b't' => {
                self.pos += 1;
                Ok(Value::Boolean(true))
            }
            b'f' => {
                self.pos += 1;
                Ok(Value::Boolean(false))
            }
            b'i' => {
                self.pos += 1;
                self.read_integer().map(Value::Integer)
            }
            b'0'..=b'9' => self.read_binary().map(Value::Binary),
            b'u' => self.read_text().map(Value::Text),
            b'l' => {
                self.enter(depth)?;
                self.pos += 1;
                let mut items = Vec::new();
                while self.peek()? != b'e' {
                    items.push(self.read_value(depth + 1)?);
                }
                self.pos += 1;
                Ok(Value::List(items))
            }
            b'd' => {
                self.enter(depth)?;
                self.pos += 1;
                self.read_dictionary(depth).map(Value::Dictionary)
            }
            byte => Err(CodecError::UnexpectedByte { byte, offset }),
        }
    }

    fn enter(&self, depth: usize) -> CodecResult<()> {
        if depth >= MAX_DEPTH {
            return Err(CodecError::NestingTooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn read_dictionary(&mut self, depth: usize) -> CodecResult<Dictionary> {
        let mut entries: Vec<(Key, Value)> = Vec::new();
        while self.peek()? != b'e' {
            let key_offset = self.pos;
            let key = match self.peek()? {
                b'0'..=b'9' => Key::Binary(self.read_binary()?),
                b'u' => Key::Text(self.read_text()?),
                byte => {
                    return Err(CodecError::UnexpectedByte {
                        byte,
                        offset: key_offset,
                    })
                }
            };
            if let Some((previous, _)) = entries.last() {
                if *previous >= key {
                    return Err(CodecError::NonCanonicalKeyOrder { offset: key_offset });
                }
            }
            let value = self.read_value(depth + 1)?;
            entries.push((key, value));
        }
        self.pos += 1;
        Ok(entries.into_iter().collect())
    }

    /// Reads `[-]digits e` after the leading `i`
    fn read_integer(&mut self) -> CodecResult<i64> {
        let start = self.pos;
        loop {
            match self.bump()? {
                b'e' => break,
                b'-' | b'0'..=b'9' => {}
                _ => return Err(CodecError::InvalidInteger { offset: start }),
            }
        }
        let digits = &self.bytes[start..self.pos - 1];
        let (negative, magnitude) = match digits.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, digits),
        };
        let well_formed = !magnitude.is_empty()
            && magnitude.iter().all(u8::is_ascii_digit)
            && !(magnitude.len() > 1 && magnitude[0] == b'0')
            && !(negative && magnitude == b"0");
        if !well_formed {
            return Err(CodecError::InvalidInteger { offset: start });
        }
        // Digits and an optional sign are always valid UTF-8
        let text = std::str::from_utf8(digits)
            .map_err(|_| CodecError::InvalidInteger { offset: start })?;
        text.parse::<i64>()
            .map_err(|_| CodecError::IntegerOverflow { offset: start })
    }

    fn read_length(&mut self) -> CodecResult<usize> {
        let start = self.pos;
        loop {
            match self.bump()? {
                b':' => break,
                b'0'..=b'9' => {}
                _ => return Err(CodecError::InvalidLength { offset: start }),
            }
        }
        let digits = &self.bytes[start..self.pos - 1];
        if digits.is_empty() || (digits.len() > 1 && digits[0] == b'0') {
            return Err(CodecError::InvalidLength { offset: start });
        }
        std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(CodecError::InvalidLength { offset: start })
    }

    fn read_binary(&mut self) -> CodecResult<Vec<u8>> {
        let len = self.read_length()?;
        Ok(self.take(len)?.to_vec())
    }

    fn read_text(&mut self) -> CodecResult<String> {
        // skip `u`
        self.pos += 1;
        let len = self.read_length()?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}

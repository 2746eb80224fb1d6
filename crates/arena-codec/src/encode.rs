//! Canonical byte encoder

use crate::{Key, Value};

/// Encode a value to its canonical bytes
pub fn to_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.push(b'n'),
        Value::Boolean(true) => out.push(b't'),
        Value::Boolean(false) => out.push(b'f'),
        Value::Integer(n) => {
            out.push(b'i');
            out.extend_from_slice(n.to_string().as_bytes());
            out.push(b'e');
        }
        Value::Binary(bytes) => write_binary(out, bytes),
        Value::Text(text) => write_text(out, text),
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                write_value(out, item);
            }
            out.push(b'e');
        }
        Value::Dictionary(dict) => {
            out.push(b'd');
            // BTreeMap iteration is already canonical key order
            for (key, item) in dict {
                write_key(out, key);
                write_value(out, item);
            }
            out.push(b'e');
        }
    }
}

fn write_key(out: &mut Vec<u8>, key: &Key) {
    match key {
        Key::Binary(bytes) => write_binary(out, bytes),
        Key::Text(text) => write_text(out, text),
    }
}

fn write_binary(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}

fn write_text(out: &mut Vec<u8>, text: &str) {
    out.push(b'u');
    write_binary(out, text.as_bytes());
}

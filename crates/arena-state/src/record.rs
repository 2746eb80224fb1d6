//! Win/lose/draw tally

use arena_codec::{CodecResult, Decode, Dictionary, Encode, Value};
use arena_types::MatchOutcome;
use serde::{Deserialize, Serialize};

/// Match record of one participant for the current week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub win: u32,
    pub lose: u32,
    pub draw: u32,
}

impl MatchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Win => self.win = self.win.saturating_add(1),
            MatchOutcome::Lose => self.lose = self.lose.saturating_add(1),
            MatchOutcome::Draw => self.draw = self.draw.saturating_add(1),
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.win) + u64::from(self.lose) + u64::from(self.draw)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Encode for MatchRecord {
    fn to_value(&self) -> Value {
        Dictionary::new()
            .with("win", self.win)
            .with("lose", self.lose)
            .with("draw", self.draw)
            .into()
    }
}

impl Decode for MatchRecord {
    fn from_value(value: &Value) -> CodecResult<Self> {
        let dict = value.as_dictionary()?;
        Ok(Self {
            win: dict.get_as("win")?,
            lose: dict.get_as("lose")?,
            draw: dict.get_as("draw")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_codec::to_bytes;

    #[test]
    fn test_record_outcomes() {
        let mut record = MatchRecord::new();
        assert!(record.is_empty());

        record.record(MatchOutcome::Win);
        record.record(MatchOutcome::Win);
        record.record(MatchOutcome::Lose);
        record.record(MatchOutcome::Draw);

        assert_eq!(record, MatchRecord { win: 2, lose: 1, draw: 1 });
        assert_eq!(record.total(), 4);
    }

    #[test]
    fn test_canonical_form() {
        let record = MatchRecord { win: 3, lose: 1, draw: 0 };
        assert_eq!(
            to_bytes(&record.to_value()),
            b"du4:drawi0eu4:losei1eu3:wini3ee".to_vec()
        );
        assert_eq!(MatchRecord::from_value(&record.to_value()).unwrap(), record);
    }

    #[test]
    fn test_negative_count_rejected() {
        let value: Value = Dictionary::new()
            .with("win", -1i64)
            .with("lose", 0i64)
            .with("draw", 0i64)
            .into();
        assert!(MatchRecord::from_value(&value).is_err());
    }
}

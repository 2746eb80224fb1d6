//! Pending changes to an arena entry
//!
//! A modifier accumulates changes locally before they are applied to an
//! `ArenaInfo`. Modifiers of the same kind combine with `add` and `remove`;
//! mixing kinds is a caller error.

use crate::{ArenaError, ArenaInfo, ArenaResult};
use serde::{Deserialize, Serialize};

/// A pending, combinable change to a state value of type `S`
pub trait StateModifier<S> {
    /// True when applying this modifier changes nothing
    fn is_empty(&self) -> bool;

    /// Combine with another pending change of the same kind
    fn add(&self, other: &Self) -> ArenaResult<Self>
    where
        Self: Sized;

    /// Take back a previously added change of the same kind
    fn remove(&self, other: &Self) -> ArenaResult<Self>
    where
        Self: Sized;

    /// Apply to a copy of `state`
    fn modify(&self, state: &S) -> S;
}

/// Concrete modifier kinds for `ArenaInfo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArenaInfoModifier {
    /// Score change; the floor applies when the change lands
    Score { delta: i32 },
    /// Daily challenges used up
    ChallengeCount { consumed: i32 },
    /// Extra wins, losses and draws
    Record { win: u32, lose: u32, draw: u32 },
}

impl ArenaInfoModifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Score { .. } => "score",
            Self::ChallengeCount { .. } => "challenge_count",
            Self::Record { .. } => "record",
        }
    }

    fn mismatch(&self, other: &Self) -> ArenaError {
        ArenaError::ModifierKindMismatch {
            expected: self.kind(),
            actual: other.kind(),
        }
    }
}

impl StateModifier<ArenaInfo> for ArenaInfoModifier {
    fn is_empty(&self) -> bool {
        match *self {
            Self::Score { delta } => delta == 0,
            Self::ChallengeCount { consumed } => consumed == 0,
            Self::Record { win, lose, draw } => win == 0 && lose == 0 && draw == 0,
        }
    }

    fn add(&self, other: &Self) -> ArenaResult<Self> {
        match (*self, *other) {
            (Self::Score { delta: a }, Self::Score { delta: b }) => Ok(Self::Score {
                delta: a.saturating_add(b),
            }),
            (Self::ChallengeCount { consumed: a }, Self::ChallengeCount { consumed: b }) => {
                Ok(Self::ChallengeCount {
                    consumed: a.saturating_add(b),
                })
            }
            (
                Self::Record { win, lose, draw },
                Self::Record {
                    win: w,
                    lose: l,
                    draw: d,
                },
            ) => Ok(Self::Record {
                win: win.saturating_add(w),
                lose: lose.saturating_add(l),
                draw: draw.saturating_add(d),
            }),
            _ => Err(self.mismatch(other)),
        }
    }

    fn remove(&self, other: &Self) -> ArenaResult<Self> {
        match (*self, *other) {
            (Self::Score { delta: a }, Self::Score { delta: b }) => Ok(Self::Score {
                delta: a.saturating_sub(b),
            }),
            (Self::ChallengeCount { consumed: a }, Self::ChallengeCount { consumed: b }) => {
                Ok(Self::ChallengeCount {
                    consumed: a.saturating_sub(b),
                })
            }
            // Counts never go below zero
            (
                Self::Record { win, lose, draw },
                Self::Record {
                    win: w,
                    lose: l,
                    draw: d,
                },
            ) => Ok(Self::Record {
                win: win.saturating_sub(w),
                lose: lose.saturating_sub(l),
                draw: draw.saturating_sub(d),
            }),
            _ => Err(self.mismatch(other)),
        }
    }

    fn modify(&self, state: &ArenaInfo) -> ArenaInfo {
        let mut next = state.clone();
        match *self {
            Self::Score { delta } => next.adjust_score(delta),
            Self::ChallengeCount { consumed } => next.consume_challenges(consumed),
            Self::Record { win, lose, draw } => {
                let record = next.record_mut();
                record.win = record.win.saturating_add(win);
                record.lose = record.lose.saturating_add(lose);
                record.draw = record.draw.saturating_add(draw);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AvatarSnapshot;
    use arena_types::{Address, TierType};

    fn entry() -> ArenaInfo {
        let avatar = AvatarSnapshot::new(Address::new([1; 20]), Address::ZERO, "hero", 1);
        ArenaInfo::new(&avatar, true)
    }

    #[test]
    fn test_is_empty() {
        assert!(ArenaInfoModifier::Score { delta: 0 }.is_empty());
        assert!(!ArenaInfoModifier::Score { delta: -3 }.is_empty());
        assert!(ArenaInfoModifier::Record { win: 0, lose: 0, draw: 0 }.is_empty());
        assert!(!ArenaInfoModifier::ChallengeCount { consumed: 1 }.is_empty());
    }

    #[test]
    fn test_add_and_remove_same_kind() {
        let a = ArenaInfoModifier::Score { delta: 20 };
        let b = ArenaInfoModifier::Score { delta: -5 };
        let sum = a.add(&b).unwrap();
        assert_eq!(sum, ArenaInfoModifier::Score { delta: 15 });
        assert_eq!(sum.remove(&b).unwrap(), a);

        let r = ArenaInfoModifier::Record { win: 1, lose: 0, draw: 2 };
        let taken = r
            .remove(&ArenaInfoModifier::Record { win: 3, lose: 0, draw: 1 })
            .unwrap();
        assert_eq!(taken, ArenaInfoModifier::Record { win: 0, lose: 0, draw: 1 });
    }

    #[test]
    fn test_kind_mismatch() {
        let score = ArenaInfoModifier::Score { delta: 1 };
        let count = ArenaInfoModifier::ChallengeCount { consumed: 1 };

        let err = score.add(&count).unwrap_err();
        assert_eq!(
            err,
            ArenaError::ModifierKindMismatch {
                expected: "score",
                actual: "challenge_count",
            }
        );
        assert!(err.is_contract_violation());
        assert!(count.remove(&score).is_err());
    }

    #[test]
    fn test_modify_returns_copy() {
        let info = entry();
        let next = ArenaInfoModifier::Score { delta: 40 }.modify(&info);
        assert_eq!(next.score(), 1040);
        assert_eq!(info.score(), 1000);
        // score modifiers do not touch the challenge count
        assert_eq!(next.daily_challenge_count(), 5);
    }

    #[test]
    fn test_modify_enforces_floor() {
        let next = ArenaInfoModifier::Score { delta: -400 }.modify(&entry());
        assert_eq!(next.score(), 1000);
    }

    #[test]
    fn test_modify_challenges_and_record() {
        let info = ArenaInfoModifier::ChallengeCount { consumed: 6 }.modify(&entry());
        assert_eq!(info.daily_challenge_count(), -1);

        let info = ArenaInfoModifier::Record { win: 4, lose: 1, draw: 0 }.modify(&info);
        assert_eq!(info.record().win, 4);
        assert_eq!(info.record().lose, 1);
        assert_eq!(info.tier(), TierType::Gold);
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&ArenaInfoModifier::Score { delta: 5 }).unwrap();
        assert_eq!(json, r#"{"kind":"score","delta":5}"#);
        let back: ArenaInfoModifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ArenaInfoModifier::Score { delta: 5 });
    }
}

//! Sequence-backed identifiers for ledger records.
//!
//! Keys render as `"<prefix>_<n>"`. The sequence never rewinds, so a key is
//! never handed out twice within a ledger, even after deletions.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use gearledger_core::DomainError;

/// Identifier allocated from a monotonically increasing sequence.
pub trait SequenceKey: Copy + Ord {
    /// Build the key for sequence number `n` (starting at 1).
    fn from_sequence(n: u64) -> Self;

    /// Sequence number this key was allocated from.
    fn sequence(&self) -> u64;
}

/// Identifier of a tracked inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ItemId(u64);

/// Identifier of a pending request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RequestId(u64);

macro_rules! impl_sequence_key {
    ($t:ident, $prefix:literal) => {
        impl SequenceKey for $t {
            fn from_sequence(n: u64) -> Self {
                Self(n)
            }

            fn sequence(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let n = s
                    .strip_prefix(concat!($prefix, "_"))
                    .and_then(|rest| rest.parse::<u64>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        DomainError::invalid_id(format!("{}: {s:?}", stringify!($t)))
                    })?;
                Ok(Self(n))
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.to_string()
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

impl_sequence_key!(ItemId, "item");
impl_sequence_key!(RequestId, "req");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_with_prefix() {
        assert_eq!(ItemId::from_sequence(3).to_string(), "item_3");
        assert_eq!(RequestId::from_sequence(12).to_string(), "req_12");
    }

    #[test]
    fn keys_parse_their_display_form() {
        let id: ItemId = "item_42".parse().unwrap();
        assert_eq!(id.sequence(), 42);
        let id: RequestId = "req_1".parse().unwrap();
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for bad in ["", "item_", "item_x", "req_3", "item_0", "item_-1", "ITEM_1"] {
            let err = bad.parse::<ItemId>().unwrap_err();
            assert!(matches!(err, DomainError::InvalidId(_)), "{bad:?} parsed");
        }
    }

    #[test]
    fn ordering_follows_sequence_not_text() {
        let two = ItemId::from_sequence(2);
        let ten = ItemId::from_sequence(10);
        assert!(two < ten);
        assert!(two.to_string() > ten.to_string());
    }

    #[test]
    fn serde_uses_rendered_form() {
        let json = serde_json::to_string(&RequestId::from_sequence(7)).unwrap();
        assert_eq!(json, "\"req_7\"");
        let back: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RequestId::from_sequence(7));
        assert!(serde_json::from_str::<RequestId>("\"item_7\"").is_err());
    }
}

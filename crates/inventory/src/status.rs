//! Derived item status.
//!
//! Status is never stored. It is recomputed from four stored fields on every
//! read, with a fixed priority: returned, then verified, then fully received,
//! else missing. The flags are not mutually exclusive in storage.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use gearledger_core::DomainError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Fewer units received than requested.
    Missing,
    /// All requested units are in hand, not yet issued.
    Received,
    /// Issued to the custodian.
    Assigned,
    /// Confirmed back from the custodian.
    Returned,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Missing,
        ItemStatus::Received,
        ItemStatus::Assigned,
        ItemStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Missing => "missing",
            ItemStatus::Received => "received",
            ItemStatus::Assigned => "assigned",
            ItemStatus::Returned => "returned",
        }
    }

    /// Display label used by exports.
    pub fn title(&self) -> &'static str {
        match self {
            ItemStatus::Missing => "Missing",
            ItemStatus::Received => "Received",
            ItemStatus::Assigned => "Assigned",
            ItemStatus::Returned => "Returned",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "missing" => Ok(ItemStatus::Missing),
            // "complete" is the label one front end used for this state.
            "received" | "complete" => Ok(ItemStatus::Received),
            "assigned" => Ok(ItemStatus::Assigned),
            "returned" => Ok(ItemStatus::Returned),
            other => Err(DomainError::validation(format!("unknown status: {other:?}"))),
        }
    }
}

/// Classify an item from its stored fields. First match wins.
pub fn derive_status(returned: bool, verified: bool, received: u32, requested: u32) -> ItemStatus {
    if returned {
        ItemStatus::Returned
    } else if verified {
        ItemStatus::Assigned
    } else if received >= requested {
        ItemStatus::Received
    } else {
        ItemStatus::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn returned_wins_over_everything() {
        assert_eq!(derive_status(true, true, 5, 5), ItemStatus::Returned);
        assert_eq!(derive_status(true, false, 0, 5), ItemStatus::Returned);
    }

    #[test]
    fn verified_wins_over_quantities() {
        assert_eq!(derive_status(false, true, 0, 5), ItemStatus::Assigned);
        assert_eq!(derive_status(false, true, 5, 5), ItemStatus::Assigned);
    }

    #[test]
    fn quantities_decide_when_no_flags() {
        assert_eq!(derive_status(false, false, 5, 5), ItemStatus::Received);
        assert_eq!(derive_status(false, false, 6, 5), ItemStatus::Received);
        assert_eq!(derive_status(false, false, 4, 5), ItemStatus::Missing);
    }

    #[test]
    fn labels() {
        assert_eq!(ItemStatus::Assigned.as_str(), "assigned");
        assert_eq!(ItemStatus::Assigned.to_string(), "Assigned");
        assert_eq!("Returned".parse::<ItemStatus>().unwrap(), ItemStatus::Returned);
        assert_eq!(" complete ".parse::<ItemStatus>().unwrap(), ItemStatus::Received);
        assert!("lost".parse::<ItemStatus>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: derivation follows the priority order for every input.
        #[test]
        fn derivation_obeys_priority(
            returned in any::<bool>(),
            verified in any::<bool>(),
            received in 0u32..50,
            requested in 1u32..50,
        ) {
            let status = derive_status(returned, verified, received, requested);
            let expected = if returned {
                ItemStatus::Returned
            } else if verified {
                ItemStatus::Assigned
            } else if received >= requested {
                ItemStatus::Received
            } else {
                ItemStatus::Missing
            };
            prop_assert_eq!(status, expected);
            // Pure: same inputs, same answer.
            prop_assert_eq!(status, derive_status(returned, verified, received, requested));
        }
    }
}

//! Demonstration inventory for a fresh session.

use chrono::{DateTime, Utc};

use gearledger_core::DomainResult;
use gearledger_inventory::{ItemId, Ledger, NewItem};

/// Add three items: one partly received, one with its whole quantity
/// outstanding, and one already assigned.
pub fn seed_sample_inventory(ledger: &mut Ledger, now: DateTime<Utc>) -> DomainResult<Vec<ItemId>> {
    let helmet = ledger.add_item(
        NewItem {
            on_hand: 2,
            custodian: "SSgt Johnson".to_string(),
            location: "Supply Room A".to_string(),
            email: "johnson@example.com".to_string(),
            phone: "555-0101".to_string(),
            ..NewItem::new("Combat Helmet", 5)
        },
        now,
    )?;
    ledger.record_received(helmet, 3)?;

    let radio = ledger.add_item(
        NewItem {
            on_hand: 1,
            missing: 3,
            custodian: "A1C Smith".to_string(),
            location: "Comm Center".to_string(),
            email: "smith@example.com".to_string(),
            phone: "555-0102".to_string(),
            ..NewItem::new("Field Radio", 3)
        },
        now,
    )?;

    let goggles = ledger.add_item(
        NewItem {
            on_hand: 2,
            custodian: "TSgt Davis".to_string(),
            location: "Equipment Bay".to_string(),
            email: "davis@example.com".to_string(),
            phone: "555-0103".to_string(),
            ..NewItem::new("Night Vision Goggles", 2)
        },
        now,
    )?;
    ledger.record_received(goggles, 2)?;
    ledger.assign(goggles)?;

    tracing::info!(items = 3, "sample inventory seeded");
    Ok(vec![helmet, radio, goggles])
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearledger_inventory::{ItemFilter, ItemStatus};

    #[test]
    fn seeds_three_items_in_expected_states() {
        let mut ledger = Ledger::new();
        let ids = seed_sample_inventory(&mut ledger, Utc::now()).unwrap();
        let statuses: Vec<_> = ids.iter().map(|id| ledger.status_of(id).unwrap()).collect();
        assert_eq!(
            statuses,
            vec![ItemStatus::Missing, ItemStatus::Missing, ItemStatus::Assigned]
        );
        assert_eq!(ledger.item(&ids[0]).unwrap().received(), 3);
    }

    #[test]
    fn radio_shortfall_shows_under_has_missing() {
        let mut ledger = Ledger::new();
        let ids = seed_sample_inventory(&mut ledger, Utc::now()).unwrap();
        let short: Vec<_> = ledger
            .filter_items(ItemFilter::HasMissing)
            .into_iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(short, vec![ids[1]]);
        assert_eq!(ledger.item(&ids[1]).unwrap().missing(), 3);
    }
}

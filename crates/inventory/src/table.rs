//! Insertion-ordered record table with its own key sequence.

use std::collections::BTreeMap;
use std::fmt::Display;

use gearledger_core::{DomainError, DomainResult, Entity};

use crate::id::SequenceKey;

/// Keyed collection of entities.
///
/// Keys come from a counter stored with the table, so iteration order
/// (ascending key) is insertion order and keys are never reused after a
/// removal or a [`Table::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    next: u64,
}

impl<E> Default for Table<E>
where
    E: Entity,
    E::Id: SequenceKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Table<E>
where
    E: Entity,
    E::Id: SequenceKey,
{
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next: 1,
        }
    }

    /// Allocate a key and insert the row built for it.
    ///
    /// If `build` fails the key is not consumed.
    pub fn try_insert_with<F, Err>(&mut self, build: F) -> Result<E::Id, Err>
    where
        F: FnOnce(E::Id) -> Result<E, Err>,
    {
        let id = E::Id::from_sequence(self.next);
        let row = build(id)?;
        self.next += 1;
        self.rows.insert(id, row);
        Ok(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.rows.get_mut(id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.rows.contains_key(id)
    }

    pub fn remove(&mut self, id: &E::Id) -> Option<E> {
        self.rows.remove(id)
    }

    /// Drop every row. The key sequence keeps counting.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&E::Id, &E)> {
        self.rows.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    /// Sequence number the next insert will use.
    pub fn next_sequence(&self) -> u64 {
        self.next
    }

    /// Build a table from rows that already carry their ids.
    ///
    /// Fails on a repeated id instead of keeping only one of the rows. The
    /// counter ends past both `next` and every key in `rows`.
    pub fn from_rows(rows: impl IntoIterator<Item = E>, next: u64) -> DomainResult<Self>
    where
        E::Id: Display,
    {
        let mut table = Self::new();
        for row in rows {
            let id = *row.id();
            if table.rows.insert(id, row).is_some() {
                return Err(DomainError::validation(format!("duplicate id {id}")));
            }
        }
        let past_keys = table
            .rows
            .keys()
            .next_back()
            .map_or(1, |id| id.sequence() + 1);
        table.next = next.max(past_keys);
        Ok(table)
    }

    /// Take over `other`'s rows. The counter only moves forward.
    pub fn replace_all(&mut self, other: Self) {
        self.rows = other.rows;
        self.next = self.next.max(other.next);
    }
}

//! Attribute store
//!
//! A fixed-size table with one [`AttributeSlot`] per [`AttributeId`]. The
//! store owns a private copy of every value it holds and hands out fresh
//! copies on query, so callers never alias its contents.
//!
//! Lifecycle: created empty, filled through [`AttributeStore::ingest`] while
//! a manifest is loaded, read-only afterwards, and torn down exactly once with
//! [`AttributeStore::destroy`]. Any operation after teardown fails with
//! `InvalidState`.

mod slot;

pub use slot::AttributeSlot;

use crate::schema::AttributeId;
use crate::{BbamiError, Result};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreState {
    Live,
    Disposed,
}

/// Attribute values parsed from a manifest
#[derive(Debug, Clone)]
pub struct AttributeStore {
    slots: [AttributeSlot; AttributeId::COUNT],
    state: StoreState,
}

impl AttributeStore {
    /// Create a store with every slot empty
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AttributeSlot::Empty),
            state: StoreState::Live,
        }
    }

    /// Add a value for `id`, promoting its slot as needed
    ///
    /// The value is copied; the caller keeps ownership of `value`.
    ///
    /// # Errors
    /// `InvalidState` on a disposed store, `ResourceExhausted` if the copy
    /// cannot be allocated.
    pub fn ingest(&mut self, id: AttributeId, value: &str) -> Result<()> {
        self.ensure_live()?;
        let copy = owned_copy(value)?;
        let slot = &mut self.slots[id.index()];
        slot.push(copy)?;
        tracing::debug!(attribute = %id, count = slot.len(), "Ingested attribute value");
        Ok(())
    }

    /// Number of values held for `id`
    pub fn count(&self, id: AttributeId) -> Result<usize> {
        Ok(self.slot(id)?.len())
    }

    /// Owned copy of the value at `index` for `id`
    ///
    /// Valid indices are `0 <= index < count(id)`; anything else, negative
    /// indices included, is `NotFound`.
    pub fn query(&self, id: AttributeId, index: i64) -> Result<String> {
        let slot = self.slot(id)?;
        let value = usize::try_from(index)
            .ok()
            .and_then(|i| slot.get(i))
            .ok_or(BbamiError::NotFound {
                attribute: id,
                index,
            })?;
        owned_copy(value)
    }

    /// Borrow the slot for `id`
    pub fn slot(&self, id: AttributeId) -> Result<&AttributeSlot> {
        self.ensure_live()?;
        Ok(&self.slots[id.index()])
    }

    /// Non-empty slots in schema order
    ///
    /// Yields nothing once the store has been disposed.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &AttributeSlot)> {
        let live = self.state == StoreState::Live;
        AttributeId::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter(move |(_, slot)| live && !slot.is_empty())
    }

    /// Number of attributes with at least one value
    pub fn populated(&self) -> usize {
        self.iter().count()
    }

    /// Release every held value and invalidate the store
    ///
    /// # Errors
    /// `InvalidState` if the store was already disposed.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_live()?;
        for slot in self.slots.iter_mut() {
            *slot = AttributeSlot::Empty;
        }
        self.state = StoreState::Disposed;
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.state == StoreState::Disposed
    }

    fn ensure_live(&self) -> Result<()> {
        match self.state {
            StoreState::Live => Ok(()),
            StoreState::Disposed => Err(BbamiError::disposed()),
        }
    }
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_disposed() {
            return Err(S::Error::custom("attribute store has been disposed"));
        }
        let mut map = serializer.serialize_map(Some(self.populated()))?;
        for (id, slot) in self.iter() {
            map.serialize_entry(&id, slot)?;
        }
        map.end()
    }
}

/// Copy `value` into a new allocation, reporting allocation failure
fn owned_copy(value: &str) -> Result<String> {
    let mut copy = String::new();
    copy.try_reserve_exact(value.len())?;
    copy.push_str(value);
    Ok(copy)
}

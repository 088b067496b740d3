//! Per-attribute value slot

use crate::Result;
use serde::{Serialize, Serializer};

/// The value(s) held for one attribute
///
/// Transitions only move forward: `Empty -> One -> Many`. `Many` always
/// holds at least two values, in ingestion order. Slots are only built by
/// the store, so that invariant cannot be broken from outside the crate:
///
/// ```compile_fail
/// let slot = bbami::AttributeSlot::Many(Vec::new());
/// ```
///
/// ```compile_fail
/// let slot = bbami::AttributeSlot::One("only".to_string());
/// ```
///
/// Read them through [`len`](Self::len), [`get`](Self::get) and
/// [`values`](Self::values).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttributeSlot {
    /// No value ingested yet
    #[default]
    Empty,
    /// Exactly one value
    #[non_exhaustive]
    One(String),
    /// Two or more values, in ingestion order
    #[non_exhaustive]
    Many(Vec<String>),
}

impl AttributeSlot {
    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            AttributeSlot::Empty => 0,
            AttributeSlot::One(_) => 1,
            AttributeSlot::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AttributeSlot::Empty)
    }

    /// Borrow the value at `index`, if present
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            AttributeSlot::Empty => None,
            AttributeSlot::One(value) if index == 0 => Some(value),
            AttributeSlot::One(_) => None,
            AttributeSlot::Many(values) => values.get(index).map(String::as_str),
        }
    }

    /// Iterate over the values in ingestion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            AttributeSlot::Empty => &[],
            AttributeSlot::One(value) => std::slice::from_ref(value),
            AttributeSlot::Many(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    /// Append an already-owned value, promoting the slot as needed
    ///
    /// Fails only if growing the value list cannot allocate; the slot is
    /// left unchanged in that case.
    pub(crate) fn push(&mut self, value: String) -> Result<()> {
        match self {
            AttributeSlot::Empty => *self = AttributeSlot::One(value),
            AttributeSlot::One(_) => {
                let mut values = Vec::new();
                values.try_reserve_exact(2)?;
                if let AttributeSlot::One(first) = std::mem::take(self) {
                    values.push(first);
                }
                values.push(value);
                *self = AttributeSlot::Many(values);
            }
            AttributeSlot::Many(values) => {
                values.try_reserve(1)?;
                values.push(value);
            }
        }
        Ok(())
    }
}

impl Serialize for AttributeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AttributeSlot::Empty => serializer.serialize_none(),
            AttributeSlot::One(value) => serializer.serialize_str(value),
            AttributeSlot::Many(values) => values.serialize(serializer),
        }
    }
}

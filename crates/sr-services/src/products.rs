//! Product line list
//!
//! Lines are addressed by a stable [`LineId`]. The 1-based index shown to
//! the user is derived from the position and recomputed on every read.

use sr_models::{ProductLine, ProductLineInput};
use tracing::debug;

/// Stable handle of a product line
pub type LineId = u64;

#[derive(Debug, Clone)]
struct Slot {
    id: LineId,
    input: ProductLineInput,
}

/// Ordered product lines of the form
#[derive(Debug, Clone, Default)]
pub struct ProductList {
    slots: Vec<Slot>,
    next_id: LineId,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, returning its handle
    pub fn add(&mut self, input: ProductLineInput) -> LineId {
        self.next_id += 1;
        let id = self.next_id;
        self.slots.push(Slot { id, input });
        debug!(line = id, count = self.slots.len(), "Product line added");
        id
    }

    /// Delete a line; unknown handles are ignored
    pub fn remove(&mut self, id: LineId) -> bool {
        let Some(pos) = self.slots.iter().position(|s| s.id == id) else {
            return false;
        };
        self.slots.remove(pos);
        debug!(line = id, count = self.slots.len(), "Product line removed");
        true
    }

    /// Replace the inputs of a line
    pub fn update(&mut self, id: LineId, input: ProductLineInput) -> bool {
        match self.slots.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                slot.input = input;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: LineId) -> Option<&ProductLineInput> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.input)
    }

    /// Current 1-based position of a line
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id).map(|pos| pos + 1)
    }

    /// Total shown next to a line while editing (blank when both inputs are zero)
    pub fn display_total(&self, id: LineId) -> Option<String> {
        self.get(id).map(ProductLineInput::display_total)
    }

    /// Document view of every line, densely numbered from 1
    pub fn lines(&self) -> Vec<ProductLine> {
        self.slots
            .iter()
            .enumerate()
            .map(|(pos, slot)| ProductLine::from_input(pos + 1, &slot.input))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

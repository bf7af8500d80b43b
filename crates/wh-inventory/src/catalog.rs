//! The item catalog.

use wh_core::ItemId;

/// Number of item types in the standard warehouse catalog.
pub const STANDARD_ITEM_COUNT: u16 = 10;

/// A fixed, contiguous range of item types `ItemId(0) .. ItemId(len)`.
///
/// Fixed at construction time; a run never adds or removes item types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    len: u16,
}

impl Catalog {
    /// A catalog of `len` item types.
    pub fn new(len: u16) -> Self {
        Self { len }
    }

    /// The 10-item catalog every standard run uses.
    pub fn standard() -> Self {
        Self::new(STANDARD_ITEM_COUNT)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, item: ItemId) -> bool {
        item.0 < self.len
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> {
        (0..self.len).map(ItemId)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! the `.index()` helper when indexing per-item `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id following `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of an order.  Allocated from 1 upward by a per-run counter.
    pub struct OrderId(u64);
}

typed_id! {
    /// Index of an item type in the run's catalog (0-based).
    pub struct ItemId(u16);
}

typed_id! {
    /// Handle of a suspended process inside the kernel.
    pub struct TaskId(u64);
}

impl OrderId {
    /// The first id handed out in every run.
    pub const FIRST: OrderId = OrderId(1);
}

impl ItemId {
    /// Catalog label, 1-based: `ItemId(0)` is `"item_1"`.
    pub fn label(self) -> String {
        format!("item_{}", self.0 as u32 + 1)
    }
}

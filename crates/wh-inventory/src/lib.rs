//! `wh-inventory` - stock levels and the admission decision for new orders.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`catalog`] | `Catalog` - the fixed set of item types for a run         |
//! | [`ledger`]  | `ReorderPolicy`, `StockEntry`, `Ledger`, `SubmitOutcome`  |
//!
//! # Admission rule (summary)
//!
//! ```text
//! submit(order):
//!   on_hand >= qty  → on_hand -= qty; admit;   replenish if on_hand <= reorder_point
//!   otherwise       → stockout; backlog (FIFO); replenish
//!   (replenish only if none is in flight for that item)
//!
//! complete_replenishment(item):
//!   on_hand += reorder_quantity; clear guard
//!   drain backlog head-first while on_hand >= head.qty
//! ```

pub mod catalog;
pub mod ledger;


pub use catalog::{Catalog, STANDARD_ITEM_COUNT};
pub use ledger::{Admission, Ledger, ReorderPolicy, StockEntry, SubmitOutcome};

//! BookBridge — cart ledger bounded context.
//!
//! The in-page table of line items on the checkout surface: product id,
//! unit price fixed at first insertion, user-adjustable quantity, and
//! derived totals.

mod ledger;

pub use ledger::{CartEntry, CartLedger, CartLineItem, CartTotals, QuantityAction};

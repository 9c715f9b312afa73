//! The cart ledger aggregate.

use serde::{Deserialize, Serialize};

use bookbridge_core::error::BridgeError;
use bookbridge_core::money::{Currency, Money};
use bookbridge_core::product::ProductId;

/// One row in the cart ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique key within the ledger; merge target for repeated adds.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Display image URL.
    pub image: String,
    /// Unit price, fixed at first insertion.
    pub unit_price: Money,
    /// Quantity, at least 1. Removal is the only way to zero a line.
    pub quantity: u32,
}

impl CartLineItem {
    /// Derived line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// User quantity adjustment on a ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
    /// `+` control: always allowed.
    Increase,
    /// `-` control: blocked below 1 (silent no-op at the floor).
    Decrease,
}

/// Snapshot row for external inspection (checkout submission).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// The ledger line's product id.
    pub product_id: ProductId,
    /// The line quantity.
    pub quantity: u32,
    /// The line's unit price.
    pub price: Money,
}

/// Derived ledger totals. Subtotal and total are equal; the ledger carries
/// no fees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Grand total.
    pub total: Money,
}

/// The cart ledger: an ordered table of line items with derived totals.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLineItem>,
}

impl CartLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, merging into an existing line with the same product
    /// id. A merge sums quantities and retains the existing unit price; a
    /// new line takes the given price (already clamped non-negative by
    /// construction — a zero price only draws a warning).
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Validation` if `quantity` is zero.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<(), BridgeError> {
        if quantity == 0 {
            return Err(BridgeError::Validation(
                "cart line quantity must be at least 1".to_owned(),
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
            tracing::debug!(product_id = %line.product_id, quantity = line.quantity, "merged cart line");
            return Ok(());
        }

        let name = name.into();
        if unit_price.minor() == 0 {
            tracing::warn!(%product_id, name, "adding zero-priced cart line");
        }
        self.lines.push(CartLineItem {
            product_id,
            name,
            image: image.into(),
            unit_price,
            quantity,
        });
        Ok(())
    }

    /// Applies a quantity control to a line. Increase always succeeds;
    /// decrease at the floor of 1 is a no-op. Returns the resulting
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::ProductNotFound` if no line has `product_id`.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        action: QuantityAction,
    ) -> Result<u32, BridgeError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == *product_id)
            .ok_or_else(|| BridgeError::ProductNotFound(product_id.clone()))?;

        match action {
            QuantityAction::Increase => line.quantity = line.quantity.saturating_add(1),
            QuantityAction::Decrease if line.quantity > 1 => line.quantity -= 1,
            QuantityAction::Decrease => {}
        }
        Ok(line.quantity)
    }

    /// Removes a line and returns it.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::ProductNotFound` if no line has `product_id`.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<CartLineItem, BridgeError> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.product_id == *product_id)
            .ok_or_else(|| BridgeError::ProductNotFound(product_id.clone()))?;
        let removed = self.lines.remove(pos);
        tracing::info!(product_id = %removed.product_id, "removed cart line");
        Ok(removed)
    }

    /// Returns the ledger lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Snapshot of `{product_id, quantity, price}` rows for external
    /// inspection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartEntry> {
        self.lines
            .iter()
            .map(|l| CartEntry {
                product_id: l.product_id.clone(),
                quantity: l.quantity,
                price: l.unit_price,
            })
            .collect()
    }

    /// Recomputes the derived totals from the current lines. Totals carry
    /// the first line's currency; an empty ledger totals to zero naira.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let currency = self
            .lines
            .first()
            .map_or(Currency::default(), |l| l.unit_price.currency());
        let subtotal = self
            .lines
            .iter()
            .fold(Money::zero(currency), |acc, l| acc + l.line_total());
        CartTotals {
            subtotal,
            total: subtotal,
        }
    }

    /// Whether the ledger has no lines (the "empty cart" display state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of ledger lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Empties all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::info!("cleared cart");
    }
}

//! In-memory cart collection and its reconciliation logic.

use crate::ids::ProductId;
use crate::item::{CartItem, Product};

/// What [`Cart::decrement`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Quantity dropped by one; the item stays in the cart.
    Decremented,
    /// Quantity was 1; the item was removed entirely.
    Removed,
    /// No item with that id.
    NotFound,
}

/// Ordered collection of cart line items.
///
/// Holds at most one item per product id, and quantities are always >= 1:
/// an item whose quantity would drop below 1 is removed. A mutated item
/// moves to the end of the collection, so order reflects recency of
/// mutation rather than insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted snapshot.
    ///
    /// Later duplicates of an id fold into the first occurrence (quantities
    /// sum) and zero-quantity entries are dropped, so the invariants hold
    /// even against hand-edited data.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add a product to the cart.
    ///
    /// A new id is appended with quantity 1; an id already present is
    /// incremented instead. Returns `true` when the product was not
    /// previously in the cart.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            self.increment(&product.id);
            false
        } else {
            self.items.push(CartItem::new(product));
            true
        }
    }

    /// Increase the quantity of the matching item by one and move it to the
    /// end of the collection.
    ///
    /// Returns `false` when no item matches, leaving the cart untouched.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.take(id) {
            Some(mut item) => {
                item.quantity += 1;
                self.items.push(item);
                true
            }
            None => false,
        }
    }

    /// Decrease the quantity of the matching item by one, moving it to the
    /// end of the collection; an item at quantity 1 is removed entirely.
    pub fn decrement(&mut self, id: &ProductId) -> DecrementOutcome {
        match self.take(id) {
            Some(mut item) => {
                if item.quantity <= 1 {
                    DecrementOutcome::Removed
                } else {
                    item.quantity -= 1;
                    self.items.push(item);
                    DecrementOutcome::Decremented
                }
            }
            None => DecrementOutcome::NotFound,
        }
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The current line items, in order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Whether an item with this id is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity of the matching item, if present.
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.get(id).map(|i| i.quantity)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn take(&mut self, id: &ProductId) -> Option<CartItem> {
        let pos = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(pos))
    }
}

//! Product and cart line item types.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Catalog-side description of a purchasable item.
///
/// Carries no quantity; quantities only exist on items inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Image URL for display.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A line item in the cart: a product plus its quantity.
///
/// Field names match the historical on-device JSON format, so snapshots
/// written by older clients deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Image URL for display.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Number of units in the cart, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a quantity-1 line item from a product.
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }

    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl From<Product> for CartItem {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}

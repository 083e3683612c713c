//! Client Cart Model
//!
//! The cart never touches the server: the frontend keeps it in local
//! storage under a fixed key and is the only writer. This module models
//! the serialized shape and the derived totals so they stay consistent
//! with what the frontend persists.

use kernel::id::CourseId;
use serde::{Deserialize, Serialize};

/// Local-storage key the frontend persists the cart under
pub const CART_STORAGE_KEY: &str = "lms-cart";

/// One course in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub course_id: CourseId,
    pub title: String,
    pub price_cents: i64,
}

/// Client-local cart state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub shipping_fee_cents: i64,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            shipping_fee_cents: 0,
        }
    }
}

impl Cart {
    pub fn new(shipping_fee_cents: i64) -> Self {
        Self {
            items: Vec::new(),
            shipping_fee_cents,
        }
    }

    /// Add a course; a course already in the cart is not added twice
    pub fn add(&mut self, item: CartItem) {
        if !self.contains(&item.course_id) {
            self.items.push(item);
        }
    }

    /// Remove a course if present
    pub fn remove(&mut self, course_id: &CourseId) {
        self.items.retain(|item| item.course_id != *course_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.items.iter().any(|item| item.course_id == *course_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|item| item.price_cents).sum()
    }

    /// Subtotal plus shipping; shipping applies only to non-empty carts
    pub fn total_cents(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.subtotal_cents() + self.shipping_fee_cents
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_cents: i64) -> CartItem {
        CartItem {
            course_id: CourseId::new(),
            title: "Course".to_string(),
            price_cents,
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new(500);
        assert_eq!(cart.subtotal_cents(), 0);
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_totals_include_shipping() {
        let mut cart = Cart::new(500);
        cart.add(item(10_00));
        cart.add(item(25_50));
        assert_eq!(cart.subtotal_cents(), 35_50);
        assert_eq!(cart.total_cents(), 40_50);
    }

    #[test]
    fn test_add_is_idempotent_per_course() {
        let mut cart = Cart::default();
        let first = item(10_00);
        cart.add(first.clone());
        cart.add(first.clone());
        assert_eq!(cart.items.len(), 1);

        cart.remove(&first.course_id);
        assert!(cart.is_empty());
        // Removing again is a no-op
        cart.remove(&first.course_id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new(0);
        cart.add(item(19_99));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json["items"].is_array());
        assert_eq!(json["shippingFeeCents"], 0);
        assert_eq!(json["items"][0]["priceCents"], 19_99);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}

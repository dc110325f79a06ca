use std::collections::HashSet;

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::errors::CartError;
use super::value_objects::Coupon;
use crate::domain::shared::value_objects::{ProductId, ShopId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub shop_id: ShopId,
}

pub struct CartItemProps {
    pub id: ProductId,
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: Option<String>,
    pub shop_id: ShopId,
}

impl CartLineItem {
    pub fn new(props: CartItemProps) -> Result<Self, CartError> {
        if props.name.trim().is_empty() {
            return Err(CartError::NameEmpty);
        }
        if props.unit_price < BigDecimal::zero() {
            return Err(CartError::NegativePrice);
        }

        Ok(Self {
            id: props.id,
            name: props.name,
            unit_price: props.unit_price,
            image_url: props.image_url,
            quantity: 1,
            shop_id: props.shop_id,
        })
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }
}

/// Result of [`Cart::add_item`]. A conflict leaves the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddItemOutcome {
    Added,
    Incremented,
    ShopConflict,
}

/// Shopping cart holding items of a single shop and at most one coupon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
    coupon: Option<Coupon>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn shop_id(&self) -> Option<&ShopId> {
        self.items.first().map(|item| &item.shop_id)
    }

    pub fn would_conflict(&self, item: &CartLineItem) -> bool {
        self.shop_id().is_some_and(|shop| *shop != item.shop_id)
    }

    pub fn add_item(&mut self, item: CartLineItem) -> AddItemOutcome {
        if self.would_conflict(&item) {
            return AddItemOutcome::ShopConflict;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddItemOutcome::Incremented;
        }

        self.items.push(CartLineItem { quantity: 1, ..item });
        AddItemOutcome::Added
    }

    /// Drops every line and the coupon, then starts over with `item`.
    pub fn replace_cart(&mut self, item: CartLineItem) {
        self.clear();
        self.items.push(CartLineItem { quantity: 1, ..item });
    }

    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != *id);
        self.items.len() != before
    }

    /// Sets the quantity of an existing line. Values below one are ignored;
    /// use [`Cart::remove_item`] to drop a line.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };
        if quantity < 1 {
            return false;
        }

        match self.items.iter_mut().find(|item| item.id == *id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
    }

    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    pub fn subtotal(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + item.line_total())
    }

    pub fn discount(&self) -> BigDecimal {
        match &self.coupon {
            Some(coupon) => coupon.discount_for(&self.subtotal()),
            None => BigDecimal::zero(),
        }
    }

    /// Payable amount: subtotal minus discount, never below zero.
    pub fn total_price(&self) -> BigDecimal {
        let total = self.subtotal() - self.discount();
        if total < BigDecimal::zero() {
            BigDecimal::zero()
        } else {
            total
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CartError> {
        serde_json::to_vec(self).map_err(|_| CartError::CorruptSnapshot)
    }

    /// Reads a stored snapshot back, rejecting blobs that break the cart invariants.
    pub fn decode(bytes: &[u8]) -> Result<Self, CartError> {
        let cart: Cart = serde_json::from_slice(bytes).map_err(|_| CartError::CorruptSnapshot)?;

        let mut seen = HashSet::new();
        for item in &cart.items {
            if item.quantity < 1 || !seen.insert(&item.id) {
                return Err(CartError::CorruptSnapshot);
            }
            if item.name.trim().is_empty() || item.unit_price < BigDecimal::zero() {
                return Err(CartError::CorruptSnapshot);
            }
            if cart.shop_id().is_some_and(|shop| *shop != item.shop_id) {
                return Err(CartError::CorruptSnapshot);
            }
        }
        if cart
            .coupon
            .as_ref()
            .is_some_and(|c| c.discount_value < BigDecimal::zero())
        {
            return Err(CartError::CorruptSnapshot);
        }

        Ok(cart)
    }
}

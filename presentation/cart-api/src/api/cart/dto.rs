use std::str::FromStr;

use bigdecimal::BigDecimal;
use poem_openapi::Object;

use business::domain::cart::errors::CartError;
use business::domain::cart::model::{Cart, CartItemProps, CartLineItem};
use business::domain::cart::value_objects::{Coupon, DiscountType};
use business::domain::shared::value_objects::{ProductId, ShopId};

/// Amounts are exchanged as decimal strings with two fraction digits.
pub fn format_amount(value: &BigDecimal) -> String {
    value.round(2).with_scale(2).to_string()
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    /// Product identifier within the shop catalog
    pub id: String,
    /// Product name (cannot be empty)
    pub name: String,
    /// Unit price as a decimal string, e.g. "12.50"
    pub unit_price: String,
    /// Optional display image
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    /// Slug of the shop selling the product
    pub shop_id: String,
    /// Discard a cart from another shop instead of refusing the item
    #[oai(skip_serializing_if_is_none)]
    pub replace: Option<bool>,
}

impl AddCartItemRequest {
    pub fn into_line_item(self) -> Result<CartLineItem, CartError> {
        let unit_price =
            BigDecimal::from_str(self.unit_price.trim()).map_err(|_| CartError::InvalidPrice)?;

        CartLineItem::new(CartItemProps {
            id: ProductId::parse(&self.id)?,
            name: self.name,
            unit_price,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            shop_id: ShopId::parse(&self.shop_id)?,
        })
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    /// New quantity; values below 1 are ignored
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ApplyCouponRequest {
    /// Coupon code as typed by the customer
    pub code: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub shop_id: String,
    /// Unit price times quantity
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemResponse {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            unit_price: format_amount(&item.unit_price),
            image_url: item.image_url.clone(),
            quantity: item.quantity,
            shop_id: item.shop_id.to_string(),
            line_total: format_amount(&item.line_total()),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CouponResponse {
    pub code: String,
    /// "fixed" or "percent"
    pub discount_type: String,
    /// Money amount for fixed coupons, percentage points for percent coupons
    pub discount_value: String,
}

impl From<&Coupon> for CouponResponse {
    fn from(coupon: &Coupon) -> Self {
        let discount_value = match coupon.discount_type {
            DiscountType::Fixed => format_amount(&coupon.discount_value),
            DiscountType::Percent => coupon.discount_value.to_string(),
        };

        Self {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type.to_string(),
            discount_value,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartResponse {
    /// Shop owning every item, null for an empty cart
    pub shop_id: Option<String>,
    pub items: Vec<CartItemResponse>,
    pub coupon: Option<CouponResponse>,
    /// Sum of quantities
    pub item_count: u64,
    pub subtotal: String,
    pub discount: String,
    /// Payable amount, never negative
    pub total: String,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            shop_id: cart.shop_id().map(ToString::to_string),
            items: cart.items().iter().map(CartItemResponse::from).collect(),
            coupon: cart.coupon().map(CouponResponse::from),
            item_count: cart.item_count(),
            subtotal: format_amount(&cart.subtotal()),
            discount: format_amount(&cart.discount()),
            total: format_amount(&cart.total_price()),
        }
    }
}

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::errors::CouponError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Fixed,
    Percent,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Fixed => write!(f, "fixed"),
            DiscountType::Percent => write!(f, "percent"),
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(DiscountType::Fixed),
            "percent" => Ok(DiscountType::Percent),
            _ => Err(format!("Invalid discount type: {}", s)),
        }
    }
}

/// Discount terms handed over by the server after verification.
/// Expiry and usage limits are enforced before the coupon reaches the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: BigDecimal,
}

impl Coupon {
    pub fn new(
        code: String,
        discount_type: DiscountType,
        discount_value: BigDecimal,
    ) -> Result<Self, CouponError> {
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(CouponError::CodeEmpty);
        }
        if discount_value < BigDecimal::zero() {
            return Err(CouponError::InvalidDiscount);
        }

        Ok(Self {
            code,
            discount_type,
            discount_value,
        })
    }

    /// Amount taken off `subtotal`. Not floored: the cart floors the total instead.
    pub fn discount_for(&self, subtotal: &BigDecimal) -> BigDecimal {
        match self.discount_type {
            DiscountType::Fixed => self.discount_value.clone(),
            DiscountType::Percent => {
                subtotal.clone() * self.discount_value.clone() / BigDecimal::from(100)
            }
        }
    }
}

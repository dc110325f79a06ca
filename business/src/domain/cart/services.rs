use async_trait::async_trait;
use bigdecimal::BigDecimal;

use super::errors::CouponError;
use super::value_objects::Coupon;
use crate::domain::shared::value_objects::ShopId;

#[derive(Debug, Clone, PartialEq)]
pub struct CouponVerificationRequest {
    pub code: String,
    pub shop_id: ShopId,
    pub subtotal: BigDecimal,
}

/// Service port for the server-side coupon check.
///
/// Validates the code against the shop's rules (minimum order value,
/// usage limit, ownership) and returns the discount terms on success.
#[async_trait]
pub trait CouponVerifier: Send + Sync {
    async fn verify(&self, request: &CouponVerificationRequest) -> Result<Coupon, CouponError>;
}

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::cart::errors::CouponError;
use crate::domain::cart::value_objects::Coupon;
use crate::domain::shared::value_objects::ShopId;

pub struct VerifyCouponParams {
    pub code: String,
    pub shop_id: ShopId,
    pub subtotal: BigDecimal,
}

#[async_trait]
pub trait VerifyCouponUseCase: Send + Sync {
    async fn execute(&self, params: VerifyCouponParams) -> Result<Coupon, CouponError>;
}

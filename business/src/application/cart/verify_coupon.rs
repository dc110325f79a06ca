use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CouponError;
use crate::domain::cart::services::{CouponVerificationRequest, CouponVerifier};
use crate::domain::cart::use_cases::verify_coupon::{VerifyCouponParams, VerifyCouponUseCase};
use crate::domain::cart::value_objects::Coupon;
use crate::domain::logger::Logger;

pub struct VerifyCouponUseCaseImpl {
    pub verifier: Arc<dyn CouponVerifier>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl VerifyCouponUseCase for VerifyCouponUseCaseImpl {
    async fn execute(&self, params: VerifyCouponParams) -> Result<Coupon, CouponError> {
        let code = params.code.trim();
        if code.is_empty() {
            return Err(CouponError::CodeEmpty);
        }

        self.logger.info(&format!(
            "Verifying coupon {} for shop {}",
            code, params.shop_id
        ));

        let request = CouponVerificationRequest {
            code: code.to_string(),
            shop_id: params.shop_id,
            subtotal: params.subtotal,
        };

        match self.verifier.verify(&request).await {
            Ok(coupon) => {
                self.logger.info(&format!(
                    "Coupon {} accepted: {} {}",
                    coupon.code, coupon.discount_value, coupon.discount_type
                ));
                Ok(coupon)
            }
            Err(e) => {
                self.logger.warn(&format!("Coupon {} rejected: {}", code, e));
                Err(e)
            }
        }
    }
}

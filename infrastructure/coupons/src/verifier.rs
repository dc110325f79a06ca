use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use business::domain::cart::errors::CouponError;
use business::domain::cart::services::{CouponVerificationRequest, CouponVerifier};
use business::domain::cart::value_objects::{Coupon, DiscountType};

use crate::client::CouponApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequestBody<'a> {
    code: &'a str,
    shop_id: &'a str,
    subtotal: &'a BigDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponseBody {
    code: String,
    discount_type: DiscountType,
    discount_value: BigDecimal,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct CouponVerifierHttp {
    client: CouponApiClient,
}

impl CouponVerifierHttp {
    pub fn new(client: CouponApiClient) -> Self {
        Self { client }
    }

    fn build_body(request: &CouponVerificationRequest) -> VerifyRequestBody<'_> {
        VerifyRequestBody {
            code: &request.code,
            shop_id: request.shop_id.as_str(),
            subtotal: &request.subtotal,
        }
    }

    fn parse_success(body: &str) -> Result<Coupon, CouponError> {
        let parsed: VerifyResponseBody = serde_json::from_str(body).map_err(|e| {
            tracing::warn!(error = %e, "unexpected coupon verification payload");
            CouponError::Unavailable
        })?;

        Coupon::new(parsed.code, parsed.discount_type, parsed.discount_value)
    }

    fn parse_failure(body: &str) -> CouponError {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| CouponError::from_code(&b.error))
            .unwrap_or(CouponError::Unavailable)
    }
}

#[async_trait]
impl CouponVerifier for CouponVerifierHttp {
    async fn verify(&self, request: &CouponVerificationRequest) -> Result<Coupon, CouponError> {
        let url = self.client.verify_url().map_err(|e| {
            tracing::error!(error = %e, "invalid coupon verification url");
            CouponError::Unavailable
        })?;

        let response = self
            .client
            .client
            .post(url)
            .header("Authorization", self.client.auth_header())
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "coupon verification request failed");
                CouponError::Unavailable
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "could not read coupon verification response");
            CouponError::Unavailable
        })?;

        if status.is_success() {
            Self::parse_success(&body)
        } else {
            tracing::debug!(%status, body = %body, "coupon rejected by verification service");
            Err(Self::parse_failure(&body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::ShopId;
    use std::str::FromStr;

    #[test]
    fn should_serialize_request_with_camel_case_fields() {
        let request = CouponVerificationRequest {
            code: "SAVE10".to_string(),
            shop_id: ShopId::parse("bakery").unwrap(),
            subtotal: BigDecimal::from_str("1250.50").unwrap(),
        };

        let json = serde_json::to_value(CouponVerifierHttp::build_body(&request)).unwrap();

        assert_eq!(json["code"], "SAVE10");
        assert_eq!(json["shopId"], "bakery");
        assert_eq!(json["subtotal"], "1250.50");
    }

    #[test]
    fn should_parse_accepted_coupon() {
        let coupon = CouponVerifierHttp::parse_success(
            r#"{"code":"SAVE10","discountType":"percent","discountValue":"10"}"#,
        )
        .unwrap();

        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount_type, DiscountType::Percent);
        assert_eq!(coupon.discount_value, BigDecimal::from(10));
    }

    #[test]
    fn should_accept_numeric_discount_value() {
        let coupon = CouponVerifierHttp::parse_success(
            r#"{"code":"FLAT","discountType":"fixed","discountValue":50}"#,
        )
        .unwrap();

        assert_eq!(coupon.discount_value, BigDecimal::from(50));
    }

    #[test]
    fn should_reject_negative_discount_from_service() {
        let result = CouponVerifierHttp::parse_success(
            r#"{"code":"FLAT","discountType":"fixed","discountValue":"-5"}"#,
        );

        assert_eq!(result.unwrap_err(), CouponError::InvalidDiscount);
    }

    #[test]
    fn should_treat_malformed_success_body_as_unavailable() {
        let result = CouponVerifierHttp::parse_success(r#"{"ok":true}"#);

        assert_eq!(result.unwrap_err(), CouponError::Unavailable);
    }

    #[test]
    fn should_map_error_codes() {
        assert_eq!(
            CouponVerifierHttp::parse_failure(r#"{"error":"coupon.below_minimum_order"}"#),
            CouponError::BelowMinimumOrder
        );
        assert_eq!(
            CouponVerifierHttp::parse_failure(r#"{"error":"coupon.invalid_code"}"#),
            CouponError::InvalidCode
        );
    }

    #[test]
    fn should_fall_back_to_unavailable_for_unknown_errors() {
        assert_eq!(
            CouponVerifierHttp::parse_failure(r#"{"error":"teapot"}"#),
            CouponError::Unavailable
        );
        assert_eq!(
            CouponVerifierHttp::parse_failure("<html>Bad Gateway</html>"),
            CouponError::Unavailable
        );
    }

    #[tokio::test]
    async fn should_report_unavailable_when_service_unreachable() {
        let client = CouponApiClient::new(
            url::Url::parse("http://127.0.0.1:9").unwrap(),
            "key".to_string(),
        );
        let verifier = CouponVerifierHttp::new(client);
        let request = CouponVerificationRequest {
            code: "SAVE10".to_string(),
            shop_id: ShopId::parse("bakery").unwrap(),
            subtotal: BigDecimal::from(100),
        };

        let result = verifier.verify(&request).await;

        assert_eq!(result.unwrap_err(), CouponError::Unavailable);
    }
}

use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::{CartError, CouponError};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = match &self {
            CartError::NameEmpty
            | CartError::NegativePrice
            | CartError::InvalidPrice
            | CartError::InvalidIdentifier(_)
            | CartError::Empty => StatusCode::BAD_REQUEST,
            CartError::CorruptSnapshot => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let name = match status {
            StatusCode::BAD_REQUEST => "ValidationError",
            _ => "InternalError",
        };

        (status, Json(ErrorResponse::new(name, &self.to_string())))
    }
}

impl IntoErrorResponse for CouponError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            CouponError::CodeEmpty => (StatusCode::BAD_REQUEST, "ValidationError"),
            CouponError::InvalidCode => (StatusCode::NOT_FOUND, "NotFound"),
            CouponError::ShopMismatch
            | CouponError::BelowMinimumOrder
            | CouponError::UsageLimitReached
            | CouponError::InvalidDiscount => (StatusCode::UNPROCESSABLE_ENTITY, "CouponRejected"),
            CouponError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "Unavailable"),
        };

        (status, Json(ErrorResponse::new(name, &self.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::IdentifierError;

    #[test]
    fn should_map_cart_validation_errors_to_bad_request() {
        let (status, json) = CartError::InvalidIdentifier(IdentifierError::InvalidShopSlug)
            .into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.name, "ValidationError");
        assert_eq!(json.0.message, "shop.invalid_slug");
    }

    #[test]
    fn should_map_coupon_errors_to_statuses() {
        let cases = [
            (CouponError::CodeEmpty, StatusCode::BAD_REQUEST),
            (CouponError::InvalidCode, StatusCode::NOT_FOUND),
            (CouponError::UsageLimitReached, StatusCode::UNPROCESSABLE_ENTITY),
            (CouponError::Unavailable, StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let (status, json) = error.into_error_response();
            assert_eq!(status, expected);
            assert_eq!(json.0.message, message);
        }
    }
}

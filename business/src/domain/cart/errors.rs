use crate::domain::shared::value_objects::IdentifierError;

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.name_empty")]
    NameEmpty,
    #[error("cart.negative_price")]
    NegativePrice,
    #[error("cart.invalid_price")]
    InvalidPrice,
    #[error("cart.empty")]
    Empty,
    #[error("cart.corrupt_snapshot")]
    CorruptSnapshot,
    #[error("{0}")]
    InvalidIdentifier(#[from] IdentifierError),
}

/// Outcomes of coupon verification and construction.
/// Verification failures come from the server-side rules and are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponError {
    #[error("coupon.code_empty")]
    CodeEmpty,
    #[error("coupon.invalid_code")]
    InvalidCode,
    #[error("coupon.shop_mismatch")]
    ShopMismatch,
    #[error("coupon.below_minimum_order")]
    BelowMinimumOrder,
    #[error("coupon.usage_limit_reached")]
    UsageLimitReached,
    #[error("coupon.invalid_discount")]
    InvalidDiscount,
    #[error("coupon.unavailable")]
    Unavailable,
}

impl CouponError {
    /// Maps a dotted error code returned by the verification endpoint.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "coupon.code_empty" => Some(CouponError::CodeEmpty),
            "coupon.invalid_code" => Some(CouponError::InvalidCode),
            "coupon.shop_mismatch" => Some(CouponError::ShopMismatch),
            "coupon.below_minimum_order" => Some(CouponError::BelowMinimumOrder),
            "coupon.usage_limit_reached" => Some(CouponError::UsageLimitReached),
            "coupon.invalid_discount" => Some(CouponError::InvalidDiscount),
            "coupon.unavailable" => Some(CouponError::Unavailable),
            _ => None,
        }
    }
}

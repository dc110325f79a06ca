use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowercase alphanumeric words joined by single hyphens.
static SHOP_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("shop.invalid_slug")]
    InvalidShopSlug,
    #[error("product.id_empty")]
    ProductIdEmpty,
}

/// Represents a shop (tenant storefront) by its unique slug.
/// Used to keep a cart scoped to a single shop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopId(String);

impl ShopId {
    /// Parses a slug such as `green-grocer-42`.
    pub fn parse(slug: &str) -> Result<Self, IdentifierError> {
        let slug = slug.trim();
        if !SHOP_SLUG.is_match(slug) {
            return Err(IdentifierError::InvalidShopSlug);
        }
        Ok(Self(slug.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShopId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopId> for String {
    fn from(value: ShopId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog identifier of a product, unique within its shop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(id: &str) -> Result<Self, IdentifierError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(IdentifierError::ProductIdEmpty);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_valid_shop_slug() {
        let shop = ShopId::parse("green-grocer-42").unwrap();
        assert_eq!(shop.as_str(), "green-grocer-42");
    }

    #[test]
    fn should_trim_shop_slug() {
        let shop = ShopId::parse("  bakery ").unwrap();
        assert_eq!(shop.to_string(), "bakery");
    }

    #[test]
    fn should_reject_malformed_shop_slugs() {
        for slug in ["", "Bakery", "two--dashes", "-leading", "trailing-", "with space"] {
            assert_eq!(
                ShopId::parse(slug),
                Err(IdentifierError::InvalidShopSlug),
                "slug {slug:?} should be rejected"
            );
        }
    }

    #[test]
    fn should_compile_shop_slug_pattern() {
        assert!(SHOP_SLUG.is_match("green-grocer-42"));
        assert!(!SHOP_SLUG.is_match("-bakery"));
        assert!(!SHOP_SLUG.is_match("bakery--shop"));
    }

    #[test]
    fn should_parse_product_id() {
        let id = ProductId::parse(" sku-001 ").unwrap();
        assert_eq!(id.as_str(), "sku-001");
    }

    #[test]
    fn should_reject_blank_product_id() {
        assert_eq!(ProductId::parse("   "), Err(IdentifierError::ProductIdEmpty));
    }

    #[test]
    fn should_serialize_ids_as_plain_strings() {
        let shop = ShopId::parse("bakery").unwrap();
        assert_eq!(serde_json::to_string(&shop).unwrap(), "\"bakery\"");

        let product: ProductId = serde_json::from_str("\"p-1\"").unwrap();
        assert_eq!(product.as_str(), "p-1");
    }

    #[test]
    fn should_reject_invalid_slug_when_deserializing() {
        let result: Result<ShopId, _> = serde_json::from_str("\"Not A Slug\"");
        assert!(result.is_err());
    }
}

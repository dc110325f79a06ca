use anyhow::Context;
use url::Url;

/// Configuration for the coupon verification service.
#[derive(Debug, Clone)]
pub struct CouponConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl CouponConfig {
    /// Environment variables:
    /// - COUPON_API_URL: base URL of the verification service (required)
    /// - COUPON_API_KEY: bearer key (default: empty)
    pub fn from_env() -> anyhow::Result<Self> {
        let raw_url = std::env::var("COUPON_API_URL")
            .context("COUPON_API_URL environment variable must be set")?;
        let api_key = std::env::var("COUPON_API_KEY").unwrap_or_default();
        Self::new(&raw_url, api_key)
    }

    pub fn new(raw_url: &str, api_key: String) -> anyhow::Result<Self> {
        let base_url = Url::parse(raw_url.trim())
            .with_context(|| format!("COUPON_API_URL is not a valid URL: {raw_url}"))?;
        Ok(Self { base_url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_base_url() {
        let config = CouponConfig::new(" https://api.example.com/v1 ", "key".to_string()).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn should_reject_relative_url() {
        assert!(CouponConfig::new("/coupons", String::new()).is_err());
    }
}

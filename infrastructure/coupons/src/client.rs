use reqwest::Client;
use url::Url;

/// HTTP client for the coupon verification service.
pub struct CouponApiClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: Url,
}

impl CouponApiClient {
    pub fn new(base_url: Url, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Builds the authorization header value.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Returns the verification endpoint, relative to the configured base.
    pub fn verify_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("coupons/verify")
    }
}

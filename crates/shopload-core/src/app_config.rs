const SHOP_DOMAIN_SUFFIX: &str = ".myshopify.com";

/// Everything the importer needs to reach one store's Admin API.
#[derive(Clone)]
pub struct ImportConfig {
    pub shop: String,
    pub access_token: String,
    pub api_version: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub backoff_base_secs: u64,
    pub backoff_cap_secs: u64,
}

impl ImportConfig {
    /// GraphQL Admin API endpoint for the configured shop and API version.
    ///
    /// Accepts both the bare shop name (`acme`) and the full
    /// `acme.myshopify.com` domain.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let shop = self
            .shop
            .strip_suffix(SHOP_DOMAIN_SUFFIX)
            .unwrap_or(&self.shop);
        format!(
            "https://{shop}{SHOP_DOMAIN_SUFFIX}/admin/api/{}/graphql.json",
            self.api_version
        )
    }
}

impl std::fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportConfig")
            .field("shop", &self.shop)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("backoff_cap_secs", &self.backoff_cap_secs)
            .finish()
    }
}

//! Selection of the entry service endpoint.

/// Local backend used while developing.
pub const DEV_API_URL: &str = "http://127.0.0.1:5000";
/// Deployed backend.
pub const PROD_API_URL: &str = "https://your-growth-backend.onrender.com";

/// Value of `GROWTHLOG_ENV` at build time that selects [DEV_API_URL].
const DEVELOPMENT_ENV: &str = "development";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint picked by the `GROWTHLOG_ENV` flag the binary was built with.
    pub fn from_build_env() -> Self {
        Self::new(base_url_for(option_env!("GROWTHLOG_ENV")))
    }

    /// Build-time endpoint unless `--api-url` was passed.
    pub fn resolve(api_url: Option<String>) -> Self {
        api_url.map_or_else(Self::from_build_env, Self::new)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn entries_url(&self) -> String {
        format!("{}/entries", self.base_url)
    }
}

fn base_url_for(environment: Option<&str>) -> &'static str {
    match environment {
        Some(DEVELOPMENT_ENV) => DEV_API_URL,
        Some(_) | None => PROD_API_URL,
    }
}

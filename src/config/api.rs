//! Backend data-access API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Data-access API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend
    pub base_url: String,

    /// Bearer token for authentication
    pub api_token: String,

    /// Catalog page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("API_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.api_token.is_empty() {
            return Err(ValidationError::MissingRequired("API_TOKEN"));
        }
        if self.page_size == 0 || self.page_size > 500 {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_page_size() -> u32 {
    50
}

fn default_timeout() -> u64 {
    30
}

//! Configuration loading and representation.
//!
//! Everything comes from the process environment. Loading goes through a
//! lookup function so tests never touch the real environment.

use std::time::Duration;

use scwinv_core::{InventoryError, InventoryResult};

pub const ORGANIZATION_VAR: &str = "SCALEWAY_ORGANIZATION";
pub const TOKEN_VAR: &str = "SCALEWAY_TOKEN";
pub const REGION_VAR: &str = "SCALEWAY_REGION";
pub const API_URL_VAR: &str = "SCALEWAY_API_URL";
pub const PAGE_SIZE_VAR: &str = "SCALEWAY_PAGE_SIZE";
pub const TIMEOUT_VAR: &str = "SCALEWAY_TIMEOUT_SECS";

pub const DEFAULT_REGION: &str = "par1";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one inventory run.
#[derive(Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    organization: String,
    token: String,
    region: String,
    api_url: String,
    page_size: u32,
    timeout: Duration,
}

impl InventoryConfig {
    /// Credentials plus defaults for everything else.
    pub fn new(organization: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            token: token.into(),
            region: DEFAULT_REGION.to_string(),
            api_url: default_api_url(DEFAULT_REGION),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> InventoryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> InventoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (organization, token) = match (get(ORGANIZATION_VAR), get(TOKEN_VAR)) {
            (Some(org), Some(token)) => (org, token),
            (org, token) => {
                let missing: Vec<&str> = [(ORGANIZATION_VAR, org.is_none()), (TOKEN_VAR, token.is_none())]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| name)
                    .collect();
                return Err(InventoryError::configuration(format!(
                    "required environment variables are not set: {}",
                    missing.join(", ")
                )));
            }
        };

        let mut config = Self::new(organization, token);

        if let Some(region) = get(REGION_VAR) {
            config.api_url = default_api_url(&region);
            config.region = region;
        }

        if let Some(url) = get(API_URL_VAR) {
            config = config.with_api_url(url)?;
        }

        if let Some(raw) = get(PAGE_SIZE_VAR) {
            let size = raw.parse::<u32>().map_err(|e| {
                InventoryError::configuration(format!("{PAGE_SIZE_VAR}: {raw:?} is not a number: {e}"))
            })?;
            config = config.with_page_size(size)?;
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw.parse::<u64>().map_err(|e| {
                InventoryError::configuration(format!("{TIMEOUT_VAR}: {raw:?} is not a number: {e}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(config)
    }

    /// Override the compute API base URL (trailing `/` is dropped).
    pub fn with_api_url(mut self, url: impl Into<String>) -> InventoryResult<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InventoryError::configuration(format!(
                "{API_URL_VAR}: {url:?} must start with http:// or https://"
            )));
        }
        self.api_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_page_size(mut self, size: u32) -> InventoryResult<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(InventoryError::configuration(format!(
                "{PAGE_SIZE_VAR}: {size} is outside 1..={MAX_PAGE_SIZE}"
            )));
        }
        self.page_size = size;
        Ok(self)
    }

    /// Per-request timeout; must be non-zero.
    pub fn with_timeout(mut self, timeout: Duration) -> InventoryResult<Self> {
        if timeout.is_zero() {
            return Err(InventoryError::configuration(format!("{TIMEOUT_VAR}: timeout must be non-zero")));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn servers_url(&self) -> String {
        format!("{}/servers", self.api_url)
    }
}

impl core::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .field("region", &self.region)
            .field("api_url", &self.api_url)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_api_url(region: &str) -> String {
    format!("https://cp-{region}.scaleway.com")
}

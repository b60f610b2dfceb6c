//! Compute API client for the server listing.

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;

use scwinv_core::InstanceRecord;

use super::{DirectoryError, ServerDirectory, ServerListing};
use crate::config::InventoryConfig;

const AUTH_HEADER: &str = "X-Auth-Token";
const TOTAL_COUNT_HEADER: &str = "x-total-count";
const USER_AGENT: &str = concat!("scaleway-inventory/", env!("CARGO_PKG_VERSION"));

/// Directory backed by the provider's compute API.
///
/// Walks `GET /servers?page=<p>&per_page=<n>` until every server has been
/// read. A failure on any page fails the whole listing.
#[derive(Debug, Clone)]
pub struct ScalewayDirectory {
    client: Client,
    config: InventoryConfig,
}

impl ScalewayDirectory {
    pub fn new(config: InventoryConfig) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    fn fetch_page(&self, page: u32) -> Result<(Vec<InstanceRecord>, Option<usize>), DirectoryError> {
        let resp = self
            .client
            .get(self.config.servers_url())
            .header(AUTH_HEADER, self.config.token())
            .query(&[
                ("organization", self.config.organization().to_string()),
                ("page", page.to_string()),
                ("per_page", self.config.page_size().to_string()),
            ])
            .send()
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        let status = resp.status();
        let total = total_count(resp.headers());
        let body = resp.text().map_err(|e| DirectoryError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok((ServerListing::parse(&body)?.servers, total))
    }
}

impl ServerDirectory for ScalewayDirectory {
    fn list_servers(&self) -> Result<Vec<InstanceRecord>, DirectoryError> {
        let per_page = self.config.page_size() as usize;
        let mut servers = Vec::new();
        let mut page = 1;

        loop {
            let (batch, total) = self.fetch_page(page)?;
            let received = batch.len();
            servers.extend(batch);

            tracing::debug!(page, received, total = ?total, "fetched server page");

            let done = match total {
                Some(total) => servers.len() >= total || received == 0,
                None => received < per_page,
            };
            if done {
                break;
            }
            page += 1;
        }

        tracing::info!(servers = servers.len(), pages = page, "server listing complete");
        Ok(servers)
    }
}

fn total_count(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn total_count_is_read_when_numeric() {
        let mut headers = HeaderMap::new();
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("42"));
        assert_eq!(total_count(&headers), Some(42));

        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("many"));
        assert_eq!(total_count(&headers), None);

        assert_eq!(total_count(&HeaderMap::new()), None);
    }

    #[test]
    fn user_agent_names_the_tool() {
        assert!(USER_AGENT.starts_with("scaleway-inventory/"));
    }
}

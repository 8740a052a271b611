//! Paginated permission-catalog loading

use reqwest::Method;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::{Result, RoleApiError};
use crate::types::{Page, PermissionDefinition, PermissionWire};

/// Ceiling on pages followed per collection walk; a `next` chain longer than
/// this is treated as a non-terminating server bug.
const MAX_PAGES: usize = 1_000;

impl super::RoleApiClient {
    /// Load the complete permission catalog
    ///
    /// Follows the collection's `next` links until the backend reports no
    /// further page and concatenates the results. All-or-nothing: if any page
    /// fails, the partial result is discarded and the whole load fails.
    pub async fn load_catalog(&self) -> Result<Vec<PermissionDefinition>> {
        let mut url = self.endpoint("permissions/")?;
        url.query_pairs_mut()
            .append_pair("page_size", &self.config.page_size.to_string());

        let mut definitions = Vec::new();
        let mut pages = 0usize;

        loop {
            let page: Page<PermissionWire> = self.fetch_page(url).await?;
            pages += 1;

            for wire in page.results {
                let id = wire.id;
                match wire.into_definition() {
                    Some(definition) => definitions.push(definition),
                    None => warn!("Skipping catalog entry {} with unknown operation", id),
                }
            }

            match page.next {
                Some(next) => {
                    if pages >= MAX_PAGES {
                        return Err(RoleApiError::CatalogUnavailable(format!(
                            "Pagination did not terminate after {} pages",
                            pages
                        )));
                    }
                    url = Url::parse(&next).map_err(|e| {
                        RoleApiError::CatalogUnavailable(format!(
                            "Invalid next-page link {}: {}",
                            next, e
                        ))
                    })?;
                }
                None => break,
            }
        }

        info!(
            "Loaded permission catalog: {} definitions across {} pages",
            definitions.len(),
            pages
        );
        Ok(definitions)
    }

    /// Fetch one page of the catalog collection
    async fn fetch_page(&self, url: Url) -> Result<Page<PermissionWire>> {
        debug!("Fetching collection page: {}", url);

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| RoleApiError::NetworkUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Collection page error: {} - {}", status, error_text);
            return Err(RoleApiError::CatalogUnavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RoleApiError::CatalogUnavailable(format!("Malformed page: {}", e)))
    }
}

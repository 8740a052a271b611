//! Role detail, listing, create and update calls

use reqwest::Method;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::{Result, RoleApiError};
use crate::types::{
    Page, Role, RoleDetail, RoleDetailWire, RoleGrant, RoleSummary, RoleSummaryWire, RoleUpdate,
};

impl super::RoleApiClient {
    /// Load one role's full detail (role fields plus its permission grant)
    pub async fn load_role_detail(&self, role_id: u64) -> Result<RoleDetail> {
        let url = self.endpoint(&format!("roles/{}/", role_id))?;
        debug!("Fetching role detail: {}", url);

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| RoleApiError::NetworkUnavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RoleApiError::RoleNotFound(role_id));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Role detail error: {} - {}", status, error_text);
            return Err(RoleApiError::NetworkUnavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let wire: RoleDetailWire = response
            .json()
            .await
            .map_err(|e| RoleApiError::Parse(e.to_string()))?;

        Ok(wire.into_detail())
    }

    /// Load one role's permission grant
    pub async fn load_role_grant(&self, role_id: u64) -> Result<RoleGrant> {
        Ok(self.load_role_detail(role_id).await?.grant)
    }

    /// List all roles, following pagination to exhaustion
    pub async fn list_roles(&self) -> Result<Vec<RoleSummary>> {
        let mut url = self.endpoint("roles/")?;
        url.query_pairs_mut()
            .append_pair("page_size", &self.config.page_size.to_string());

        let mut roles = Vec::new();

        loop {
            debug!("Fetching role list page: {}", url);

            let response = self
                .request(Method::GET, url)
                .send()
                .await
                .map_err(|e| RoleApiError::NetworkUnavailable(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                error!("Role list error: {} - {}", status, error_text);
                return Err(RoleApiError::NetworkUnavailable(format!(
                    "HTTP {}: {}",
                    status, error_text
                )));
            }

            let page: Page<RoleSummaryWire> = response
                .json()
                .await
                .map_err(|e| RoleApiError::Parse(e.to_string()))?;

            roles.extend(page.results.into_iter().map(RoleSummaryWire::into_summary));

            match page.next {
                Some(next) => {
                    url = Url::parse(&next)
                        .map_err(|e| RoleApiError::Parse(format!("Invalid next link: {}", e)))?;
                }
                None => break,
            }
        }

        Ok(roles)
    }

    /// Create a new role
    pub async fn create_role(&self, update: &RoleUpdate) -> Result<Role> {
        let url = self.endpoint("roles/")?;
        debug!("Creating role: {}", url);
        self.submit_role(Method::POST, url, update).await
    }

    /// Replace a role's fields and entire permission set
    ///
    /// The payload's permission list is absolute, not incremental — the
    /// backend replaces the role's permission set with exactly that list.
    pub async fn update_role(&self, role_id: u64, update: &RoleUpdate) -> Result<Role> {
        let url = self.endpoint(&format!("roles/{}/", role_id))?;
        debug!("Updating role {}: {}", role_id, url);
        self.submit_role(Method::PATCH, url, update).await
    }

    /// Shared create/update submit path
    async fn submit_role(&self, method: Method, url: Url, update: &RoleUpdate) -> Result<Role> {
        let response = self
            .request(method, url)
            .json(update)
            .send()
            .await
            .map_err(|e| RoleApiError::NetworkUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!("Role save rejected: {} - {}", status, detail);
            return Err(RoleApiError::SaveRejected {
                status: status.as_u16(),
                detail,
            });
        }

        let wire: RoleDetailWire = response
            .json()
            .await
            .map_err(|e| RoleApiError::Parse(e.to_string()))?;

        info!("Saved role {} ({})", wire.id, wire.name);
        Ok(wire.into_detail().role)
    }
}

//! Role-detail session: load orchestration and save coordination
//!
//! One session per open role-detail view. The session owns its matrix
//! exclusively; nothing is shared across sessions for different roles.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::RoleApiClient;
use crate::errors::{Result, RoleApiError};
use crate::matrix::{MatrixEditor, PermissionMatrix};
use crate::types::{Operation, PermissionDefinition, Role, RoleUpdate};

/// Orchestrates one role's catalog/grant load, matrix editing, and save
#[derive(Debug)]
pub struct RoleDetailSession {
    client: Arc<RoleApiClient>,
    role: Role,
    catalog: Vec<PermissionDefinition>,
    editor: MatrixEditor,
    generation: u64,
    save_in_flight: bool,
}

impl RoleDetailSession {
    /// Open a session for one role
    ///
    /// Catalog and role detail are fetched concurrently; the matrix is built
    /// only once both have completed. Either fetch failing fails the open —
    /// a matrix is never built from a partial catalog.
    pub async fn open(client: Arc<RoleApiClient>, role_id: u64) -> Result<Self> {
        let (catalog, detail) =
            tokio::join!(client.load_catalog(), client.load_role_detail(role_id));
        let catalog = catalog?;
        let detail = detail?;

        let matrix = PermissionMatrix::build(&catalog, &detail.grant);
        info!(
            "Opened role-detail session for role {} ({} resource types)",
            role_id,
            matrix.len()
        );

        Ok(Self {
            client,
            role: detail.role,
            catalog,
            editor: MatrixEditor::new(matrix),
            generation: 0,
            save_in_flight: false,
        })
    }

    /// Re-fetch catalog and grant and rebuild the matrix from scratch
    ///
    /// Bumps the request generation and returns it: a caller that captured
    /// [`generation`](Self::generation) before triggering a superseding load
    /// can compare afterwards and discard the stale response. Any pending
    /// edits are discarded along with the old matrix.
    pub async fn reload(&mut self) -> Result<u64> {
        self.generation += 1;
        let generation = self.generation;
        debug!(
            "Reloading role {} (generation {})",
            self.role.id, generation
        );

        let (catalog, detail) = tokio::join!(
            self.client.load_catalog(),
            self.client.load_role_detail(self.role.id)
        );
        let catalog = catalog?;
        let detail = detail?;

        self.catalog = catalog;
        self.role = detail.role;
        self.editor
            .replace(PermissionMatrix::build(&self.catalog, &detail.grant));
        Ok(generation)
    }

    /// The role as last confirmed by the backend
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// The catalog this session's matrix was built against
    pub fn catalog(&self) -> &[PermissionDefinition] {
        &self.catalog
    }

    /// The live matrix
    pub fn matrix(&self) -> &PermissionMatrix {
        self.editor.matrix()
    }

    /// Current request generation, for stale-response discard
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the editor is in edit mode (UI gating flag)
    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Whether a save is currently in flight (UI gating flag)
    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// Enter edit mode, snapshotting the matrix as the rollback point
    pub fn begin_edit(&mut self) {
        self.editor.begin_edit();
    }

    /// Leave edit mode, discarding all toggles since [`begin_edit`](Self::begin_edit)
    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    /// Flip one cell; see [`MatrixEditor::toggle`]
    pub fn toggle(&mut self, resource_type: &str, operation: Operation) -> bool {
        self.editor.toggle(resource_type, operation)
    }

    /// Persist the edited matrix as the role's complete permission set
    ///
    /// Builds the absolute permission id list from the checked cells (an
    /// empty list is valid and means the role has no permissions) and issues
    /// the update. On success the edited matrix becomes the new baseline and
    /// the updated role replaces the held one. On failure every toggle is
    /// preserved so the user can retry without re-toggling.
    pub async fn save(&mut self) -> Result<()> {
        if self.save_in_flight {
            return Err(RoleApiError::SaveInFlight);
        }
        if !self.editor.is_editing() {
            debug!("Save requested outside edit mode, nothing to do");
            return Ok(());
        }

        let update = RoleUpdate {
            name: self.role.name.clone(),
            staff_type: self.role.staff_type,
            permission_ids: self.editor.checked_permission_ids(),
            controlled_group_ids: self.role.controlled_group_ids.clone(),
        };

        self.save_in_flight = true;
        let result = self.client.update_role(self.role.id, &update).await;
        self.save_in_flight = false;

        match result {
            Ok(updated) => {
                self.role = updated;
                self.editor.commit_saved();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

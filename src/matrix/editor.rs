//! In-memory matrix editing with an edit-mode gate

use tracing::debug;

use crate::types::Operation;

use super::builder::PermissionMatrix;

/// Editor over one role's permission matrix
///
/// Two states: Viewing (read-only) and Editing (mutations allowed). Entering
/// edit mode snapshots the matrix as the rollback point; cancel restores it
/// exactly, a committed save promotes the edited matrix to the new baseline.
#[derive(Debug, Clone, Default)]
pub struct MatrixEditor {
    matrix: PermissionMatrix,
    snapshot: Option<PermissionMatrix>,
}

impl MatrixEditor {
    /// Editor seeded with a freshly built matrix, in Viewing state
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            matrix,
            snapshot: None,
        }
    }

    /// The live matrix
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Whether mutations are currently allowed — the UI gating flag
    pub fn is_editing(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Viewing -> Editing; snapshots the matrix as the rollback point
    ///
    /// No-op when already editing: the original snapshot stays the rollback
    /// point.
    pub fn begin_edit(&mut self) {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.matrix.clone());
            debug!("Matrix edit session started");
        }
    }

    /// Editing -> Viewing, discarding all mutations
    ///
    /// Restores the snapshot taken on entry to edit mode. No-op in Viewing
    /// state.
    pub fn cancel_edit(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.matrix = snapshot;
            debug!("Matrix edit session cancelled, snapshot restored");
        }
    }

    /// Flip one cell's checked flag
    ///
    /// Only legal in Editing state and only on cells backed by a catalog id;
    /// both violations are defensive no-ops (the UI should never expose such
    /// a control). Cells are fully independent — no cascading rule links
    /// operations. Returns whether a flip happened.
    pub fn toggle(&mut self, resource_type: &str, operation: Operation) -> bool {
        if self.snapshot.is_none() {
            return false;
        }
        match self.matrix.cell_mut(resource_type, operation) {
            Some(cell) if cell.permission_id.is_some() => {
                cell.checked = !cell.checked;
                true
            }
            _ => false,
        }
    }

    /// Ids to send on save: every checked cell's catalog id, sorted, deduped
    pub fn checked_permission_ids(&self) -> Vec<u64> {
        self.matrix.checked_permission_ids()
    }

    /// Editing -> Viewing after a successful save
    ///
    /// The edited matrix becomes the new baseline; the pre-edit snapshot is
    /// discarded.
    pub fn commit_saved(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("Matrix edit session committed");
        }
    }

    /// Install a freshly rebuilt matrix, resetting to Viewing state
    pub fn replace(&mut self, matrix: PermissionMatrix) {
        self.matrix = matrix;
        self.snapshot = None;
    }
}

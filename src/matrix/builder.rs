//! Matrix construction from (catalog, grant)

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::types::{Operation, PermissionDefinition, RoleGrant};

/// One cell of the permission matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixCell {
    /// Whether the role currently has this permission
    pub checked: bool,
    /// Catalog id backing this cell, `None` when no such (resource type,
    /// operation) combination exists in the catalog
    pub permission_id: Option<u64>,
}

/// One matrix row: the four operation cells of a resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixRow {
    cells: [MatrixCell; 4],
}

impl MatrixRow {
    /// Cell for one operation
    pub fn cell(&self, operation: Operation) -> &MatrixCell {
        &self.cells[operation.index()]
    }

    pub(crate) fn cell_mut(&mut self, operation: Operation) -> &mut MatrixCell {
        &mut self.cells[operation.index()]
    }
}

/// Keyed lookup over one catalog load
///
/// Joining catalog and grants is a single map lookup here rather than a
/// repeated linear scan over the definition list.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_key: HashMap<(String, Operation), u64>,
    by_id: HashMap<u64, (String, Operation)>,
}

impl CatalogIndex {
    /// Build the index in one pass over the catalog
    ///
    /// The catalog invariant says at most one definition exists per
    /// (resource type, operation) pair; a duplicate overwrites the earlier
    /// entry rather than failing the load.
    pub fn new(catalog: &[PermissionDefinition]) -> Self {
        let mut by_key = HashMap::with_capacity(catalog.len());
        let mut by_id = HashMap::with_capacity(catalog.len());

        for definition in catalog {
            let key = (definition.resource_type.clone(), definition.operation);
            if let Some(previous) = by_key.insert(key, definition.id) {
                warn!(
                    "Duplicate catalog entry for ({}, {}): id {} replaces id {}",
                    definition.resource_type,
                    definition.operation.as_str(),
                    definition.id,
                    previous
                );
                by_id.remove(&previous);
            }
            by_id.insert(
                definition.id,
                (definition.resource_type.clone(), definition.operation),
            );
        }

        Self { by_key, by_id }
    }

    /// Catalog id for a (resource type, operation) pair
    pub fn id_for(&self, resource_type: &str, operation: Operation) -> Option<u64> {
        self.by_key
            .get(&(resource_type.to_string(), operation))
            .copied()
    }

    /// (resource type, operation) pair for a catalog id
    pub fn key_for(&self, id: u64) -> Option<(&str, Operation)> {
        self.by_id.get(&id).map(|(t, op)| (t.as_str(), *op))
    }

    /// Number of indexed definitions
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog was empty
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Dense permission matrix for one role
///
/// Built fresh from (catalog, grant) on every load, never merged from a
/// prior matrix. Row iteration order carries no meaning; display code wanting
/// stable order uses [`sorted_resource_types`](Self::sorted_resource_types).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    rows: HashMap<String, MatrixRow>,
}

impl PermissionMatrix {
    /// Build the matrix from a catalog and one role's grant
    ///
    /// Pure and idempotent: the same inputs always yield element-wise
    /// identical matrices. Granted ids absent from the catalog are orphans
    /// and are dropped silently (the catalog is authoritative).
    pub fn build(catalog: &[PermissionDefinition], grant: &RoleGrant) -> Self {
        let index = CatalogIndex::new(catalog);
        let mut rows: HashMap<String, MatrixRow> = HashMap::new();

        for definition in catalog {
            let row = rows.entry(definition.resource_type.clone()).or_default();
            row.cell_mut(definition.operation).permission_id = Some(definition.id);
        }

        let mut orphaned = 0usize;
        for &id in &grant.granted_permission_ids {
            match index.key_for(id) {
                Some((resource_type, operation)) => {
                    if let Some(row) = rows.get_mut(resource_type) {
                        row.cell_mut(operation).checked = true;
                    }
                }
                None => orphaned += 1,
            }
        }
        if orphaned > 0 {
            debug!(
                "Dropped {} orphaned grant id(s) for role {} not present in catalog",
                orphaned, grant.role_id
            );
        }

        Self { rows }
    }

    /// Row for one resource type
    pub fn row(&self, resource_type: &str) -> Option<&MatrixRow> {
        self.rows.get(resource_type)
    }

    /// Cell for one (resource type, operation)
    pub fn cell(&self, resource_type: &str, operation: Operation) -> Option<&MatrixCell> {
        self.rows.get(resource_type).map(|row| row.cell(operation))
    }

    pub(crate) fn cell_mut(
        &mut self,
        resource_type: &str,
        operation: Operation,
    ) -> Option<&mut MatrixCell> {
        self.rows
            .get_mut(resource_type)
            .map(|row| row.cell_mut(operation))
    }

    /// Resource types in case-sensitive alphabetical order, for display
    pub fn sorted_resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Ids of all checked cells: sorted, duplicate-free
    ///
    /// This is the complete, absolute permission list a save sends — the
    /// backend replaces the role's permission set with exactly this list.
    pub fn checked_permission_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .rows
            .values()
            .flat_map(|row| Operation::ALL.iter().map(move |op| row.cell(*op)))
            .filter(|cell| cell.checked)
            .filter_map(|cell| cell.permission_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of resource-type rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

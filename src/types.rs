//! Domain types and wire DTOs for the role administration API

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The four CRUD-style actions a permission can grant over a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read access
    View,
    /// Create access
    Add,
    /// Update access
    Change,
    /// Delete access
    Delete,
}

impl Operation {
    /// All operations, in display order
    pub const ALL: [Operation; 4] = [
        Operation::View,
        Operation::Add,
        Operation::Change,
        Operation::Delete,
    ];

    /// Wire name of the operation
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Add => "add",
            Operation::Change => "change",
            Operation::Delete => "delete",
        }
    }

    /// Parse the backend's `operation_name` string (case-sensitive)
    pub fn parse(name: &str) -> Option<Operation> {
        match name {
            "view" => Some(Operation::View),
            "add" => Some(Operation::Add),
            "change" => Some(Operation::Change),
            "delete" => Some(Operation::Delete),
            _ => None,
        }
    }

    /// Stable index into a matrix row's cell array
    pub(crate) fn index(self) -> usize {
        match self {
            Operation::View => 0,
            Operation::Add => 1,
            Operation::Change => 2,
            Operation::Delete => 3,
        }
    }
}

/// Staff category a role applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffType {
    /// Teaching staff only
    Teaching,
    /// Non-teaching staff only
    #[serde(rename = "Non-Teaching")]
    NonTeaching,
    /// Both staff categories
    Both,
}

impl Default for StaffType {
    fn default() -> Self {
        StaffType::Both
    }
}

/// One entry of the server-defined permission catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDefinition {
    /// Server-assigned id, stable across requests
    pub id: u64,
    /// Entity/module the permission governs (e.g. "Inventory")
    pub resource_type: String,
    /// Action the permission grants
    pub operation: Operation,
}

/// The permission subset currently assigned to one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    /// Role the grant belongs to
    pub role_id: u64,
    /// Catalog ids assigned to the role
    pub granted_permission_ids: HashSet<u64>,
    /// Staff category of the role
    pub staff_type: StaffType,
}

/// A role as the backend stores it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Server-assigned id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Staff category
    pub staff_type: StaffType,
    /// Controlled group ids (currently always empty in practice)
    pub controlled_group_ids: Vec<u64>,
}

/// Role listing entry (no permission detail)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    /// Server-assigned id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Staff category
    pub staff_type: StaffType,
}

/// Create/update payload for a role
///
/// The permission list is absolute: the backend replaces the role's entire
/// permission set with exactly `permission_ids`. An empty list is valid and
/// means the role has no permissions.
#[derive(Debug, Clone, Serialize)]
pub struct RoleUpdate {
    /// Display name
    pub name: String,
    /// Staff category
    pub staff_type: StaffType,
    /// Complete permission id list to grant
    #[serde(rename = "permissions_id")]
    pub permission_ids: Vec<u64>,
    /// Controlled group ids
    #[serde(rename = "controlled_groups_id")]
    pub controlled_group_ids: Vec<u64>,
}

/// Full role detail as loaded from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDetail {
    /// The role itself
    pub role: Role,
    /// Its current permission grant
    pub grant: RoleGrant,
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Paginated collection envelope as the backend emits it
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total result count across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// Absolute URL of the next page, `null` on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// This page's items
    pub results: Vec<T>,
}

/// Catalog entry as the backend emits it
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionWire {
    /// Permission id
    pub id: u64,
    /// Resource type name
    pub type_name: String,
    /// Operation name ("view" | "add" | "change" | "delete")
    pub operation_name: String,
}

impl PermissionWire {
    /// Convert to a domain definition
    ///
    /// Returns `None` when `operation_name` is not one of the four CRUD
    /// operations; such entries do not fit the matrix and the caller skips
    /// them.
    pub fn into_definition(self) -> Option<PermissionDefinition> {
        let operation = Operation::parse(&self.operation_name)?;
        Some(PermissionDefinition {
            id: self.id,
            resource_type: self.type_name,
            operation,
        })
    }
}

/// `group_type` object on role payloads
#[derive(Debug, Clone, Deserialize)]
pub struct GroupTypeWire {
    /// Staff category string ("Teaching" | "Non-Teaching" | "Both")
    #[serde(rename = "type")]
    pub staff_type: StaffType,
}

/// Role detail as the backend emits it
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDetailWire {
    /// Role id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Granted permissions, full catalog entries
    #[serde(default)]
    pub permissions: Vec<PermissionWire>,
    /// Staff category; absent defaults to Both
    #[serde(default)]
    pub group_type: Option<GroupTypeWire>,
    /// Controlled group ids
    #[serde(default)]
    pub controlled_groups_id: Vec<u64>,
}

impl RoleDetailWire {
    /// Convert to domain role + grant
    pub fn into_detail(self) -> RoleDetail {
        let staff_type = self
            .group_type
            .map(|g| g.staff_type)
            .unwrap_or_default();
        let granted_permission_ids: HashSet<u64> =
            self.permissions.into_iter().map(|p| p.id).collect();

        RoleDetail {
            role: Role {
                id: self.id,
                name: self.name,
                staff_type,
                controlled_group_ids: self.controlled_groups_id,
            },
            grant: RoleGrant {
                role_id: self.id,
                granted_permission_ids,
                staff_type,
            },
        }
    }
}

/// Role listing entry as the backend emits it
#[derive(Debug, Clone, Deserialize)]
pub struct RoleSummaryWire {
    /// Role id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Staff category; absent defaults to Both
    #[serde(default)]
    pub group_type: Option<GroupTypeWire>,
}

impl RoleSummaryWire {
    /// Convert to a domain summary
    pub fn into_summary(self) -> RoleSummary {
        RoleSummary {
            id: self.id,
            name: self.name,
            staff_type: self.group_type.map(|g| g.staff_type).unwrap_or_default(),
        }
    }
}

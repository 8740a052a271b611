//! # rolematrix
//!
//! Async client for the role and permission administration API of a
//! school-management platform, plus the pure in-memory permission-matrix
//! reconciliation logic that sits on top of it.
//!
//! The backend defines a catalog of permissions (one per resource type and
//! CRUD operation) and assigns each role a subset of catalog ids. This crate
//! merges the two into a dense, editable matrix, governs edit/cancel/save
//! semantics over it, and translates the result back into the flat permission
//! id list the backend expects.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rolematrix::{ApiConfig, Operation, RoleApiClient, RoleDetailSession};
//!
//! #[tokio::main]
//! async fn main() -> rolematrix::Result<()> {
//!     let config = ApiConfig::new("https://school.example/api/")
//!         .with_auth_token("token");
//!     let client = Arc::new(RoleApiClient::new(config)?);
//!
//!     // Catalog and role grant load concurrently; the matrix is built once
//!     // both complete.
//!     let mut session = RoleDetailSession::open(client, 7).await?;
//!
//!     session.begin_edit();
//!     session.toggle("Inventory", Operation::Change);
//!     session.save().await?;
//!
//!     for resource_type in session.matrix().sorted_resource_types() {
//!         let row = session.matrix().row(resource_type).unwrap();
//!         println!("{}: view={}", resource_type, row.cell(Operation::View).checked);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod errors;
pub mod matrix;
pub mod session;
pub mod types;

// Re-export main types
pub use client::RoleApiClient;
pub use config::ApiConfig;
pub use errors::{Result, RoleApiError};
pub use matrix::{CatalogIndex, MatrixCell, MatrixEditor, MatrixRow, PermissionMatrix};
pub use session::RoleDetailSession;
pub use types::{
    Operation, PermissionDefinition, Role, RoleDetail, RoleGrant, RoleSummary, RoleUpdate,
    StaffType,
};

//! Permission matrix construction and in-memory editing
//!
//! The matrix is the dense, UI-friendly structure produced by pairing the
//! permission catalog with one role's grant: one row per resource type, one
//! boolean+id cell per operation.

mod builder;
mod editor;

pub use builder::{CatalogIndex, MatrixCell, MatrixRow, PermissionMatrix};
pub use editor::MatrixEditor;

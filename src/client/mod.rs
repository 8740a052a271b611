//! HTTP client for the role administration API

mod catalog;
mod client;
mod roles;

pub use client::RoleApiClient;

//! Azure authentication and management API traversal.
//!
//! This module handles all provider-facing operations:
//! - [`auth`] - Credential resolution and token acquisition
//! - [`rest`] - Management REST client with pagination
//! - [`inventory`] - Subscription/group/resource traversal

pub mod auth;
mod inventory;
mod rest;

// Re-export public types and functions
pub use inventory::collect;
pub use rest::MgmtClient;

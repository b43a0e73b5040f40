//! Shared role-listing domain primitives.
//!
//! This crate owns the page and summary contracts plus the deterministic
//! pagination drain. It intentionally excludes AWS SDK and Lambda runtime
//! concerns; those live in `iam_role_lister_lambda`.

pub mod contract;
pub mod error;
pub mod pagination;

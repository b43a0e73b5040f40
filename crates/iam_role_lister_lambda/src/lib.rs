//! AWS-oriented adapters and handlers for listing IAM roles from Lambda.
//!
//! This crate owns runtime integration details (Lambda handler, IAM page
//! adapter, environment configuration and logging setup) and re-exports the
//! domain primitives from `iam_role_lister_core` through a single `runtime`
//! module boundary.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;

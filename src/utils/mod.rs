//! Shared utilities.
//!
//! - [`permitted_params`]: Request parameters filtered through an allowlist

pub mod permitted_params;

pub use permitted_params::PermittedParams;

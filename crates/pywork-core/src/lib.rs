//! pywork core: config, package manifests, sibling discovery, dependency
//! closure, observability.
//!
//! Everything here is filesystem-only; subprocess execution (venv, pip,
//! pytest) lives in the `pywork` binary crate.

pub mod config;
pub mod observability;
pub mod package;

//! Package model: manifests, sibling discovery, dependency closure.

pub mod closure;
pub mod manifest;
pub mod siblings;

pub use closure::{ClosureError, ClosureMember, DependencyClosure};
pub use manifest::{ManifestError, Requirement};

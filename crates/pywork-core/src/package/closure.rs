//! Dependency closure: depth-first traversal over local sibling dependencies.
//!
//! The closure is stored in install order (post-order: dependencies before
//! dependents, bottom-up). Clean order is the reverse (top-down). Each
//! package appears once; cycles are cut at the first revisit.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::manifest::{self, ManifestError};
use super::siblings;

/// One package in the closure.
#[derive(Debug, Clone, Serialize)]
pub struct ClosureMember {
    /// Directory name of the checkout.
    pub name: String,
    /// Absolute package directory.
    pub root: PathBuf,
    /// Declared dependencies resolved to sibling checkouts (directory names).
    pub local_deps: Vec<String>,
    /// Declared dependencies left to the package manager.
    pub remote_deps: Vec<String>,
}

/// The dependency closure of a root package, in install order (root last).
#[derive(Debug, Clone, Serialize)]
pub struct DependencyClosure {
    members: Vec<ClosureMember>,
}

#[derive(Debug, Error)]
pub enum ClosureError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to resolve package directory {}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DependencyClosure {
    /// Build the closure for the package at `root`.
    ///
    /// The root package must have a manifest; siblings without one are still
    /// closure members (they just contribute no further dependencies).
    pub fn resolve(root: &Path) -> Result<Self, ClosureError> {
        let root = root.canonicalize().map_err(|e| ClosureError::Resolve {
            path: root.to_path_buf(),
            source: e,
        })?;
        if manifest::find_manifest(&root).is_none() {
            return Err(ManifestError::NotFound(root).into());
        }

        let mut visited = HashSet::new();
        let mut members = Vec::new();
        visit(&root, &mut visited, &mut members)?;
        Ok(Self { members })
    }

    /// The package the closure was resolved for.
    pub fn root(&self) -> &ClosureMember {
        self.members.last().expect("closure always contains its root")
    }

    /// Members bottom-up: every dependency precedes its dependents.
    pub fn install_order(&self) -> impl Iterator<Item = &ClosureMember> {
        self.members.iter()
    }

    /// Members top-down: the root first, leaves last.
    pub fn clean_order(&self) -> impl Iterator<Item = &ClosureMember> {
        self.members.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Content hash of the editable-install set.
    ///
    /// Member paths are **sorted** before hashing so the hash depends only on
    /// which checkouts are installed, not on traversal order.
    pub fn install_set_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut roots: Vec<String> = self
            .members
            .iter()
            .map(|m| m.root.to_string_lossy().to_string())
            .collect();
        roots.sort();

        let mut hasher = Sha256::new();
        for root in roots {
            hasher.update(root.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

fn visit(
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
    members: &mut Vec<ClosureMember>,
) -> Result<(), ClosureError> {
    if !visited.insert(dir.to_path_buf()) {
        return Ok(());
    }

    let requirements = match manifest::find_manifest(dir) {
        Some(m) => manifest::parse_requirements(&m)?,
        None => {
            tracing::debug!(dir = %dir.display(), "sibling has no manifest; treating as leaf");
            Vec::new()
        }
    };

    let mut local_deps = Vec::new();
    let mut remote_deps = Vec::new();
    for req in requirements {
        match siblings::find_sibling(dir, &req.name) {
            Some(sibling) => {
                let sibling = sibling.canonicalize().map_err(|e| ClosureError::Resolve {
                    path: sibling.clone(),
                    source: e,
                })?;
                local_deps.push(
                    sibling
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string(),
                );
                visit(&sibling, visited, members)?;
            }
            None => remote_deps.push(req.name),
        }
    }

    members.push(ClosureMember {
        name: dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        root: dir.to_path_buf(),
        local_deps,
        remote_deps,
    });
    Ok(())
}

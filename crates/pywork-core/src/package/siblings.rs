//! Sibling directory discovery.
//!
//! A declared dependency is *local* iff a matching directory exists next to
//! the current package (same parent). Matching is by exact directory name
//! first, then by normalized name comparison.

use std::fs;
use std::path::{Path, PathBuf};

/// Normalize a distribution name for comparison: lowercase, with runs of
/// `-`, `_` and `.` collapsed to a single `-` (PEP 503 style).
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !prev_sep {
                out.push('-');
                prev_sep = true;
            }
        } else {
            out.extend(c.to_lowercase());
            prev_sep = false;
        }
    }
    out
}

/// Find the sibling directory for `dep_name` next to `package_dir`.
///
/// Exact directory name wins; otherwise siblings are scanned in sorted order
/// and compared by normalized name. The package's own directory is skipped.
pub fn find_sibling(package_dir: &Path, dep_name: &str) -> Option<PathBuf> {
    let parent = package_dir.parent()?;

    let direct = parent.join(dep_name);
    if direct.is_dir() && direct != *package_dir {
        return Some(direct);
    }

    let want = normalize_name(dep_name);
    let entries = fs::read_dir(parent).ok()?;
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());
    for entry in children {
        let p = entry.path();
        if !p.is_dir() || p == *package_dir {
            continue;
        }
        if normalize_name(&entry.file_name().to_string_lossy()) == want {
            return Some(p);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Service_Control.Data"), "service-control-data");
        assert_eq!(normalize_name("requests"), "requests");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
    }

    #[test]
    fn test_find_sibling_exact() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("app");
        let dep = tmp.path().join("libfoo");
        fs::create_dir_all(&pkg).unwrap();
        fs::create_dir_all(&dep).unwrap();

        assert_eq!(find_sibling(&pkg, "libfoo"), Some(dep));
    }

    #[test]
    fn test_find_sibling_normalized() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("app");
        let dep = tmp.path().join("lib_foo");
        fs::create_dir_all(&pkg).unwrap();
        fs::create_dir_all(&dep).unwrap();

        // Dependency declared as "lib-foo", checkout directory is "lib_foo".
        assert_eq!(find_sibling(&pkg, "lib-foo"), Some(dep));
    }

    #[test]
    fn test_find_sibling_absent_is_remote() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("app");
        fs::create_dir_all(&pkg).unwrap();

        assert_eq!(find_sibling(&pkg, "requests"), None);
    }

    #[test]
    fn test_find_sibling_never_self() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("app");
        fs::create_dir_all(&pkg).unwrap();

        assert_eq!(find_sibling(&pkg, "app"), None);
    }
}

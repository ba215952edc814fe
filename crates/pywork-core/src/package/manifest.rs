//! Package manifest location and dependency extraction.
//!
//! Dependencies are extracted by scanning manifest lines for requirement
//! entries shaped like `name>=version`. This deliberately avoids a full
//! TOML/INI parse: both `pyproject.toml` dependency arrays and `setup.cfg`
//! `install_requires` blocks keep one requirement per line, and the line
//! scan treats them uniformly.

use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest files probed in a package directory, in priority order.
pub const MANIFEST_FILES: &[&str] = &["pyproject.toml", "setup.cfg"];

/// A declared dependency extracted from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Distribution name, `[extras]` stripped.
    pub name: String,
    /// The raw requirement entry as matched, e.g. `requests>=2.28`.
    pub spec: String,
}

/// Errors from manifest location and parsing.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no package manifest (pyproject.toml or setup.cfg) in {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Find the package manifest in `dir`, probing `MANIFEST_FILES` in order.
pub fn find_manifest(dir: &Path) -> Option<PathBuf> {
    MANIFEST_FILES
        .iter()
        .map(|f| dir.join(f))
        .find(|p| p.is_file())
}

/// Extract declared dependencies from a manifest file.
///
/// Scans each non-comment line for `name <op> version` entries. Duplicate
/// names keep their first occurrence. Examples of matched lines:
///
///   - `    "requests>=2.28",` (pyproject dependency array)
///   - `    attrs >= 21.2` (setup.cfg install_requires block)
///   - `    pydantic[email]~=2.0` (extras are stripped from the name)
pub fn parse_requirements(manifest_path: &Path) -> Result<Vec<Requirement>, ManifestError> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| ManifestError::Read {
        path: manifest_path.to_path_buf(),
        source: e,
    })?;
    Ok(scan_requirement_lines(&content))
}

/// Find the manifest in `dir` and extract its declared dependencies.
pub fn package_requirements(dir: &Path) -> Result<Vec<Requirement>, ManifestError> {
    let manifest =
        find_manifest(dir).ok_or_else(|| ManifestError::NotFound(dir.to_path_buf()))?;
    parse_requirements(&manifest)
}

fn scan_requirement_lines(content: &str) -> Vec<Requirement> {
    let re = Regex::new(
        r"([A-Za-z0-9][A-Za-z0-9._-]*)(\[[A-Za-z0-9.,_\s-]*\])?\s*(==|>=|<=|~=|!=|>|<)\s*([0-9][0-9A-Za-z.*+!-]*)",
    )
    .expect("requirement regex is valid");

    let mut seen = std::collections::HashSet::new();
    let mut requirements = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        for cap in re.captures_iter(trimmed) {
            let name = cap[1].to_string();
            if !seen.insert(name.to_lowercase()) {
                continue;
            }
            let spec = cap[0].trim().to_string();
            requirements.push(Requirement { name, spec });
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_pyproject_dependency_array() {
        let content = r#"
[project]
name = "service-control"
requires-python = ">=3.9"
dependencies = [
    "service-control-data>=1.2",
    "pymongo >= 4.0",
]
"#;
        let reqs = scan_requirement_lines(content);
        let names: Vec<_> = reqs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["service-control-data", "pymongo"]);
    }

    #[test]
    fn test_scan_setup_cfg_install_requires() {
        let content = "\
[options]
python_requires = >=3.9
install_requires =
    enough-tools>=0.4
    attrs >= 21.2
";
        let reqs = scan_requirement_lines(content);
        let names: Vec<_> = reqs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["enough-tools", "attrs"]);
    }

    #[test]
    fn test_scan_skips_requires_python() {
        // "requires-python" / "python_requires" lines carry a bare version
        // range and must not produce a requirement.
        let reqs = scan_requirement_lines("requires-python = \">=3.9\"\n");
        assert!(reqs.is_empty());
    }

    #[test]
    fn test_scan_strips_extras() {
        let reqs = scan_requirement_lines("    \"pydantic[email]~=2.0\",\n");
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].name, "pydantic");
    }

    #[test]
    fn test_scan_skips_comments_and_dedups() {
        let content = "\
# requests>=2.0 in a comment does not count
requests>=2.28
requests>=2.30
";
        let reqs = scan_requirement_lines(content);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].spec, "requests>=2.28");
    }

    #[test]
    fn test_find_manifest_priority() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("setup.cfg"), "[metadata]\n").unwrap();
        assert!(find_manifest(tmp.path())
            .unwrap()
            .ends_with("setup.cfg"));
        fs::write(tmp.path().join("pyproject.toml"), "[project]\n").unwrap();
        assert!(find_manifest(tmp.path())
            .unwrap()
            .ends_with("pyproject.toml"));
    }

    #[test]
    fn test_package_requirements_missing_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let err = package_requirements(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound(_)));
    }
}

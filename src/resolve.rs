//! Turns the user supplied root and exclusion list into absolute paths.

use crate::error::AicatError;
use crate::options::OUTPUT_FILE_NAME;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Canonical locations for a single run.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedPaths {
    pub root: PathBuf,
    pub output: PathBuf,
    pub excluded: Vec<PathBuf>,
}

impl ResolvedPaths {
    pub fn resolve(root: &Path, exclude: &[String]) -> Result<Self, AicatError> {
        let root = resolve_root(root)?;
        let excluded = exclude
            .iter()
            .map(|dir| resolve_lenient(&root.join(dir.trim())))
            .collect();
        Ok(Self {
            output: root.join(OUTPUT_FILE_NAME),
            root,
            excluded,
        })
    }
}

/// Canonicalizes the root, which must be an existing directory.
pub(crate) fn resolve_root(root: &Path) -> Result<PathBuf, AicatError> {
    match fs::canonicalize(root) {
        Ok(path) if path.is_dir() => Ok(path),
        Ok(path) => Err(AicatError::DirectoryNotFound { path }),
        Err(_) => Err(AicatError::DirectoryNotFound {
            path: resolve_lenient(root),
        }),
    }
}

/// Canonicalizes `path` when it exists. Otherwise the deepest existing
/// ancestor is canonicalized and the rest is appended lexically.
pub(crate) fn resolve_lenient(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let normalized = normalize_lexically(&absolute);
    let mut existing = normalized.as_path();
    let mut rest = Vec::new();
    while let Some(parent) = existing.parent() {
        if let Some(name) = existing.file_name() {
            rest.push(name.to_os_string());
        }
        existing = parent;
        if let Ok(mut resolved) = fs::canonicalize(existing) {
            resolved.extend(rest.iter().rev());
            return resolved;
        }
    }
    normalized
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_root_is_reported_with_absolute_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        match resolve_root(&missing) {
            Err(AicatError::DirectoryNotFound { path }) => {
                assert!(path.is_absolute());
                assert!(path.ends_with("nope"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            resolve_root(&file),
            Err(AicatError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn exclusions_resolve_under_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let resolved =
            ResolvedPaths::resolve(dir.path(), &[" sub ".to_string(), "ghost".to_string()])
                .unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(resolved.root, root);
        assert_eq!(resolved.output, root.join("ai-context.txt"));
        assert_eq!(resolved.excluded, vec![root.join("sub"), root.join("ghost")]);
    }

    #[test]
    fn lenient_resolution_folds_parent_components() {
        let dir = tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let resolved = resolve_lenient(&root.join("missing/../other"));
        assert_eq!(resolved, root.join("other"));
    }
}

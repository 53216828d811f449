use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File(PathBuf),
    Directory(PathBuf),
    Other(PathBuf), // symlink, device, etc.
}

impl EntryKind {
    pub fn path(&self) -> &Path {
        match self {
            EntryKind::File(path) | EntryKind::Directory(path) | EntryKind::Other(path) => path,
        }
    }
}

/// Entries of `path` (not recursive), sorted by path.
pub fn list_dir<P: AsRef<Path>>(path: P) -> Result<Vec<EntryKind>> {
    let entries = fs::read_dir(path.as_ref())
        .with_context(|| format!("Failed to read directory: {}", path.as_ref().display()))?;

    let mut results = Vec::new();

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks, so a link to a media file counts as a file.
        let metadata = fs::metadata(&path);

        let kind = match metadata {
            Ok(m) if m.is_file() => EntryKind::File(path),
            Ok(m) if m.is_dir() => EntryKind::Directory(path),
            _ => EntryKind::Other(path),
        };

        results.push(kind);
    }

    results.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(results)
}

/// Case-insensitive extension check, `extension` given without the dot.
pub fn has_extension(path: impl AsRef<Path>, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// `file_name` with its last extension removed, keeping any parent
/// directories, e.g. `season 1/Show` for `season 1/Show.m4v`.
pub fn strip_extension(file_name: &str) -> PathBuf {
    Path::new(file_name).with_extension("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_extension("a.m4v", "m4v"));
        assert!(has_extension("a.M4V", "m4v"));
        assert!(has_extension("dir/a.b.M4v", ".m4v"));
        assert!(!has_extension("a.mp4", "m4v"));
        assert!(!has_extension("m4v", "m4v"));
        assert!(!has_extension("a.m4v.part", "m4v"));
    }

    #[test]
    fn strip_extension_drops_last_extension_only() {
        assert_eq!(strip_extension("Show S01.m4v"), Path::new("Show S01"));
        assert_eq!(strip_extension("a.b.m4v"), Path::new("a.b"));
        assert_eq!(strip_extension("noext"), Path::new("noext"));
        assert_eq!(strip_extension("season 1/x.m4v"), Path::new("season 1/x"));
    }

    #[test]
    fn list_dir_sorts_and_classifies() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.m4v"), b"").unwrap();
        fs::write(dir.path().join("a.m4v"), b"").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let entries = list_dir(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                EntryKind::File(dir.path().join("a.m4v")),
                EntryKind::File(dir.path().join("b.m4v")),
                EntryKind::Directory(dir.path().join("c")),
            ]
        );
    }

    #[test]
    fn list_dir_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_dir(dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("Failed to read directory"));
    }
}

//! Input discovery for batch conversion
//!
//! Expands command-line inputs into a sorted, de-duplicated list of XYZ
//! files. Each input may be a file, a directory (searched recursively) or a
//! glob pattern.

use crate::constants::XYZ_EXTENSION;
use crate::error::{Result, XyzError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Expand `inputs` into the XYZ files they name
pub fn discover_xyz_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            let before = files.len();
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_file() && is_xyz_file(entry.path()) {
                    files.insert(entry.into_path());
                }
            }
            debug!(
                "Found {} XYZ files under {}",
                files.len() - before,
                input.display()
            );
        } else if input.is_file() {
            files.insert(input.clone());
        } else if is_glob_pattern(input) {
            let pattern = input.to_string_lossy();
            let paths = glob::glob(&pattern).map_err(|e| {
                XyzError::configuration(format!("invalid glob pattern '{}': {}", pattern, e))
            })?;

            let mut matched = 0;
            for path in paths {
                let path = path.map_err(std::io::Error::from)?;
                if path.is_file() {
                    files.insert(path);
                    matched += 1;
                }
            }
            if matched == 0 {
                warn!("Pattern '{}' matched no files", pattern);
            }
        } else {
            return Err(XyzError::FileNotFound {
                path: input.clone(),
            });
        }
    }

    Ok(files.into_iter().collect())
}

/// Whether `path` has the XYZ extension, ignoring case
pub fn is_xyz_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XYZ_EXTENSION))
}

fn is_glob_pattern(path: &Path) -> bool {
    path.to_string_lossy()
        .chars()
        .any(|c| matches!(c, '*' | '?' | '['))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_directory_walk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.xyz"));
        touch(&root.join("sub").join("b.XYZ"));
        touch(&root.join("sub").join("notes.txt"));

        let files = discover_xyz_files(&[root.to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_xyz_file(f)));
    }

    #[test]
    fn test_files_and_globs_are_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let a = root.join("a.xyz");
        touch(&a);
        touch(&root.join("b.xyz"));

        let pattern = root.join("*.xyz");
        let files = discover_xyz_files(&[a.clone(), pattern]).unwrap();
        assert_eq!(files, vec![a, root.join("b.xyz")]);
    }

    #[test]
    fn test_unmatched_glob_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.xyz");
        assert!(discover_xyz_files(&[pattern]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.xyz");
        assert!(matches!(
            discover_xyz_files(&[missing]),
            Err(XyzError::FileNotFound { .. })
        ));
    }
}

//! Import path handling
//!
//!     Import paths are written as link targets, so they may be percent-encoded
//!     (`Section%203%20--%20Types.md`). They are decoded, joined onto the importing file's
//!     directory and normalized lexically. Normalized paths are what cycle detection compares.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

pub fn decode_import_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Resolve an import relative to the directory of the file that contains it
pub fn resolve_import_path(importing_file: &Path, raw: &str) -> PathBuf {
    let base = importing_file.parent().unwrap_or_else(|| Path::new(""));
    normalize(&base.join(decode_import_path(raw)))
}

/// Remove `.` components and fold `..` into the preceding component, without touching disk
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

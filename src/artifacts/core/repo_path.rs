//! Repository-relative paths
//!
//! Tracked paths are stored relative to the repository root and encoded with `/` separators,
//! so commit digests do not depend on the platform that produced them.

use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// Encode a repository-relative path with `/` separators
pub fn to_slash(path: &Path) -> anyhow::Result<String> {
    let parts = path
        .components()
        .map(|component| match component {
            Component::Normal(part) => part
                .to_str()
                .with_context(|| format!("path {:?} is not valid UTF-8", path)),
            _ => Err(anyhow::anyhow!(
                "path {:?} must be relative to the repository root",
                path
            )),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let encoded = parts.join("/");
    if encoded.is_empty() || encoded.contains('\n') {
        anyhow::bail!("path {:?} cannot be tracked", path);
    }

    Ok(encoded)
}

/// Decode a `/`-separated path back into a platform path
pub fn from_slash(encoded: &str) -> PathBuf {
    encoded.split('/').collect()
}

/// Normalize a user-supplied path into a repository-relative one
///
/// Absolute paths must live under `root`; `.` components are dropped and `..` components are
/// resolved lexically without touching the file system.
pub fn normalize(root: &Path, path: &Path) -> anyhow::Result<PathBuf> {
    let relative = if path.is_absolute() {
        path.strip_prefix(root)
            .with_context(|| format!("path {:?} is outside the repository", path))?
    } else {
        path
    };

    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    anyhow::bail!("path {:?} is outside the repository", path);
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                anyhow::bail!("path {:?} is outside the repository", path)
            }
        }
    }

    Ok(normalized)
}

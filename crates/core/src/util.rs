use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged. If the home
/// directory cannot be determined the path is also returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    if s == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}

/// Normalizes a path into the canonical identity used by the path set:
/// tilde-expanded, absolutized against `base`, and lexically cleaned of
/// `.` and `..` components. Does not touch the filesystem, so paths that
/// do not exist (yet) normalize the same way as paths that do.
pub fn normalize_path(path: &Path, base: &Path) -> PathBuf {
    let expanded = expand_path(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component.as_os_str());
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Filesystem mtime as Unix milliseconds; 0 when the platform cannot say.
pub fn mtime_millis(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative_against_base() {
        let base = Path::new("/work/project");
        assert_eq!(
            normalize_path(Path::new("src/core"), base),
            PathBuf::from("/work/project/src/core")
        );
    }

    #[test]
    fn test_normalize_cleans_dot_components() {
        let base = Path::new("/work/project");
        assert_eq!(
            normalize_path(Path::new("./libs/../vendor/./cljs"), base),
            PathBuf::from("/work/project/vendor/cljs")
        );
    }

    #[test]
    fn test_normalize_keeps_absolute_paths() {
        let base = Path::new("/elsewhere");
        assert_eq!(
            normalize_path(Path::new("/opt/libs"), base),
            PathBuf::from("/opt/libs")
        );
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path(Path::new("~/src")), home.join("src"));
            assert_eq!(expand_path(Path::new("~")), home);
        }
        assert_eq!(expand_path(Path::new("plain/src")), PathBuf::from("plain/src"));
    }
}

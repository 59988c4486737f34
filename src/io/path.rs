//! Lexical path helpers used when resolving navigation targets.
use std::path::{Component, Path, PathBuf};

/// Removes `.` and `..` components without touching the filesystem.
///
/// A `..` at the root stays at the root, so `/..` normalises to `/`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_anchor = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if at_anchor {
                    // Only a relative path can keep a leading `..`.
                    if out.as_os_str().is_empty() {
                        out.push("..");
                    }
                } else if out.ends_with("..") {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Expands a leading `~` component to `home`.
///
/// Returns `None` when the path starts with `~` but no home is known.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> Option<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => home.map(|home| {
            if rest.as_os_str().is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }),
        Err(_) => Some(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/../../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize(Path::new("../x/../y")), PathBuf::from("../y"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/ana");
        assert_eq!(
            expand_tilde(Path::new("~/Downloads"), Some(home)),
            Some(PathBuf::from("/home/ana/Downloads"))
        );
        assert_eq!(
            expand_tilde(Path::new("~"), Some(home)),
            Some(PathBuf::from("/home/ana"))
        );
        assert_eq!(
            expand_tilde(Path::new("/opt/~"), Some(home)),
            Some(PathBuf::from("/opt/~"))
        );
        assert_eq!(expand_tilde(Path::new("~/x"), None), None);
        // `~user` is not expanded.
        assert_eq!(
            expand_tilde(Path::new("~bob/x"), Some(home)),
            Some(PathBuf::from("~bob/x"))
        );
    }
}

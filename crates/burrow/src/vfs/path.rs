//! Lexical path resolution.
//!
//! Nothing here looks at the tree: a resolved path may or may not exist.
//! All resolved paths are absolute, `/`-separated, free of `.` and `..`
//! segments, and have no trailing separator (except the root itself).

/// Path of the tree root.
pub const ROOT: &str = "/";

/// Resolve `path` against the working directory `cwd`.
///
/// Absolute paths ignore `cwd`. `..` at the root stays at the root.
pub fn resolve(cwd: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize(path)
    } else {
        normalize(&format!("{}/{}", cwd, path))
    }
}

/// Collapse `.`, `..` and repeated separators in an absolute path.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Iterate the segments of a resolved path. The root has none.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Join a child name onto a resolved directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// The final segment of a path, or `""` for the root.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Split a path at its last separator into `(dirname, basename)`.
///
/// `"a/b/*.txt"` gives `("a/b", "*.txt")` and `"/*.txt"` gives `("/", "*.txt")`.
/// A path without a separator has an empty dirname.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => (ROOT, &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(resolve("/", "/foo/bar"), "/foo/bar");
    }

    #[test]
    fn test_resolve_absolute_path_with_dots() {
        assert_eq!(resolve("/", "/foo/bar/../baz"), "/foo/baz");
        assert_eq!(resolve("/", "/foo/./bar/."), "/foo/bar");
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve("/home", "foo/bar"), "/home/foo/bar");
    }

    #[test]
    fn test_resolve_relative_path_with_dots() {
        assert_eq!(resolve("/home/user", "../foo"), "/home/foo");
    }

    #[test]
    fn test_resolve_collapses_separators_and_trailing_slash() {
        assert_eq!(resolve("/", "//artifacts///notes/"), "/artifacts/notes");
        assert_eq!(resolve("/", "/"), "/");
    }

    #[test]
    fn test_resolve_empty_is_cwd() {
        assert_eq!(resolve("/memories", ""), "/memories");
    }

    #[test]
    fn test_resolve_parent_of_root_is_root() {
        assert_eq!(resolve("/", "/../.."), "/");
        assert_eq!(resolve("/a", "../../b"), "/b");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for p in ["a/../b", "/x//y/./z/..", "..", "./", "/", "deep/er/../../path"] {
            let once = resolve("/cwd/sub", p);
            assert_eq!(resolve("/cwd/sub", &once), once, "path: {}", p);
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a", "b"), "/a/b");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/"), "");
        assert_eq!(file_name("/a/b.txt"), "b.txt");
    }

    #[test]
    fn test_split() {
        assert_eq!(split("/*.txt"), ("/", "*.txt"));
        assert_eq!(split("dir/**/*.txt"), ("dir/**", "*.txt"));
        assert_eq!(split("*.txt"), ("", "*.txt"));
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("/").count(), 0);
        assert_eq!(segments("/a/b").collect::<Vec<_>>(), vec!["a", "b"]);
    }
}

//! Member-path resolution.
//!
//! Turns a raw manifest token into a normalized absolute directory path,
//! or `None` when the token is empty or the directory does not exist.
//! Missing members are omitted silently; workspace tooling tolerates
//! stale manifest entries.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::fs::FileSystem;

/// Resolve a raw member token against the manifest's base directory.
///
/// The token is trimmed and stripped of exactly one layer of surrounding
/// double quotes. Relative tokens are joined onto `base`; the result is
/// lexically normalized and must be a live directory on `fs`.
pub fn resolve_member(token: &str, base: &Utf8Path, fs: &dyn FileSystem) -> Option<Utf8PathBuf> {
    let trimmed = token.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        return None;
    }

    let raw = Utf8Path::new(unquoted);
    let candidate = if raw.is_absolute() {
        raw.to_owned()
    } else {
        base.join(raw)
    };
    let normalized = normalize(&candidate);

    fs.is_directory(&normalized).then_some(normalized)
}

/// Lexically normalize a path: drop `.` segments and collapse `..`
/// against preceding normal components.
///
/// `..` at the start of a relative path is kept; `..` directly under the
/// root is dropped (`/..` is `/`). An input that collapses to nothing
/// becomes `.`.
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_str()),
        }
    }

    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileSystem;

    fn utf8_tmpdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    #[test]
    fn resolves_relative_token_against_base() {
        let (_tmp, root) = utf8_tmpdir();
        let member = root.join("sub/mod");
        std::fs::create_dir_all(member.as_std_path()).unwrap();

        assert_eq!(
            resolve_member("./sub/mod", &root, &OsFileSystem),
            Some(member)
        );
    }

    #[test]
    fn resolves_parent_token_to_sibling() {
        let (_tmp, root) = utf8_tmpdir();
        let base = root.join("project");
        let sibling = root.join("outside");
        std::fs::create_dir_all(base.as_std_path()).unwrap();
        std::fs::create_dir_all(sibling.as_std_path()).unwrap();

        assert_eq!(
            resolve_member("../outside", &base, &OsFileSystem),
            Some(sibling)
        );
    }

    #[test]
    fn resolves_absolute_token_ignoring_base() {
        let (_tmp, root) = utf8_tmpdir();
        let member = root.join("abs");
        std::fs::create_dir_all(member.as_std_path()).unwrap();

        assert_eq!(
            resolve_member(member.as_str(), Utf8Path::new("/elsewhere"), &OsFileSystem),
            Some(member)
        );
    }

    #[test]
    fn strips_one_layer_of_quotes() {
        let (_tmp, root) = utf8_tmpdir();
        let member = root.join("tools");
        std::fs::create_dir_all(member.as_std_path()).unwrap();

        assert_eq!(
            resolve_member("\"./tools\"", &root, &OsFileSystem),
            Some(member)
        );
    }

    #[test]
    fn missing_directory_is_dropped() {
        let (_tmp, root) = utf8_tmpdir();
        assert_eq!(resolve_member("./nope", &root, &OsFileSystem), None);
    }

    #[test]
    fn file_is_not_a_member_directory() {
        let (_tmp, root) = utf8_tmpdir();
        std::fs::write(root.join("mod.go").as_std_path(), "").unwrap();
        assert_eq!(resolve_member("./mod.go", &root, &OsFileSystem), None);
    }

    #[test]
    fn empty_and_quote_only_tokens_are_dropped() {
        let (_tmp, root) = utf8_tmpdir();
        assert_eq!(resolve_member("", &root, &OsFileSystem), None);
        assert_eq!(resolve_member("   ", &root, &OsFileSystem), None);
        assert_eq!(resolve_member("\"\"", &root, &OsFileSystem), None);
    }

    #[test]
    fn lone_quote_is_not_stripped() {
        let (_tmp, root) = utf8_tmpdir();
        // A single `"` has no surrounding pair; it resolves (and fails)
        // as a literal name.
        assert_eq!(resolve_member("\"", &root, &OsFileSystem), None);
    }

    mod normalize {
        use super::*;

        #[test]
        fn collapses_cur_and_parent_dirs() {
            assert_eq!(normalize(Utf8Path::new("/r/./sub/mod")), "/r/sub/mod");
            assert_eq!(normalize(Utf8Path::new("/r/a/../b")), "/r/b");
            assert_eq!(normalize(Utf8Path::new("/r/a/b/../../c")), "/r/c");
        }

        #[test]
        fn keeps_leading_parent_dirs_of_relative_paths() {
            assert_eq!(normalize(Utf8Path::new("../x")), "../x");
            assert_eq!(normalize(Utf8Path::new("a/../../x")), "../x");
        }

        #[test]
        fn parent_of_root_is_root() {
            assert_eq!(normalize(Utf8Path::new("/../x")), "/x");
        }

        #[test]
        fn empty_result_becomes_cur_dir() {
            assert_eq!(normalize(Utf8Path::new("a/..")), ".");
            assert_eq!(normalize(Utf8Path::new(".")), ".");
        }
    }
}

//! Call-site rendering for the `caller` field.
//!
//! Every public logging method is `#[track_caller]`, so the location handed to
//! [`resolve`] is always the line that called into the logger, no matter how many
//! internal frames sit in between.

use std::panic::Location;

/// Renders `location` as `path/file:line` with `/` separators, then trims
/// `trim_prefix` from the front.
#[must_use]
pub fn resolve(location: &Location<'_>, trim_prefix: &str) -> String {
    let rendered = format!("{}:{}", location.file().replace('\\', "/"), location.line());
    trim(&rendered, trim_prefix)
}

/// Location of whoever called this function, rendered like [`resolve`].
#[must_use]
#[track_caller]
pub fn here(trim_prefix: &str) -> String {
    resolve(Location::caller(), trim_prefix)
}

/// Strips `prefix` from the front of `caller`.
///
/// A trailing `/` is added to the prefix when missing so that trimming never leaves a
/// leading separator behind. An empty or non-matching prefix leaves `caller` as is.
///
/// Cargo records locations relative to the workspace root, so a workspace member's
/// file arrives as `member/src/lib.rs` while its manifest directory is absolute. When
/// `prefix` is absolute and `caller` is relative, the longest trailing run of the
/// prefix's components that `caller` starts with is stripped instead.
///
/// ```
/// use fieldlog::caller::trim;
///
/// assert_eq!(trim("/work/app/src/main.rs:7", "/work/app"), "src/main.rs:7");
/// assert_eq!(trim("/work/app/src/main.rs:7", "/work/app/"), "src/main.rs:7");
/// assert_eq!(trim("/work/app/src/main.rs:7", "/elsewhere"), "/work/app/src/main.rs:7");
/// assert_eq!(trim("app/src/main.rs:7", "/work/app"), "src/main.rs:7");
/// ```
#[must_use]
pub fn trim(caller: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return caller.to_string();
    }

    let mut prefix = prefix.replace('\\', "/");
    if !prefix.ends_with('/') {
        prefix.push('/');
    }

    if let Some(rest) = caller.strip_prefix(prefix.as_str()) {
        return rest.to_string();
    }

    if is_absolute(&prefix) && !is_absolute(caller) {
        return strip_member_prefix(caller, &prefix).to_string();
    }

    caller.to_string()
}

/// Tries `b/c/`, then `c/` for a prefix of `/a/b/c/`.
fn strip_member_prefix<'a>(caller: &'a str, prefix: &str) -> &'a str {
    let components: Vec<&str> = prefix.split('/').filter(|c| !c.is_empty()).collect();

    // The full path itself is never workspace-relative.
    (1..components.len())
        .find_map(|start| {
            let member = components[start..].join("/");
            caller
                .strip_prefix(member.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        })
        .unwrap_or(caller)
}

fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/') || (bytes.len() > 2 && bytes[1] == b':' && bytes[2] == b'/')
}

/// Root directory of the crate invoking the macro, read from Cargo's build metadata,
/// or `""` when built outside Cargo.
///
/// Pass it to [`crate::LoggerBuilder::caller_trim`] so callers are reported relative
/// to the invoking crate, whether Cargo recorded the location as an absolute path (a
/// dependency) or relative to the workspace root (a workspace member).
#[macro_export]
macro_rules! caller_root {
    () => {
        match ::std::option_env!("CARGO_MANIFEST_DIR") {
            Some(dir) => dir,
            None => "",
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn here_points_at_this_file() {
        let expected_line = line!() + 1;
        let caller = here("");
        assert!(caller.ends_with(&format!("caller.rs:{expected_line}")));
        assert!(caller.contains("src/"));
    }

    #[test]
    fn trim_requires_component_boundary() {
        assert_eq!(trim("src/libfoo/a.rs:1", "src/lib"), "src/libfoo/a.rs:1");
        assert_eq!(trim("src/lib/a.rs:1", "src/lib"), "a.rs:1");
    }

    #[test]
    fn trim_normalizes_backslashes_in_prefix() {
        assert_eq!(trim("C:/work/app/main.rs:3", "C:\\work\\app"), "main.rs:3");
    }

    #[test]
    fn workspace_member_locations_are_trimmed() {
        assert_eq!(
            trim("fieldlog/tests/logger.rs:10", "/tmp/outer/fieldlog"),
            "tests/logger.rs:10"
        );
        assert_eq!(
            trim("crates/core/src/msg.rs:7", "/ws/crates/core"),
            "src/msg.rs:7"
        );
    }

    #[test]
    fn package_root_locations_are_left_alone() {
        assert_eq!(trim("tests/caller.rs:4", "/root/crate"), "tests/caller.rs:4");
        assert_eq!(trim("cratex/a.rs:4", "/root/crate"), "cratex/a.rs:4");
    }

    #[test]
    fn relative_prefix_never_matches_by_suffix() {
        assert_eq!(trim("lib/a.rs:1", "src/lib"), "lib/a.rs:1");
    }

    #[test]
    fn empty_prefix_is_noop() {
        assert_eq!(trim("a/b.rs:9", ""), "a/b.rs:9");
    }
}

//! Path helpers for configuration values.

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory (`$HOME`).
///
/// Paths without a leading tilde, and tilde paths when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use courier_ops::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/lib/fixtures"), std::path::PathBuf::from("/var/lib/fixtures"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (p, Some(home)) if p.starts_with("~/") => PathBuf::from(home).join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_against_home() {
        assert_eq!(
            expand_tilde_with("~/fixtures", Some("/home/ops")),
            PathBuf::from("/home/ops/fixtures")
        );
        assert_eq!(expand_tilde_with("~", Some("/home/ops")), PathBuf::from("/home/ops"));
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(expand_tilde_with("/abs/path", Some("/home/ops")), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_tilde_with("~other/x", Some("/home/ops")), PathBuf::from("~other/x"));
    }
}

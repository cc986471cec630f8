//! Path-prefix matching on whole segments.

/// Whether `path` is `prefix` itself or lies beneath it.
///
/// `/users` matches `/users` and `/users/7` but not `/usersettings`.
/// A trailing slash on either side is ignored.
pub fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Whether `path` is under any of `prefixes`.
pub fn is_under_any<S: AsRef<str>>(path: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|p| is_under(path, p.as_ref()))
}

/// URL schemes that are accepted verbatim, without resolving against a base.
pub const PERMITTED_SCHEMES: &[&str] = &["http", "https", "file", "evernote"];

/// Resolve `candidate` against `base`.
///
/// Candidates that already carry a permitted scheme are returned unchanged.
/// Anything else is treated as a path relative to the directory of `base`:
/// `.` segments are skipped, `..` pops the previous segment (a no-op once
/// nothing is left) and every other segment is appended.
///
/// Returns `None` only for an empty candidate. Whitespace is significant.
pub fn resolve_url(candidate: &str, base: &str) -> Option<String> {
    if candidate.is_empty() {
        return None;
    }
    if has_permitted_scheme(candidate) {
        return Some(candidate.to_string());
    }

    let mut stack: Vec<&str> = base.split('/').collect();
    stack.pop();
    for segment in candidate.split('/') {
        match segment {
            "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    Some(stack.join("/"))
}

/// True when `candidate` starts with one of [`PERMITTED_SCHEMES`].
///
/// This is a plain case-sensitive prefix test: `filename.png` counts as a
/// `file` reference and is passed through untouched.
pub fn has_permitted_scheme(candidate: &str) -> bool {
    PERMITTED_SCHEMES
        .iter()
        .any(|scheme| candidate.starts_with(scheme))
}

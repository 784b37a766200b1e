use crate::constants::{PARAM_CAPTURE_CLASS, PARAM_GROUP_PREFIX};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STATIC_PATH_RE: Regex = Regex::new(r"^[A-Za-z0-9~_.\-/]*$").unwrap();
    static ref NAMED_PATH_RE: Regex = Regex::new(r"^[A-Za-z0-9~_.\-/:]*$").unwrap();
}

/// How a registered path is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternKind {
    /// Only path-safe characters: exact string lookup.
    Static,
    /// Path-safe characters plus `:name` segments: positional comparison.
    Named,
    /// Anything else: the generated key is evaluated as a regex.
    Regex,
}

pub(crate) fn classify(path: &str) -> PatternKind {
    if STATIC_PATH_RE.is_match(path) {
        PatternKind::Static
    } else if NAMED_PATH_RE.is_match(path) {
        PatternKind::Named
    } else {
        PatternKind::Regex
    }
}

/// Splits a path on `/`, dropping the empty segment produced by the leading slash.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

fn is_param_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '~')
}

/// Splits a `:name` segment into the parameter name and whatever follows it.
pub(crate) fn split_param(segment: &str) -> Option<(&str, &str)> {
    let rest = segment.strip_prefix(':')?;
    let end = rest.find(|c: char| !is_param_name_char(c)).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(rest.split_at(end))
}

pub(crate) fn param_name(segment: &str) -> Option<&str> {
    split_param(segment).map(|(name, _)| name)
}

pub(crate) fn param_group_name(idx: usize) -> String {
    format!("{}{}", PARAM_GROUP_PREFIX, idx)
}

/// Builds the anchored regex source for a dynamic route along with its parameter names.
///
/// Every `:name` segment becomes a capture group named after its position, so
/// groups the pattern itself declares never shift the parameters. Literal text
/// is escaped unless the route is a regex route, where it is regex source.
pub(crate) fn generate_key<S: AsRef<str>>(path_names: &[S], use_regex: bool) -> (String, Vec<String>) {
    let mut key = String::from("^");
    let mut params = Vec::new();

    for segment in path_names {
        let segment = segment.as_ref();
        key.push('/');

        let literal = match split_param(segment) {
            Some((name, rest)) => {
                key.push_str(&format!(
                    "(?P<{}>{})",
                    param_group_name(params.len()),
                    PARAM_CAPTURE_CLASS
                ));
                params.push(name.to_owned());
                rest
            }
            None => segment,
        };

        if use_regex {
            key.push_str(literal);
        } else {
            key.push_str(&regex::escape(literal));
        }
    }

    key.push('$');
    (key, params)
}

use crate::error::Error;
use crate::handler::{Chain, Handler};
use crate::helpers;
use crate::regex_generator::{self, param_group_name};
use crate::types::RouteParams;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

pub use self::table::RouteTable;

mod table;

/// How a route is looked up at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Exact path, stored in the static map.
    Static,
    /// Contains `:name` segments, matched segment by segment.
    Named,
    /// Contains regex syntax, matched by evaluating the generated regex.
    Regex,
}

/// A registered dynamic route: a named or regex pattern with its handler chain.
///
/// An entry shouldn't be created directly, use the [RouterBuilder](./struct.RouterBuilder.html)
/// methods to register one.
pub struct RouteEntry<T, E> {
    // The normalized pattern as registered, kept so mounting can re-prefix it.
    pub(crate) path: String,
    pub(crate) key: String,
    regex: Regex,
    // Capture group index of each parameter, parallel to `params`.
    param_groups: Vec<usize>,
    pub(crate) params: Vec<String>,
    pub(crate) callbacks: Chain<T, E>,
    pub(crate) path_names: Vec<String>,
    pub(crate) use_regex: bool,
}

impl<T, E> RouteEntry<T, E> {
    pub(crate) fn new(path: &str, callbacks: Chain<T, E>, use_regex: bool) -> crate::Result<RouteEntry<T, E>> {
        let path = helpers::normalize_path(path);
        let path_names: Vec<String> = regex_generator::split_segments(&path).map(str::to_owned).collect();
        let (key, params) = regex_generator::generate_key(&path_names, use_regex);

        let regex = Regex::new(&key).map_err(|source| Error::InvalidPattern {
            path: path.clone(),
            source,
        })?;

        let param_groups = (0..params.len())
            .filter_map(|idx| {
                let group = param_group_name(idx);
                regex.capture_names().position(|name| name == Some(group.as_str()))
            })
            .collect();

        Ok(RouteEntry {
            path,
            key,
            regex,
            param_groups,
            params,
            callbacks,
            path_names,
            use_regex,
        })
    }

    /// The pattern this entry was registered with, normalized.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The generated regex source used when the entry is matched as a regex.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parameter names in the order they appear in the pattern.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn kind(&self) -> RouteKind {
        if self.use_regex {
            RouteKind::Regex
        } else {
            RouteKind::Named
        }
    }

    /// Number of path segments; the partition this entry lives in.
    pub(crate) fn bucket(&self) -> usize {
        self.path_names.len()
    }

    pub(crate) fn callbacks(&self) -> &[Handler<T, E>] {
        &self.callbacks
    }

    pub(crate) fn is_match(&self, path: &str, segments: &[&str], params: &mut RouteParams) -> bool {
        if self.use_regex {
            self.match_regex(path, params)
        } else {
            self.match_positional(segments, params)
        }
    }

    /// Compares segments right to left; `:name` segments match any non-empty segment and are captured.
    ///
    /// `params` is only written when the whole path matches.
    pub(crate) fn match_positional(&self, segments: &[&str], params: &mut RouteParams) -> bool {
        if segments.len() != self.path_names.len() {
            return false;
        }

        let mut captured = Vec::with_capacity(self.params.len());
        for (pattern, segment) in self.path_names.iter().zip(segments).rev() {
            match regex_generator::param_name(pattern) {
                Some(_) if segment.is_empty() => return false,
                Some(name) => captured.push((name, *segment)),
                None if pattern == segment => {}
                None => return false,
            }
        }

        for (name, value) in captured.into_iter().rev() {
            params.set(name, value);
        }
        true
    }

    pub(crate) fn match_regex(&self, path: &str, params: &mut RouteParams) -> bool {
        let caps = match self.regex.captures(path) {
            Some(caps) => caps,
            None => return false,
        };

        for (name, group) in self.params.iter().zip(&self.param_groups) {
            if let Some(m) = caps.get(*group) {
                params.set(name.as_str(), m.as_str());
            }
        }
        true
    }

    // Re-registers the same pattern under a mount prefix, ahead of `before` handlers.
    pub(crate) fn into_prefixed(self, prefix: &str, before: &[Handler<T, E>]) -> (String, Chain<T, E>) {
        let mut chain = before.to_vec();
        chain.extend(self.callbacks);
        (helpers::join_paths(prefix, &self.path), chain)
    }
}

impl<T, E> Debug for RouteEntry<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ path: {:?}, key: {:?}, params: {:?}, use_regex: {:?}, callbacks: {} }}",
            self.path,
            self.key,
            self.params,
            self.use_regex,
            self.callbacks.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler;
    use http_body_util::Empty;
    use hyper::body::Bytes;
    use std::convert::Infallible;

    fn entry(path: &str, use_regex: bool) -> RouteEntry<Empty<Bytes>, Infallible> {
        let noop = handler(|ctx| async move { Ok(ctx.next()) });
        RouteEntry::new(path, vec![noop], use_regex).unwrap()
    }

    fn segments(path: &str) -> Vec<&str> {
        regex_generator::split_segments(path).collect()
    }

    #[test]
    fn positional_and_regex_strategies_agree() {
        for pattern in ["/user/:id", "/a/:x/b/:y", "/files/:name.json"] {
            let e = entry(pattern, false);
            for url in [
                "/user/42",
                "/a/1/b/2",
                "/files/report.json",
                "/user/42/extra",
                "/a/1/c/2",
                "/user/",
                "/a//b/2",
                "/files/",
            ] {
                let mut positional = RouteParams::new();
                let mut regex = RouteParams::new();
                let p = e.match_positional(&segments(url), &mut positional);
                let r = e.match_regex(url, &mut regex);
                assert_eq!(p, r, "pattern {} url {}", pattern, url);
                assert_eq!(positional, regex, "pattern {} url {}", pattern, url);
            }
        }

        let mut params = RouteParams::new();
        assert!(entry("/user/:id", false).match_regex("/user/42", &mut params));
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn positional_mismatch_leaves_params_untouched() {
        let e = entry("/a/:x/b", false);
        let mut params = RouteParams::new();
        assert!(!e.match_positional(&segments("/a/1/c"), &mut params));
        assert!(params.is_empty());
    }

    #[test]
    fn named_segment_needs_at_least_one_char() {
        let root = entry("/:id", false);
        assert_eq!(root.bucket(), 1);
        assert!(!root.match_positional(&segments("/"), &mut RouteParams::new()));
        assert!(!root.match_regex("/", &mut RouteParams::new()));

        let inner = entry("/a/:x/b", false);
        let mut params = RouteParams::new();
        assert!(!inner.match_positional(&segments("/a//b"), &mut params));
        assert!(params.is_empty());
        assert!(inner.match_positional(&segments("/a/1/b"), &mut params));
        assert_eq!(params.get("x"), Some("1"));
    }

    #[test]
    fn regex_route_maps_params_past_inline_groups() {
        let e = entry(r"/v(\d+)/items/:id", true);
        assert_eq!(e.kind(), RouteKind::Regex);
        assert_eq!(e.bucket(), 3);

        let mut params = RouteParams::new();
        assert!(e.match_regex("/v3/items/abc", &mut params));
        assert_eq!(params.get("id"), Some("abc"));
        assert_eq!(params.len(), 1);
        assert!(!e.match_regex("/vx/items/abc", &mut RouteParams::new()));
    }

    #[test]
    fn invalid_regex_is_a_configuration_error() {
        let noop = handler::<Empty<Bytes>, Infallible, _, _>(|ctx| async move { Ok(ctx.next()) });
        let err = RouteEntry::new("/broken/(unclosed", vec![noop], true).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn trailing_slash_is_normalized_away() {
        let e = entry("/users/:id/", false);
        assert_eq!(e.path(), "/users/:id");
        assert_eq!(e.bucket(), 2);
    }
}

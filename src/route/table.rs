use super::{RouteEntry, RouteKind};
use crate::handler::{Chain, Handler};
use crate::helpers;
use crate::regex_generator::{self, PatternKind};
use crate::types::RouteParams;
use hyper::Method;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

/// The routes registered for one HTTP method.
///
/// Static paths live in a map keyed by the exact path. Named and regex routes
/// live in partitions keyed by their segment count, so a request is only ever
/// compared against routes of the same shape.
pub struct RouteTable<T, E> {
    pub(crate) method: Method,
    pub(crate) static_route_map: HashMap<String, Chain<T, E>>,
    pub(crate) named_route_partition_map: HashMap<usize, Vec<RouteEntry<T, E>>>,
}

/// The outcome of a successful lookup.
pub(crate) enum Match<'a, T, E> {
    Static(&'a [Handler<T, E>]),
    Dynamic(&'a RouteEntry<T, E>),
}

impl<'a, T, E> Match<'a, T, E> {
    pub(crate) fn chain(&self) -> &'a [Handler<T, E>] {
        match *self {
            Match::Static(chain) => chain,
            Match::Dynamic(entry) => entry.callbacks(),
        }
    }

    pub(crate) fn kind(&self) -> RouteKind {
        match self {
            Match::Static(_) => RouteKind::Static,
            Match::Dynamic(entry) => entry.kind(),
        }
    }
}

impl<T, E> RouteTable<T, E> {
    pub(crate) fn new(method: Method) -> Self {
        RouteTable {
            method,
            static_route_map: HashMap::new(),
            named_route_partition_map: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_empty(&self) -> bool {
        self.static_route_map.is_empty() && self.named_route_partition_map.is_empty()
    }

    /// Registers `callbacks` under `path`.
    ///
    /// A static path registered twice keeps one chain with the later handlers
    /// appended; every dynamic registration adds a new entry to its partition.
    pub(crate) fn register(&mut self, path: &str, callbacks: Chain<T, E>) -> crate::Result<()> {
        match regex_generator::classify(path) {
            PatternKind::Static => {
                let key = helpers::normalize_path(path);
                tracing::trace!(method = %self.method, path = %key, "registering static route");
                self.static_route_map.entry(key).or_default().extend(callbacks);
            }
            kind => {
                let entry = RouteEntry::new(path, callbacks, kind == PatternKind::Regex)?;
                tracing::trace!(
                    method = %self.method,
                    path = %entry.path,
                    key = %entry.key,
                    bucket = entry.bucket(),
                    "registering dynamic route"
                );
                self.insert_entry(entry);
            }
        }
        Ok(())
    }

    fn insert_entry(&mut self, entry: RouteEntry<T, E>) {
        self.named_route_partition_map
            .entry(entry.bucket())
            .or_default()
            .push(entry);
    }

    /// Looks `path` up: the static map first, then the partition with the same segment count.
    ///
    /// Within a partition the first entry to match, in registration order, wins.
    /// Captured parameters are written into `params`.
    pub(crate) fn find<'a>(&'a self, path: &str, params: &mut RouteParams) -> Option<Match<'a, T, E>> {
        if let Some(chain) = self.static_route_map.get(path) {
            return Some(Match::Static(chain));
        }

        let segments: Vec<&str> = regex_generator::split_segments(path).collect();
        let entries = self.named_route_partition_map.get(&segments.len())?;

        entries
            .iter()
            .find(|entry| entry.is_match(path, &segments, params))
            .map(Match::Dynamic)
    }

    /// Appends every route of `other` to this table.
    ///
    /// Chains registered for the same static path are concatenated, `other`'s
    /// handlers running last; partition entries are appended after ours.
    pub(crate) fn merge(&mut self, other: RouteTable<T, E>) {
        for (path, chain) in other.static_route_map {
            self.static_route_map.entry(path).or_default().extend(chain);
        }
        for (bucket, entries) in other.named_route_partition_map {
            self.named_route_partition_map.entry(bucket).or_default().extend(entries);
        }
    }

    /// Moves every route of `other` into this table under `prefix`.
    ///
    /// Each path is re-registered, so its kind and partition are recomputed:
    /// a prefix holding `:name` segments turns static routes into named ones.
    /// `before` handlers are put in front of every moved chain.
    pub(crate) fn merge_at(&mut self, prefix: &str, other: RouteTable<T, E>, before: &[Handler<T, E>]) -> crate::Result<()> {
        let mut static_routes: Vec<_> = other.static_route_map.into_iter().collect();
        static_routes.sort_by(|a, b| a.0.cmp(&b.0));
        for (path, callbacks) in static_routes {
            let mut chain = before.to_vec();
            chain.extend(callbacks);
            self.register(&helpers::join_paths(prefix, &path), chain)?;
        }

        let mut partitions: Vec<_> = other.named_route_partition_map.into_iter().collect();
        partitions.sort_by_key(|(bucket, _)| *bucket);
        for entry in partitions.into_iter().flat_map(|(_, entries)| entries) {
            let (path, chain) = entry.into_prefixed(prefix, before);
            self.register(&path, chain)?;
        }
        Ok(())
    }

    /// Lists the registered patterns: static paths sorted, then partition entries by segment count.
    pub fn routes(&self) -> Vec<(&str, RouteKind)> {
        let mut static_paths: Vec<&str> = self.static_route_map.keys().map(String::as_str).collect();
        static_paths.sort_unstable();

        let mut buckets: Vec<&usize> = self.named_route_partition_map.keys().collect();
        buckets.sort_unstable();

        static_paths
            .into_iter()
            .map(|path| (path, RouteKind::Static))
            .chain(
                buckets
                    .into_iter()
                    .flat_map(|bucket| &self.named_route_partition_map[bucket])
                    .map(|entry| (entry.path(), entry.kind())),
            )
            .collect()
    }
}

impl<T, E> Debug for RouteTable<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let static_routes: HashMap<&String, usize> = self
            .static_route_map
            .iter()
            .map(|(path, chain)| (path, chain.len()))
            .collect();

        f.debug_struct("RouteTable")
            .field("method", &self.method)
            .field("static_route_map", &static_routes)
            .field("named_route_partition_map", &self.named_route_partition_map)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler;
    use http_body_util::Empty;
    use hyper::body::Bytes;
    use std::convert::Infallible;

    type Table = RouteTable<Empty<Bytes>, Infallible>;

    fn chain(n: usize) -> Chain<Empty<Bytes>, Infallible> {
        (0..n).map(|_| handler(|ctx| async move { Ok(ctx.next()) })).collect()
    }

    fn find_path(table: &Table, path: &str) -> Option<(RouteKind, usize, RouteParams)> {
        let mut params = RouteParams::new();
        let found = table.find(path, &mut params)?;
        Some((found.kind(), found.chain().len(), params))
    }

    #[test]
    fn static_and_dynamic_routes_are_kept_apart() {
        let mut table = Table::new(Method::GET);
        table.register("/users/", chain(1)).unwrap();
        table.register("/users/:id", chain(1)).unwrap();
        table.register("/users/[0-9]+/avatar", chain(1)).unwrap();

        assert_eq!(table.static_route_map.len(), 1);
        assert!(table.static_route_map.contains_key("/users"));
        assert_eq!(table.named_route_partition_map[&2].len(), 1);
        assert_eq!(table.named_route_partition_map[&3].len(), 1);
        for (bucket, entries) in &table.named_route_partition_map {
            assert!(entries.iter().all(|e| e.path_names.len() == *bucket));
        }
    }

    #[test]
    fn repeated_static_registration_appends_to_the_chain() {
        let mut table = Table::new(Method::GET);
        table.register("/health", chain(1)).unwrap();
        table.register("/health/", chain(2)).unwrap();

        assert_eq!(table.static_route_map["/health"].len(), 3);
    }

    #[test]
    fn static_routes_win_over_dynamic_ones() {
        let mut table = Table::new(Method::GET);
        table.register("/a/:x", chain(1)).unwrap();
        table.register("/a/b", chain(2)).unwrap();

        let (kind, len, params) = find_path(&table, "/a/b").unwrap();
        assert_eq!(kind, RouteKind::Static);
        assert_eq!(len, 2);
        assert!(params.is_empty());
    }

    #[test]
    fn registration_order_breaks_ties_within_a_partition() {
        let mut table = Table::new(Method::GET);
        table.register("/a/:x", chain(1)).unwrap();
        table.register("/a/b+", chain(2)).unwrap();

        let (kind, len, params) = find_path(&table, "/a/b").unwrap();
        assert_eq!(kind, RouteKind::Named);
        assert_eq!(len, 1);
        assert_eq!(params.get("x"), Some("b"));
    }

    #[test]
    fn only_same_shape_routes_are_tried() {
        let mut table = Table::new(Method::GET);
        table.register("/a/:id/b", chain(1)).unwrap();

        assert!(find_path(&table, "/a/1/b").is_some());
        assert!(find_path(&table, "/a/1").is_none());
        assert!(find_path(&table, "/a/1/b/c").is_none());
    }

    #[test]
    fn regex_routes_are_matched_against_the_whole_path() {
        let mut table = Table::new(Method::GET);
        table.register(r"/orders/:id/(items|lines)", chain(1)).unwrap();

        let (kind, _, params) = find_path(&table, "/orders/9/lines").unwrap();
        assert_eq!(kind, RouteKind::Regex);
        assert_eq!(params.get("id"), Some("9"));
        assert!(find_path(&table, "/orders/9/rows").is_none());
    }

    #[test]
    fn merge_appends_every_route_of_the_other_table() {
        let mut target = Table::new(Method::GET);
        target.register("/shared", chain(1)).unwrap();
        target.register("/a/:x", chain(1)).unwrap();

        let mut source = Table::new(Method::GET);
        source.register("/shared", chain(2)).unwrap();
        source.register("/only-source", chain(1)).unwrap();
        source.register("/a/:y", chain(1)).unwrap();
        source.register("/b/:y/c", chain(1)).unwrap();

        target.merge(source);

        assert_eq!(target.static_route_map["/shared"].len(), 3);
        assert!(target.static_route_map.contains_key("/only-source"));
        assert_eq!(target.named_route_partition_map[&2].len(), 2);
        assert_eq!(target.named_route_partition_map[&2][0].path(), "/a/:x");
        assert_eq!(target.named_route_partition_map[&3].len(), 1);
    }

    #[test]
    fn merge_at_recomputes_kind_and_partition() {
        let mut source = Table::new(Method::GET);
        source.register("/", chain(1)).unwrap();
        source.register("/posts", chain(1)).unwrap();
        source.register("/posts/:id", chain(1)).unwrap();

        let mut target = Table::new(Method::GET);
        target.merge_at("/users/:uid", source, &chain(1)).unwrap();

        assert!(target.static_route_map.is_empty());
        let (kind, len, params) = find_path(&target, "/users/7/posts/3").unwrap();
        assert_eq!(kind, RouteKind::Named);
        assert_eq!(len, 2);
        assert_eq!(params.get("uid"), Some("7"));
        assert_eq!(params.get("id"), Some("3"));
        assert!(find_path(&target, "/users/7").is_some());
        assert!(find_path(&target, "/users/7/posts").is_some());
    }

    #[test]
    fn routes_lists_static_then_dynamic() {
        let mut table = Table::new(Method::GET);
        table.register("/b", chain(1)).unwrap();
        table.register("/a", chain(1)).unwrap();
        table.register("/a/:x/y", chain(1)).unwrap();
        table.register("/a/:x", chain(1)).unwrap();

        assert_eq!(
            table.routes(),
            vec![
                ("/a", RouteKind::Static),
                ("/b", RouteKind::Static),
                ("/a/:x", RouteKind::Named),
                ("/a/:x/y", RouteKind::Named),
            ]
        );
    }
}

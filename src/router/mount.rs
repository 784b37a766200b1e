use crate::router::Router;

impl<T, E> Router<T, E> {
    /// Merges `other` into this router method by method, then appends its global middleware.
    pub(crate) fn merge(&mut self, other: Router<T, E>) {
        tracing::trace!(middleware = other.middleware.len(), "mounting router");

        for (method, table) in other.tables {
            match self.tables.get_mut(&method) {
                Some(target) => target.merge(table),
                None => {
                    self.tables.insert(method, table);
                }
            }
        }
        self.middleware.extend(other.middleware);
    }

    /// Re-registers every route of `other` under `prefix`.
    ///
    /// The global middleware of `other` is put at the head of each of its chains,
    /// so it only runs for the routes it was declared with.
    pub(crate) fn merge_at(&mut self, prefix: &str, other: Router<T, E>) -> crate::Result<()> {
        tracing::trace!(prefix, middleware = other.middleware.len(), "mounting router at prefix");

        let Router { tables, middleware } = other;
        for (method, table) in tables {
            if let Some(target) = self.tables.get_mut(&method) {
                target.merge_at(prefix, table, &middleware)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handler::handler;
    use crate::route::RouteKind;
    use crate::router::Router;
    use http_body_util::Empty;
    use hyper::body::Bytes;
    use hyper::Method;
    use std::convert::Infallible;

    type TestRouter = Router<Empty<Bytes>, Infallible>;

    fn noop_router(paths: &[&str]) -> TestRouter {
        paths
            .iter()
            .fold(Router::builder(), |builder, path| {
                builder.get(*path, |ctx| async move { Ok(ctx.next()) })
            })
            .middleware(|ctx| async move { Ok(ctx.next()) })
            .build()
            .unwrap()
    }

    #[test]
    fn mount_without_prefix_merges_every_key() {
        let mut parent = noop_router(&["/a", "/x/:id"]);
        let child = noop_router(&["/a", "/b", "/y/:id", "/y/:id/z"]);

        parent.merge(child);

        let get = parent.table(&Method::GET).unwrap();
        assert_eq!(get.static_route_map["/a"].len(), 2);
        assert!(get.static_route_map.contains_key("/b"));
        assert_eq!(get.named_route_partition_map[&2].len(), 2);
        assert_eq!(get.named_route_partition_map[&3].len(), 1);
        assert_eq!(parent.middleware_len(), 2);
    }

    #[test]
    fn mount_at_prefix_rewrites_paths_and_scopes_middleware() {
        let mut parent = noop_router(&["/"]);
        let child = noop_router(&["/", "/users", "/users/:id"]);

        parent.merge_at("/api/", child).unwrap();

        assert_eq!(
            parent.routes(),
            vec![
                (&Method::GET, "/", RouteKind::Static),
                (&Method::GET, "/api", RouteKind::Static),
                (&Method::GET, "/api/users", RouteKind::Static),
                (&Method::GET, "/api/users/:id", RouteKind::Named),
            ]
        );

        // child middleware + handler
        let get = parent.table(&Method::GET).unwrap();
        assert_eq!(get.static_route_map["/api/users"].len(), 2);
        assert_eq!(parent.middleware_len(), 1);
    }

    #[test]
    fn mount_at_propagates_invalid_patterns() {
        let mut parent = noop_router(&[]);
        let mut child = noop_router(&[]);
        child
            .register(&Method::GET, "/ok/:id", vec![handler(|ctx| async move { Ok(ctx.next()) })])
            .unwrap();

        assert!(parent.merge_at("/(", child).is_err());
    }
}

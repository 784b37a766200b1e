use std::collections::HashMap;
use std::net::SocketAddr;

/// Represents a map of the route parameters using the name of the parameter specified in the path as their respective keys.
///
/// Please refer to the [Route Parameters](./index.html#route-parameters) section for more info.
///
/// **Note:** This type shouldn't be created directly. It will be populated into the `req` object of the route handler and
/// can be accessed as `ctx.params()` or `req.params()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Set a new parameter entry with the specified key and value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.insert(param_name.into(), param_val.into());
    }

    /// Returns the route parameter value mapped with the specified key.
    pub fn get(&self, param_name: &str) -> Option<&str> {
        self.0.get(param_name).map(String::as_str)
    }

    /// Checks if a route parameter exists.
    pub fn has(&self, param_name: &str) -> bool {
        self.0.contains_key(param_name)
    }

    /// Returns the length of the route parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an [`Iterator`](https://doc.rust-lang.org/std/iter/trait.Iterator.html) over the parameter names.
    pub fn params_names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Returns an [`Iterator`](https://doc.rust-lang.org/std/iter/trait.Iterator.html) over the parameter entries
    /// as `(parameter_name: &String, parameter_value: &String)`.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// The decoded query string of a request, in the order the pairs appeared.
///
/// A name may occur more than once; [`get`](#method.get) returns the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn parse(query: &str) -> QueryParams {
        QueryParams(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// Returns the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter(move |(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

// Per-request data stored in the request extensions so that `RequestExt` can reach it.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestMeta {
    route_params: Option<RouteParams>,
    query_params: Option<QueryParams>,
    remote_addr: Option<SocketAddr>,
}

impl RequestMeta {
    pub(crate) fn with_route_params(route_params: RouteParams, query_params: QueryParams) -> RequestMeta {
        RequestMeta {
            route_params: Some(route_params),
            query_params: Some(query_params),
            remote_addr: None,
        }
    }

    pub(crate) fn with_remote_addr(remote_addr: SocketAddr) -> RequestMeta {
        RequestMeta {
            remote_addr: Some(remote_addr),
            ..Default::default()
        }
    }

    pub(crate) fn route_params(&self) -> Option<&RouteParams> {
        self.route_params.as_ref()
    }

    pub(crate) fn query_params(&self) -> Option<&QueryParams> {
        self.query_params.as_ref()
    }

    pub(crate) fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    pub(crate) fn extend(&mut self, other: RequestMeta) {
        if let Some(route_params) = other.route_params {
            self.route_params = Some(route_params);
        }
        if let Some(query_params) = other.query_params {
            self.query_params = Some(query_params);
        }
        if let Some(remote_addr) = other.remote_addr {
            self.remote_addr = Some(remote_addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_keep_order_and_decode() {
        let query = QueryParams::parse("tag=a&name=J%C3%B6rg+K&tag=b&flag");
        assert_eq!(query.len(), 4);
        assert_eq!(query.get("name"), Some("Jörg K"));
        assert_eq!(query.get("tag"), Some("a"));
        assert_eq!(query.get_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(query.get("flag"), Some(""));
        assert!(!query.has("missing"));
    }

    #[test]
    fn request_meta_extend_keeps_existing_fields() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let mut meta = RequestMeta::with_remote_addr(addr);
        let mut params = RouteParams::new();
        params.set("id", "7");
        meta.extend(RequestMeta::with_route_params(params, QueryParams::default()));

        assert_eq!(meta.remote_addr(), Some(addr));
        assert_eq!(meta.route_params().and_then(|p| p.get("id")), Some("7"));
        assert!(meta.query_params().map(QueryParams::is_empty).unwrap_or(false));
    }
}

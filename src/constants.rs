use hyper::Method;

/// The verbs a router keeps a route table for, in the order `all` registers them.
pub(crate) const SUPPORTED_METHODS: [Method; 5] = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

pub(crate) const NOT_FOUND_BODY: &str = "Route not found";

pub(crate) const NOT_IMPLEMENTED_BODY: &str = "Not Implemented";

// A `:name` segment captures one or more of these characters.
pub(crate) const PARAM_CAPTURE_CLASS: &str = r"[\w\-.~]+";

pub(crate) const PARAM_GROUP_PREFIX: &str = "__param";

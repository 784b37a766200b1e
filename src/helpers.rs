use crate::constants::{NOT_FOUND_BODY, NOT_IMPLEMENTED_BODY};
use crate::types::RequestMeta;
use http::Extensions;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::str::Utf8Error;

pub(crate) fn update_req_meta_in_extensions(ext: &mut Extensions, req_meta: RequestMeta) {
    if let Some(existing_req_meta) = ext.get_mut::<RequestMeta>() {
        existing_req_meta.extend(req_meta);
    } else {
        ext.insert(req_meta);
    }
}

pub(crate) fn percent_decode_request_path(val: &str) -> Result<String, Utf8Error> {
    percent_decode_str(val).decode_utf8().map(|val| val.to_string())
}

/// Gives a path exactly one leading slash and no trailing slash, `/` excepted.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);

    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{}", trimmed)
    }
}

/// Joins a mount prefix and a registered path into a normalized path.
pub(crate) fn join_paths(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    normalize_path(&format!("{}/{}", prefix, path))
}

pub(crate) fn not_found_response() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

pub(crate) fn not_implemented_response() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_IMPLEMENTED, NOT_IMPLEMENTED_BODY)
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
}

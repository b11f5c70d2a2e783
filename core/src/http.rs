//! HTTP request/response data and URL composition.
//!
//! # Design
//! Requests and responses are plain data. `ManagementClient::build_request`
//! produces an `HttpRequest` without touching the network, and a `Transport`
//! turns it into an `HttpResponse`. Payloads stay opaque strings so the
//! transport never needs to know the broker's JSON schemas.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Patch,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute. `body` is `None` for bodiless requests; an empty
/// string is never stored here.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Join `host`, `port` and `path` into `<host>:<port>/<path>`.
///
/// A single leading `/` is added when `path` lacks one. Nothing else is
/// normalized or rejected; `host` is expected to carry its scheme.
pub fn compose_url(host: &str, port: u16, path: &str) -> String {
    if path.starts_with('/') {
        format!("{host}:{port}{path}")
    } else {
        format!("{host}:{port}/{path}")
    }
}

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a user-supplied path segment.
///
/// `/` becomes `%2F`, a space `%20` and `+` `%2B`, so the default vhost
/// encodes to `%2F` and names survive the server's path decoding intact.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

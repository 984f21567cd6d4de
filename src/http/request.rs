use crate::http::headers::Headers;
use crate::http::method::Method;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

impl RequestLine {
    /// Splits the target into the route action (first path segment) and its
    /// params (everything after the first `/` that follows the action).
    pub fn split_action_and_params(&self) -> (&str, &str) {
        let path = self.target.strip_prefix('/').unwrap_or(&self.target);
        path.split_once('/').unwrap_or((path, ""))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Bytes,
}

impl Request {
    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers.get(k)
    }
}

use crate::http::headers::Headers;
use crate::http::status::Status;
use bytes::Bytes;
use std::fmt;

pub const PROTOCOL_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    headers: Headers,
    body: Bytes,
}

impl Response {
    pub fn from_parts(status: Status, headers: Headers, body: impl Into<Bytes>) -> Response {
        Response {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Status line only: no headers, no body.
    pub fn status_only(status: Status) -> Response {
        Self::from_parts(status, Headers::new(), Bytes::new())
    }

    /// Body-bearing response carrying `Content-Type` and an exact
    /// `Content-Length`.
    pub fn with_body(status: Status, content_type: &str, body: impl Into<Bytes>) -> Response {
        let body = body.into();
        let mut headers = Headers::new();
        headers.insert("Content-Type", content_type);
        headers.insert("Content-Length", body.len().to_string());
        Self::from_parts(status, headers, body)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn head(&self) -> String {
        let mut head = format!("{} {}\r\n", PROTOCOL_VERSION, self.status);
        if !self.headers.is_empty() {
            head.push_str(&format!("{}\r\n", self.headers));
        }
        head.push_str("\r\n");
        head
    }

    /// Wire form of the response.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = self.head();
        let mut resp_bytes = Vec::with_capacity(head.len() + self.body.len());
        resp_bytes.extend_from_slice(head.as_bytes());
        resp_bytes.extend_from_slice(&self.body);
        resp_bytes
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.head())?;
        f.write_str(&String::from_utf8_lossy(&self.body))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Splits wire bytes into (status line, header set, body).
    pub(crate) fn split_wire(wire: &[u8]) -> (String, Vec<String>, Vec<u8>) {
        let text = String::from_utf8_lossy(wire);
        let (head, body) = text.split_once("\r\n\r\n").expect("header terminator");
        let mut lines = head.split("\r\n").map(String::from);
        let status = lines.next().expect("status line");
        let mut headers: Vec<String> = lines.collect();
        headers.sort();
        (status, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn status_only_has_single_blank_line() {
        let resp = Response::status_only(Status::OK);
        assert_eq!(resp.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(
            Response::status_only(Status::NOT_FOUND).to_string(),
            "HTTP/1.1 404 Not Found\r\n\r\n"
        );
    }

    #[test]
    fn body_follows_headers_without_trailing_crlf() {
        let resp = Response::with_body(Status::OK, "text/plain", "abc");
        let wire = resp.to_bytes();

        assert!(wire.ends_with(b"\r\n\r\nabc"));
        let (status, headers, body) = split_wire(&wire);
        assert_eq!(status, "HTTP/1.1 200 OK");
        assert_eq!(headers, vec!["Content-Length: 3", "Content-Type: text/plain"]);
        assert_eq!(body, b"abc");
    }

    #[test]
    fn content_length_counts_bytes() {
        let resp = Response::with_body(Status::OK, "text/plain", "héllo");
        assert_eq!(resp.headers().get("Content-Length"), Some("6"));
    }

    #[test]
    fn non_utf8_body_is_sent_verbatim() {
        let payload = vec![0xffu8, 0x00, 0xfe];
        let resp = Response::with_body(Status::OK, "application/octet-stream", payload.clone());
        assert!(resp.to_bytes().ends_with(&payload));
    }

    #[test]
    fn headers_without_body() {
        let headers: Headers = [("X-Test", "1")].into_iter().collect();
        let resp = Response::from_parts(Status::CREATED, headers, Bytes::new());
        assert_eq!(resp.to_string(), "HTTP/1.1 201 Created\r\nX-Test: 1\r\n\r\n");
    }
}

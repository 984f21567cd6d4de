use crate::http::headers::Headers;
use crate::http::method::Method;
use crate::http::request::{Request, RequestLine};
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

static REQUEST_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<method>[A-Z]+) (?P<target>/[^ ]*) (?P<version>HTTP/[0-9]+\.[0-9]+)$")
        .expect("request line pattern is valid")
});

const CRLF: &str = "\r\n";
pub(super) const HEADER_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("malformed header line {index}: {line:?}")]
    MalformedHeaderLine { index: usize, line: String },
}

pub(super) fn find_subsequence(data: &[u8], needle: &[u8]) -> Option<usize> {
    data.windows(needle.len()).position(|w| w == needle)
}

/// Parses a request: request line, headers up to the first empty line, and
/// the single line that follows it as the body. Only the head is decoded as
/// text; body bytes are kept as they arrived.
pub fn parse_request(raw: &[u8]) -> Result<Request, ParseError> {
    let (head, rest) = match find_subsequence(raw, HEADER_END) {
        Some(pos) => (&raw[..pos], &raw[pos + HEADER_END.len()..]),
        None => (raw, &raw[raw.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split(CRLF).enumerate();

    let first = lines.next().map(|(_, l)| l).unwrap_or_default();
    let request_line = parse_request_line(first)?;

    let mut headers = Headers::new();
    for (index, line) in lines {
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(index, line)?;
        headers.insert(name, value);
    }

    let body_end = find_subsequence(rest, CRLF.as_bytes()).unwrap_or(rest.len());

    Ok(Request {
        request_line,
        headers,
        body: Bytes::copy_from_slice(&rest[..body_end]),
    })
}

pub(super) fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let capt = REQUEST_LINE_RE
        .captures(line)
        .ok_or_else(|| ParseError::MalformedRequestLine(line.to_string()))?;

    let method = Method::from_str(&capt["method"])
        .map_err(|_| ParseError::MalformedRequestLine(line.to_string()))?;

    Ok(RequestLine {
        method,
        target: capt["target"].to_string(),
        version: capt["version"].to_string(),
    })
}

pub(super) fn parse_header_line(index: usize, line: &str) -> Result<(&str, &str), ParseError> {
    let malformed = || ParseError::MalformedHeaderLine {
        index,
        line: line.to_string(),
    };

    let (name, value) = line.split_once(':').ok_or_else(malformed)?;
    let name = name.trim_ascii();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(malformed());
    }

    Ok((name, value.trim_ascii()))
}

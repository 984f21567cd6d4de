use crate::concurrency::ThreadPool;
use crate::http::BUFFER_SIZE;
use crate::http::parse::{HEADER_END, find_subsequence};
use crate::http::{Response, Status};
use crate::router::{HandleError, Router};
use anyhow::Context;
use bytes::{Bytes, BytesMut};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    pool: ThreadPool,
}

impl Server {
    fn new(listener: TcpListener, num_workers: usize, router: Router) -> anyhow::Result<Server> {
        Ok(Server {
            listener,
            router: Arc::new(router),
            pool: ThreadPool::new(num_workers)?,
        })
    }

    pub fn from_tcp_addr(addr: &str, num_workers: usize, router: Router) -> anyhow::Result<Server> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("failed to bind to {}", addr))?;
        Server::new(listener, num_workers, router)
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener.local_addr().context("Can't read local address")
    }

    pub fn run(self) -> anyhow::Result<()> {
        for stream in self.listener.incoming() {
            let stream = stream.context("error accepting connection")?;
            let router = Arc::clone(&self.router);
            self.pool.execute(move || {
                if let Err(e) = process_incoming(&router, stream) {
                    log::error!("{:#}", e);
                }
            })?;
        }
        Ok(())
    }
}

fn process_incoming(router: &Router, mut stream: TcpStream) -> anyhow::Result<()> {
    stream
        .set_read_timeout(Some(READ_TIMEOUT))
        .context("Can't set read timeout")?;

    log::debug!("accepted new connection: {:?}", stream.peer_addr());

    let raw = read_request(&mut stream)?;
    let response = respond(router, &raw);

    stream
        .write_all(&response.to_bytes())
        .context("failed to write response")?;
    Ok(())
}

/// Turns hard failures out of the router into status-only responses.
fn respond(router: &Router, raw: &[u8]) -> Response {
    match router.handle(raw) {
        Ok(response) => response,
        Err(HandleError::Parse(e)) => {
            log::warn!("rejecting request: {}", e);
            Response::status_only(Status::BAD_REQUEST)
        }
        Err(HandleError::File(e)) => {
            log::error!("failed to serve file: {}", e);
            Response::status_only(Status::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Reads until the request is complete or the peer stops sending. A read
/// timeout after some bytes have arrived ends the request with what is there.
fn read_request(readable: &mut impl Read) -> anyhow::Result<Bytes> {
    let mut data = BytesMut::with_capacity(BUFFER_SIZE);
    let mut buf = [0u8; BUFFER_SIZE];

    while !is_complete(&data) {
        let n = match readable.read(&mut buf) {
            Ok(n) => n,
            Err(e) if is_timeout(&e) && !data.is_empty() => {
                log::debug!("read timed out with {} bytes buffered", data.len());
                break;
            }
            Err(e) => return Err(e).context("Error while reading request"),
        };
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    Ok(data.freeze())
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

/// True once the header block has arrived together with as many body bytes
/// as its `Content-Length` announces.
fn is_complete(data: &[u8]) -> bool {
    let Some(head_end) = find_subsequence(data, HEADER_END) else {
        return false;
    };

    let body_start = head_end + HEADER_END.len();
    let head = String::from_utf8_lossy(&data[..head_end]);
    let content_length = head
        .split("\r\n")
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim_ascii().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim_ascii().parse::<usize>().ok())
        .unwrap_or(0);

    data.len() - body_start >= content_length
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::thread;
    use tempfile::TempDir;

    /// Hands out the input a few bytes at a time.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn incomplete_until_header_end() {
        assert!(!is_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
        assert!(is_complete(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"));
    }

    #[test]
    fn waits_for_announced_body() {
        let head = b"POST /files/a HTTP/1.1\r\ncontent-length: 5\r\n\r\n";
        let mut data = head.to_vec();
        data.extend_from_slice(b"hel");
        assert!(!is_complete(&data));
        data.extend_from_slice(b"lo");
        assert!(is_complete(&data));
    }

    #[test]
    fn reads_request_split_across_reads() {
        let raw = b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let mut rdr = Trickle { data: raw, step: 7 };
        assert_eq!(read_request(&mut rdr).unwrap(), &raw[..]);
    }

    #[test]
    fn stops_at_eof() {
        let mut rdr = Cursor::new(b"GET / HTTP/1.1\r\n".to_vec());
        assert_eq!(read_request(&mut rdr).unwrap(), &b"GET / HTTP/1.1\r\n"[..]);
    }

    /// Delivers its input, then fails every further read with `kind`.
    struct Stalled {
        data: Option<Vec<u8>>,
        kind: io::ErrorKind,
    }

    impl Read for Stalled {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.take() {
                Some(d) => {
                    buf[..d.len()].copy_from_slice(&d);
                    Ok(d.len())
                }
                None => Err(io::Error::from(self.kind)),
            }
        }
    }

    #[test]
    fn timeout_after_partial_request_keeps_buffered_bytes() {
        let partial = b"GET /echo/abc HTTP/1.1\r\nHost: x".to_vec();
        for kind in [io::ErrorKind::WouldBlock, io::ErrorKind::TimedOut] {
            let mut rdr = Stalled {
                data: Some(partial.clone()),
                kind,
            };
            let raw = read_request(&mut rdr).unwrap();
            assert_eq!(raw, &partial[..]);

            let router = Router::new("");
            assert_eq!(respond(&router, &raw).body(), b"abc");
        }
    }

    #[test]
    fn timeout_before_any_byte_is_an_error() {
        let mut rdr = Stalled {
            data: None,
            kind: io::ErrorKind::WouldBlock,
        };
        assert!(read_request(&mut rdr).is_err());
    }

    #[test]
    fn binary_body_survives_read_and_dispatch() {
        let dir = TempDir::new().unwrap();
        let router = Router::new(dir.path());
        let mut raw = b"POST /files/b.bin HTTP/1.1\r\nContent-Length: 3\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0xff, 0x00, 0xfe]);

        let mut rdr = Trickle { data: &raw, step: 4 };
        let read = read_request(&mut rdr).unwrap();
        assert_eq!(respond(&router, &read).status(), Status::CREATED);
        assert_eq!(fs::read(dir.path().join("b.bin")).unwrap(), [0xffu8, 0x00, 0xfe]);
    }

    #[test]
    fn parse_failure_becomes_bad_request() {
        let router = Router::new("");
        let resp = respond(&router, b"not http at all");
        assert_eq!(resp.to_bytes(), b"HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn read_failure_becomes_internal_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let router = Router::new(dir.path());

        let resp = respond(&router, b"GET /files/sub HTTP/1.1\r\n\r\n");
        assert_eq!(resp.status(), Status::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn serves_requests_over_tcp() {
        let dir = TempDir::new().unwrap();
        let server = Server::from_tcp_addr("127.0.0.1:0", 2, Router::new(dir.path())).unwrap();
        let addr = server.local_addr().unwrap();
        thread::spawn(move || server.run());

        let exchange = |raw: &[u8]| {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(raw).unwrap();
            let mut resp = Vec::new();
            stream.read_to_end(&mut resp).unwrap();
            resp
        };

        assert_eq!(
            exchange(b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello"),
            b"HTTP/1.1 201 Created\r\n\r\n"
        );
        let resp = exchange(b"GET /files/a.txt HTTP/1.1\r\n\r\n");
        assert!(resp.starts_with(b"HTTP/1.1 200 OK\r\n"));
        assert!(resp.ends_with(b"\r\n\r\nhello"));
        assert_eq!(
            exchange(b"GET /nonexistent HTTP/1.1\r\n\r\n"),
            b"HTTP/1.1 404 Not Found\r\n\r\n"
        );
    }
}

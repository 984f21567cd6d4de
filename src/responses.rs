use crate::files::{FileError, FileStore};
use crate::http::{Response, Status};
use bytes::Bytes;

const TEXT_PLAIN: &str = "text/plain";
const OCTET_STREAM: &str = "application/octet-stream";

pub fn status_only(status: Status) -> Response {
    Response::status_only(status)
}

pub fn echo(body: &str) -> Response {
    Response::with_body(Status::OK, TEXT_PLAIN, Bytes::copy_from_slice(body.as_bytes()))
}

// Same shape as `echo` today; the two routes are free to diverge.
pub fn user_agent(agent: &str) -> Response {
    Response::with_body(Status::OK, TEXT_PLAIN, Bytes::copy_from_slice(agent.as_bytes()))
}

/// Serves `name` from the store. A missing file (or a name that can not
/// live in the store) is a 404; any other read failure is returned.
pub fn get_file(store: &FileStore, name: &str) -> Result<Response, FileError> {
    match store.read(name) {
        Ok(content) => Ok(Response::with_body(Status::OK, OCTET_STREAM, content)),
        Err(FileError::NotFound(_) | FileError::InvalidName(_)) => {
            Ok(status_only(Status::NOT_FOUND))
        }
        Err(e) => Err(e),
    }
}

pub fn post_file(store: &FileStore, name: &str, body: &[u8]) -> Response {
    match store.write(name, body) {
        Ok(()) => status_only(Status::CREATED),
        Err(e) => {
            log::error!("Error creating file: {}", e);
            status_only(Status::INTERNAL_SERVER_ERROR)
        }
    }
}

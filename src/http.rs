pub mod headers;
pub mod method;
pub mod parse;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use headers::Headers;
pub use request::{Request, RequestLine};
pub use response::Response;
pub use status::Status;

const BUFFER_SIZE: usize = 1024;

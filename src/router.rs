use crate::files::{FileError, FileStore};
use crate::http::method::Method;
use crate::http::parse::{ParseError, parse_request};
use crate::http::{Request, Response, Status};
use crate::responses;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that escape request handling. Everything else becomes a
/// response with a matching status.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    File(#[from] FileError),
}

/// Stateless dispatch from (method, action, params) to a response builder.
#[derive(Debug, Clone)]
pub struct Router {
    files: FileStore,
}

impl Router {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Router {
            files: FileStore::new(directory),
        }
    }

    pub fn handle(&self, raw: &[u8]) -> Result<Response, HandleError> {
        let request = parse_request(raw)?;
        let response = self.route(&request)?;
        log::info!(
            "{} {} {} -> {} ({} bytes)",
            request.request_line.method,
            request.request_line.target,
            request.request_line.version,
            response.status().code_num,
            response.body().len()
        );
        Ok(response)
    }

    pub fn route(&self, request: &Request) -> Result<Response, FileError> {
        let (action, params) = request.request_line.split_action_and_params();

        let response = match action {
            "" => responses::status_only(Status::OK),
            "echo" => responses::echo(params),
            "user-agent" => {
                responses::user_agent(request.get_header("User-Agent").unwrap_or_default())
            }
            "files" => match request.request_line.method {
                Method::GET => responses::get_file(&self.files, params)?,
                Method::POST => responses::post_file(&self.files, params, &request.body),
                _ => responses::status_only(Status::METHOD_NOT_ALLOWED),
            },
            _ => responses::status_only(Status::NOT_FOUND),
        };
        Ok(response)
    }
}

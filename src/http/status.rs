use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub code_num: u16,
    pub message: &'static str,
}

impl Status {
    pub const OK: Status = Status {
        code_num: 200,
        message: "OK",
    };
    pub const CREATED: Status = Status {
        code_num: 201,
        message: "Created",
    };
    pub const BAD_REQUEST: Status = Status {
        code_num: 400,
        message: "Bad Request",
    };
    pub const NOT_FOUND: Status = Status {
        code_num: 404,
        message: "Not Found",
    };
    pub const INTERNAL_SERVER_ERROR: Status = Status {
        code_num: 500,
        message: "Internal Server Error",
    };
    // 503 is what clients of the files route have always received here, not 405.
    pub const METHOD_NOT_ALLOWED: Status = Status {
        code_num: 503,
        message: "Method Not Allowed",
    };
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code_num, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_code_and_text() {
        assert_eq!(Status::OK.to_string(), "200 OK");
        assert_eq!(Status::NOT_FOUND.to_string(), "404 Not Found");
        assert_eq!(
            Status::INTERNAL_SERVER_ERROR.to_string(),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn method_not_allowed_keeps_legacy_code() {
        assert_eq!(Status::METHOD_NOT_ALLOWED.code_num, 503);
        assert_eq!(
            Status::METHOD_NOT_ALLOWED.to_string(),
            "503 Method Not Allowed"
        );
    }
}

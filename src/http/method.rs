use std::fmt;
use strum::EnumString;

#[derive(EnumString, Debug, Clone, PartialEq, Eq)]
pub enum Method {
    #[strum(serialize = "GET")]
    GET,
    #[strum(serialize = "POST")]
    POST,
    #[strum(serialize = "PUT")]
    PUT,
    #[strum(serialize = "DELETE")]
    DELETE,
    #[strum(serialize = "PATCH")]
    PATCH,
    #[strum(serialize = "HEAD")]
    HEAD,
    #[strum(serialize = "OPTIONS")]
    OPTIONS,
    #[strum(default)]
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::Other(m) => m,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use crate::error::RequestError;
use crate::http::request::{Method, Request, RequestLine, Version};

/// Reasons a request line fails the grammar `METHOD SP /target SP HTTP/1.x`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty request line")]
    Empty,
    #[error("unsupported method {0:?}")]
    UnsupportedMethod(String),
    #[error("missing request target")]
    MissingTarget,
    #[error("invalid request target {0:?}")]
    InvalidTarget(String),
    #[error("missing protocol version")]
    MissingVersion,
    #[error("unsupported protocol version {0:?}")]
    UnsupportedVersion(String),
}

/// Returns the first line of a header block without its terminator.
pub fn first_line(raw: &str) -> &str {
    let line = raw.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parses a request line.
///
/// Fields are separated by exactly one space. The method must be one of
/// GET, POST, PUT or DELETE, the target must start with `/` and hold no
/// whitespace or control characters, and the version must be `HTTP/1.0` or
/// `HTTP/1.1` with nothing after it.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts = line.splitn(3, ' ');

    let method = Method::from_token(parts.next().unwrap_or_default());
    if !method.is_recognised() {
        return Err(ParseError::UnsupportedMethod(method.as_str().to_string()));
    }

    let target = parts.next().ok_or(ParseError::MissingTarget)?;
    if !target.starts_with('/') || target.contains(|c: char| c.is_whitespace() || c.is_control()) {
        return Err(ParseError::InvalidTarget(target.to_string()));
    }

    let version = match parts.next().ok_or(ParseError::MissingVersion)? {
        "HTTP/1.0" => Version::Http10,
        "HTTP/1.1" => Version::Http11,
        other => return Err(ParseError::UnsupportedVersion(other.to_string())),
    };

    Ok(RequestLine {
        method,
        target: target.to_string(),
        version,
    })
}

/// Finds the value of the first `Host:` header line.
///
/// The label is matched case-sensitively and the request line is never
/// searched. The value is the first whitespace-delimited token after the
/// colon; an empty value counts as absent.
pub fn find_host(raw: &str) -> Option<&str> {
    raw.split('\n')
        .skip(1)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("Host:"))
        .and_then(|value| value.split_whitespace().next())
}

/// Classifies a request by its request line alone.
///
/// Returns the line for a well-formed GET, 405 for any other recognised
/// method and 400 for anything that failed the grammar.
pub fn validate(request: &Request) -> Result<&RequestLine, RequestError> {
    let line = request
        .line()
        .map_err(|e| RequestError::Malformed(e.clone()))?;

    match &line.method {
        Method::Get => Ok(line),
        other => Err(RequestError::MethodNotAllowed(other.clone())),
    }
}

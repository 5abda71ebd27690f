use std::fmt;

use crate::http::parser::{self, ParseError};

/// HTTP request methods.
///
/// Only GET is served. POST, PUT and DELETE are recognised so they can be
/// answered with 405 Method Not Allowed; any other token is kept as `Other`
/// and treated as a malformed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// POST - Create or submit data
    Post,
    /// PUT - Replace a resource
    Put,
    /// DELETE - Delete a resource
    Delete,
    /// Any token outside the recognised set
    Other(String),
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use portier::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::Get);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Other(token) => token,
        }
    }

    /// Whether the method belongs to the recognised set.
    pub fn is_recognised(&self) -> bool {
        !matches!(self, Method::Other(_))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol versions accepted on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// A request line that matched the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Request target as sent, query string included
    pub target: String,
    pub version: Version,
}

impl RequestLine {
    /// The target with everything from the first `?` removed.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map(|(path, _)| path)
            .unwrap_or(&self.target)
    }

    /// The query string, if the target carried one.
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}

/// A request head read off a connection.
///
/// Holds the raw header block along with the fields derived from it. The
/// request line may have failed the grammar; that outcome is kept rather
/// than discarded so the host check can still run first.
#[derive(Debug, Clone)]
pub struct Request {
    raw: String,
    line: Result<RequestLine, ParseError>,
    host: Option<String>,
}

impl Request {
    /// Derives the request fields from a raw header block.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let line = parser::parse_request_line(parser::first_line(&raw));
        let host = parser::find_host(&raw).map(str::to_string);

        Self { raw, line, host }
    }

    /// The header block exactly as it was read.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed request line, or why it failed the grammar.
    pub fn line(&self) -> Result<&RequestLine, &ParseError> {
        self.line.as_ref()
    }

    /// Value of the `Host` header, if one was sent.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Method token for logging, whether or not the line parsed.
    pub fn method_hint(&self) -> &str {
        match &self.line {
            Ok(line) => line.method.as_str(),
            Err(_) => parser::first_line(&self.raw)
                .split(' ')
                .next()
                .unwrap_or_default(),
        }
    }
}

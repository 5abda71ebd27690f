use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Content type sent with every error page.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// HTTP status codes the server can produce.
///
/// This is a closed set:
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request line or unknown host
/// - `NotFound` (404): No such file under the site root
/// - `MethodNotAllowed` (405): Recognised method other than GET
/// - `InternalServerError` (500): Unexpected I/O failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use portier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use portier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Returns the canned HTML page sent with an error status.
    ///
    /// `None` for `Ok`, whose body is always the requested file.
    pub fn canned_body(&self) -> Option<&'static str> {
        match self {
            StatusCode::Ok => None,
            StatusCode::BadRequest => Some(
                "<html><body><h1>400 Requête Incorrecte</h1>\
                 <p>Votre requête n'a pas pu être comprise par le serveur.</p></body></html>",
            ),
            StatusCode::NotFound => Some(
                "<html><body><h1>404 Introuvable</h1>\
                 <p>L'URL demandée n'a pas été trouvée sur ce serveur.</p></body></html>",
            ),
            StatusCode::MethodNotAllowed => Some(
                "<html><body><h1>405 Méthode Non Autorisée</h1>\
                 <p>La méthode spécifiée dans la requête n'est pas autorisée pour la \
                 ressource identifiée par l'URL de la requête.</p></body></html>",
            ),
            StatusCode::InternalServerError => Some(
                "<html><body><h1>500 Erreur Interne du Serveur</h1>\
                 <p>Le serveur a rencontré une erreur interne ou une erreur de configuration \
                 et n'a pas pu terminer votre requête.</p></body></html>",
            ),
        }
    }

    /// Whether this status is an error status.
    pub fn is_error(&self) -> bool {
        !matches!(self, StatusCode::Ok)
    }
}

/// Formats a timestamp for the `Date` header, e.g. `Mon, 02 Jan 2006 15:04:05 GMT`.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep their insertion order, which is the order they go on the wire.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body("hello")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Adds or replaces a header.
    ///
    /// A replaced header keeps its original position.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds the error form: canned page, default content type, no length.
    ///
    /// Field order: Date, Server, Content-Type, Connection.
    pub fn error(status: StatusCode, server: &str, now: DateTime<Utc>) -> Self {
        debug_assert!(status.is_error(), "error form built for {}", status.as_u16());
        let page = status.canned_body().unwrap_or_default();

        ResponseBuilder::new(status)
            .header("Date", http_date(now))
            .header("Server", server)
            .header("Content-Type", DEFAULT_CONTENT_TYPE)
            .header("Connection", "close")
            .body(format!("{page}\r\n"))
            .build()
    }

    /// Builds the success form for a served file.
    ///
    /// Field order: Date, Server, Connection, Content-Length, Content-Type.
    pub fn file(
        content: Bytes,
        content_type: &str,
        server: &str,
        now: DateTime<Utc>,
    ) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Date", http_date(now))
            .header("Server", server)
            .header("Connection", "close")
            .header("Content-Length", content.len().to_string())
            .header("Content-Type", content_type)
            .body(content)
            .build()
    }

    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

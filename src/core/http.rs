//! API client that attaches session and anti-forgery headers.
//!
//! The client never retries, never times out and never inspects the status
//! code: whatever body comes back is handed to the JSON parser.

use std::fmt;
use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::config::{CSRF_COOKIE, SESSION_COOKIE, headers};
use crate::core::cookie::{CookieSource, Cookies};
use crate::core::error::FetchError;

/// HTTP methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as returned by [`ApiClient::delete`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::JsonParse(e.to_string()))
    }
}

/// Sends prepared requests over the network.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, FetchError>>;
}

/// JSON API client bound to a transport and the cookie jar.
pub struct ApiClient<T, C> {
    transport: T,
    cookies: Cookies<C>,
}

impl<T: Transport, C: CookieSource> ApiClient<T, C> {
    pub fn new(transport: T, cookies: C) -> Self {
        Self {
            transport,
            cookies: Cookies::new(cookies),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and parse the response body as JSON.
    pub async fn get<R: DeserializeOwned>(&self, url: &str) -> Result<R, FetchError> {
        self.dispatch(Method::Get, url, None).await?.json()
    }

    /// POST `body` as JSON to `url` and parse the response body as JSON.
    pub async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::Post, url, Some(body)).await?.json()
    }

    /// PUT `body` as JSON to `url` and parse the response body as JSON.
    pub async fn put<B, R>(&self, url: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::Put, url, Some(body)).await?.json()
    }

    /// DELETE `url` and return the raw response.
    pub async fn delete(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.dispatch(Method::Delete, url, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, FetchError> {
        let request = self.build_request(method, url, body);
        tracing::debug!(%method, url, "dispatching request");
        self.transport.send(request).await
    }

    /// Assemble a request with the session and anti-forgery headers.
    ///
    /// A missing cookie omits its header instead of sending a literal `null`.
    /// The API authenticates with the session cookie; the bearer header is
    /// not read by the server, and a request without the anti-forgery header
    /// is rejected the same way as one carrying `null`.
    pub fn build_request(&self, method: Method, url: &str, body: Option<String>) -> HttpRequest {
        let mut request_headers = Vec::with_capacity(3);

        if let Some(session) = self.cookies.get(SESSION_COOKIE) {
            request_headers.push((headers::AUTHORIZATION.to_string(), format!("Bearer {session}")));
        }
        if let Some(token) = self.cookies.get(CSRF_COOKIE) {
            request_headers.push((headers::CSRF_TOKEN.to_string(), token));
        }
        if body.is_some() {
            request_headers.push((headers::CONTENT_TYPE.to_string(), headers::JSON.to_string()));
        }

        HttpRequest {
            method,
            url: url.to_string(),
            headers: request_headers,
            body,
        }
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, FetchError> {
    serde_json::to_string(body).map_err(|e| FetchError::JsonSerialize(e.to_string()))
}

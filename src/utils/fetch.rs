//! Network transport over the browser Fetch API.

use gloo_net::http::{Method as FetchMethod, RequestBuilder};
use web_sys::{Response, ResponseInit};

use crate::core::error::FetchError;
use crate::core::http::{HttpRequest, HttpResponse, Method, Transport};

/// Sends requests with `fetch`. No timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn fetch_method(method: Method) -> FetchMethod {
    match method {
        Method::Get => FetchMethod::GET,
        Method::Post => FetchMethod::POST,
        Method::Put => FetchMethod::PUT,
        Method::Delete => FetchMethod::DELETE,
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = RequestBuilder::new(&request.url).method(fetch_method(request.method));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| FetchError::RequestCreationFailed(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::ResponseReadFailed(e.to_string()))?;

        tracing::debug!(status, url = %request.url, "response received");
        Ok(HttpResponse { status, body })
    }
}

/// Rebuild a Fetch `Response` with the status and body of `response`.
///
/// Response headers are not carried over.
pub fn to_web_response(response: &HttpResponse) -> Result<Response, FetchError> {
    let init = ResponseInit::new();
    init.set_status(response.status);
    Response::new_with_opt_str_and_init(Some(&response.body), &init)
        .map_err(|e| FetchError::ResponseReadFailed(super::dom::describe_js(&e)))
}

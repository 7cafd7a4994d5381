use reqwest::Url;
use reqwest::blocking::Client as ReqwestClient;
use tracing::{debug, warn};

use crate::{ApiRequest, ManagementError, parse_api_error};

/// Executes an [`ApiRequest`] against the Management API.
///
/// Returns the raw body of a successful response, `None` when it is empty.
/// Failed calls are surfaced as-is; implementations must not retry.
pub trait Transport {
    fn call(&self, request: &ApiRequest) -> Result<Option<String>, ManagementError>;
}

/// Blocking reqwest transport rooted at the versioned API URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: ReqwestClient,
}

impl HttpTransport {
    #[must_use]
    pub const fn new(base_url: Url, client: ReqwestClient) -> Self {
        Self { base_url, client }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn call(&self, request: &ApiRequest) -> Result<Option<String>, ManagementError> {
        let url = request.url(&self.base_url)?;
        debug!(method = %request.method(), endpoint = %request.endpoint(), "sending request");

        let mut req = self.client.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            req = req.body(body.to_string());
        }
        let response = req.send()?;

        let status = response.status();
        let text = response.text()?;
        if status.is_success() {
            debug!(status = status.as_u16(), "request succeeded");
            Ok(if text.trim().is_empty() { None } else { Some(text) })
        } else {
            warn!(
                method = %request.method(),
                endpoint = %request.endpoint(),
                status = status.as_u16(),
                "request failed"
            );
            Err(parse_api_error(status.as_u16(), &text))
        }
    }
}

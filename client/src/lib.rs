use std::fmt::Write;
use std::path::Path;
use std::time::Duration;
use std::{fs, io};

use reqwest::Url;
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use common::{ApiError, InvalidArgument};

mod api;
mod request;
mod transport;

pub use api::v2::ClientGrantsApi;
pub use request::ApiRequest;
pub use reqwest::Method;
pub use transport::{HttpTransport, Transport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V2,
}

impl ApiVersion {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::V2 => "api/v2/",
        }
    }
}

pub struct ManagementClientBuilder {
    version: ApiVersion,
}

impl ManagementClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: ApiVersion::default(),
        }
    }

    #[must_use]
    pub const fn version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    pub fn build(self, config: &ClientConfig) -> Result<ManagementClient, ManagementError> {
        ManagementClient::new(config, self.version)
    }
}

impl Default for ManagementClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub const NAME: &str = "GrantsClient";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT_VALUE: &str = concat!("GrantsClient/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{}", format_api_error(*.status, error))]
    Api { status: u16, error: ApiError },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn format_api_error(status: u16, error: &ApiError) -> String {
    let mut msg = format!("API error:\n  Status: {status}");
    if !error.error.is_empty() {
        let _ = write!(msg, "\n  Error: {}", error.error);
    }
    if let Some(code) = &error.error_code {
        let _ = write!(msg, "\n  Code: {code}");
    }
    let _ = write!(msg, "\n  Message: {}", error.message);
    msg
}

/// Turns a non-2xx body into an API error, keeping the raw text when it is not JSON.
pub(crate) fn parse_api_error(status: u16, text: &str) -> ManagementError {
    let error = serde_json::from_str(text).unwrap_or_else(|_| ApiError::from_raw(status, text));
    ManagementError::Api { status, error }
}

#[derive(Debug, Clone)]
pub enum Credential {
    File(String),
    Token(String),
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    token: String,
}

pub struct ClientConfig {
    pub domain: String,
    pub credential: Credential,
    pub timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn from_token(domain: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            credential: Credential::Token(token.into()),
            timeout: TIMEOUT,
        }
    }

    #[must_use]
    pub fn from_file(domain: impl Into<String>, credentials_file: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            credential: Credential::File(credentials_file.into()),
            timeout: TIMEOUT,
        }
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Management API root for `version`, e.g. `https://tenant.example.com/api/v2/`.
    ///
    /// A bare domain gets the `https` scheme.
    pub fn base_url(&self, version: ApiVersion) -> Result<Url, ManagementError> {
        let domain = self.domain.trim().trim_end_matches('/');
        let origin = if domain.starts_with("https://") || domain.starts_with("http://") {
            format!("{domain}/")
        } else {
            format!("https://{domain}/")
        };
        Ok(Url::parse(&origin)?.join(version.prefix())?)
    }

    fn load_token(&self) -> Result<String, ManagementError> {
        match &self.credential {
            Credential::Token(token) => Ok(token.clone()),
            Credential::File(path) => Ok(load_credentials_file(path)?.token),
        }
    }
}

fn load_credentials_file<P: AsRef<Path>>(path: P) -> Result<CredentialsFile, ManagementError> {
    let credentials_file = path.as_ref();
    if credentials_file.is_file()
        && credentials_file.extension().and_then(|ext| ext.to_str()) == Some("toml")
    {
        let content = fs::read_to_string(credentials_file)?;
        let credentials: CredentialsFile = toml::de::from_str(&content)?;
        return Ok(credentials);
    }
    Err(ManagementError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Invalid credentials file",
    )))
}

#[derive(Debug)]
pub struct ManagementClient<T = HttpTransport> {
    transport: T,
    version: ApiVersion,
}

impl ManagementClient<HttpTransport> {
    fn new(config: &ClientConfig, version: ApiVersion) -> Result<Self, ManagementError> {
        let base_url = config.base_url(version)?;
        let token = config.load_token()?;
        let headers = Self::set_headers(&token)?;

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            transport: HttpTransport::new(base_url, client),
            version,
        })
    }

    #[must_use]
    pub fn builder() -> ManagementClientBuilder {
        ManagementClientBuilder::new()
    }

    #[must_use]
    pub const fn info(&self) -> &Url {
        self.transport.base_url()
    }

    fn set_headers(token: &str) -> Result<HeaderMap, ManagementError> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl<T: Transport> ManagementClient<T> {
    /// Wraps an already configured transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self {
            transport,
            version: ApiVersion::V2,
        }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn client_grants(&self) -> ClientGrantsApi<'_, T> {
        match self.version {
            ApiVersion::V2 => ClientGrantsApi::new(self),
        }
    }

    pub(crate) fn call<R: serde::de::DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<R, ManagementError> {
        let body = self.transport.call(request)?;
        Ok(serde_json::from_str(body.as_deref().unwrap_or("null"))?)
    }

    pub(crate) fn call_empty(&self, request: &ApiRequest) -> Result<(), ManagementError> {
        self.transport.call(request).map(|_| ())
    }
}

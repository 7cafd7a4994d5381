use reqwest::{Method, Url};
use serde::Serialize;

use crate::ManagementError;

/// A single Management API call: verb, path below the API root, query and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    path: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub const fn new(method: Method) -> Self {
        Self {
            method,
            path: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub const fn get() -> Self {
        Self::new(Method::GET)
    }

    #[must_use]
    pub const fn post() -> Self {
        Self::new(Method::POST)
    }

    #[must_use]
    pub const fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    #[must_use]
    pub const fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Appends one path segment. Segments are percent-encoded individually.
    #[must_use]
    pub fn add_path(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(self, |request, (key, value)| request.with_param(key, value))
    }

    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ManagementError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Path relative to the API root, unencoded. Used for logging.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.path.join("/")
    }

    pub fn url(&self, base: &Url) -> Result<Url, ManagementError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&self.path);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://tenant.example.com/api/v2/").unwrap()
    }

    #[test]
    fn test_url_without_query() {
        let request = ApiRequest::delete().add_path("client-grants").add_path("cgr_1");
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "https://tenant.example.com/api/v2/client-grants/cgr_1"
        );
    }

    #[test]
    fn test_url_encodes_segments() {
        let request = ApiRequest::get().add_path("client-grants").add_path("a/b c");
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "https://tenant.example.com/api/v2/client-grants/a%2Fb%20c"
        );
    }

    #[test]
    fn test_url_query_keeps_order() {
        let request = ApiRequest::get()
            .add_path("client-grants")
            .with_param("audience", "https://api.example.com/")
            .with_params([("page", "2"), ("per_page", "10")]);
        assert_eq!(
            request.url(&base()).unwrap().query(),
            Some("audience=https%3A%2F%2Fapi.example.com%2F&page=2&per_page=10")
        );
    }

    #[test]
    fn test_with_body_serializes_once() {
        let request = ApiRequest::patch()
            .with_body(&serde_json::json!({"scope": ["a"]}))
            .unwrap();
        assert_eq!(request.body(), Some(r#"{"scope":["a"]}"#));
        assert_eq!(request.method(), &Method::PATCH);
    }

    #[test]
    fn test_endpoint() {
        let request = ApiRequest::get().add_path("client-grants").add_path("cgr_1");
        assert_eq!(request.endpoint(), "client-grants/cgr_1");
        assert!(request.query().is_empty());
        assert!(request.body().is_none());
    }
}

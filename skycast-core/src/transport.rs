use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// A query-string value. `Null` entries are dropped before URL construction,
/// never serialized as empty or literal "null".
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl QueryValue {
    pub(crate) fn render(&self) -> Option<String> {
        match self {
            QueryValue::Str(v) => Some(v.clone()),
            QueryValue::Int(v) => Some(v.to_string()),
            QueryValue::Float(v) => Some(v.to_string()),
            QueryValue::Bool(v) => Some(v.to_string()),
            QueryValue::Null => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Append rendered query parameters onto a base URL.
pub fn build_url(base: &str, params: &[(&str, QueryValue)]) -> Result<Url, TransportError> {
    let mut url = Url::parse(base)?;

    let pairs: Vec<(&str, String)> = params
        .iter()
        .filter_map(|(name, value)| value.render().map(|rendered| (*name, rendered)))
        .collect();

    if !pairs.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(name, rendered)| (*name, rendered.as_str())));
    }

    Ok(url)
}

/// Issues GET requests and decodes JSON bodies. Implementations fail on
/// non-success statuses and leave payload validation to the caller.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, QueryValue)],
    ) -> Result<Value, TransportError>;
}

/// Production transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http })
    }

    async fn request(&self, url: Url) -> Result<Value, TransportError> {
        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, QueryValue)],
    ) -> Result<Value, TransportError> {
        let url = build_url(url, params)?;

        match self.request(url.clone()).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                tracing::error!(url = %url, error = %err, "GET request failed");
                Err(err)
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_rendered_params() {
        let url = build_url(
            "https://api.example.com/data",
            &[
                ("a", QueryValue::from("x")),
                ("n", QueryValue::from(42)),
                ("lat", QueryValue::from(52.52)),
                ("flag", QueryValue::from(true)),
            ],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.example.com/data?a=x&n=42&lat=52.52&flag=true"
        );
    }

    #[test]
    fn build_url_drops_null_params() {
        let url = build_url(
            "https://api.example.com/data",
            &[
                ("a", QueryValue::from("x")),
                ("missing", QueryValue::Null),
                ("absent", QueryValue::from(None::<&str>)),
            ],
        )
        .unwrap();

        assert_eq!(url.as_str(), "https://api.example.com/data?a=x");
    }

    #[test]
    fn build_url_without_params_leaves_the_url_untouched() {
        let url = build_url("https://api.example.com/data", &[]).unwrap();

        assert_eq!(url.as_str(), "https://api.example.com/data");
    }

    #[test]
    fn build_url_rejects_an_invalid_base() {
        let err = build_url("not a url", &[]).unwrap_err();

        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn option_values_render_as_null_or_inner() {
        assert_eq!(QueryValue::from(Some(5)), QueryValue::Int(5));
        assert_eq!(QueryValue::from(None::<i32>), QueryValue::Null);
        assert_eq!(QueryValue::Null.render(), None);
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);

        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}

use reqwest::{header, Client, Method, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

pub mod resource;

pub use resource::{ResourceDescriptor, ResourceKind};

pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

const USER_AGENT: &str = "DigitalOcean-OrderManagement/1.0";
const DEFAULT_RETRY_AFTER: &str = "60";

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited { retry_after: String },
    #[error("{status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid upstream base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Rate-limit headers echoed from the upstream response, untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<String>,
    pub remaining: Option<String>,
    pub reset: Option<String>,
}

/// A successful upstream exchange. `body` is `Null` for 204 responses and
/// an empty object when the upstream sent a 2xx with an unparseable body.
#[derive(Debug, Clone)]
pub struct UpstreamOk {
    pub status: u16,
    pub body: Value,
    pub rate_limit: RateLimit,
}

impl UpstreamOk {
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT.as_u16()
    }
}

/// Upstream REST client. Constructed once with its base URL and token and
/// passed by reference; every call is stateless and independent.
#[derive(Clone)]
pub struct DoClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl DoClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ForwardError> {
        let base_url = Url::parse(base_url).map_err(|source| ForwardError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<UpstreamOk, ForwardError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<UpstreamOk, ForwardError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<UpstreamOk, ForwardError> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<UpstreamOk, ForwardError> {
        self.request(Method::DELETE, path, &[], None).await
    }

    /// Issues one upstream call. The JSON body is only attached for
    /// POST/PUT/PATCH; every call carries the bearer token.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<UpstreamOk, ForwardError> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        debug!(%method, %url, "forwarding upstream request");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, USER_AGENT);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            if matches!(method.as_str(), "POST" | "PUT" | "PATCH") {
                builder = builder.json(body);
            }
        }

        let response = builder.send().await?;
        shape_response(response).await
    }
}

async fn shape_response(response: Response) -> Result<UpstreamOk, ForwardError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = header_value(&response, "retry-after")
            .unwrap_or_else(|| DEFAULT_RETRY_AFTER.to_string());
        warn!(%retry_after, "upstream rate limit exceeded");
        return Err(ForwardError::RateLimited { retry_after });
    }

    let rate_limit = RateLimit {
        limit: header_value(&response, "ratelimit-limit"),
        remaining: header_value(&response, "ratelimit-remaining"),
        reset: header_value(&response, "ratelimit-reset"),
    };

    if status == StatusCode::NO_CONTENT {
        return Ok(UpstreamOk {
            status: status.as_u16(),
            body: Value::Null,
            rate_limit,
        });
    }

    let status_text = status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string();
    let body: Value = response
        .json()
        .await
        .unwrap_or_else(|_| Value::Object(Default::default()));

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("error_message").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or(status_text);
        error!(status = status.as_u16(), %message, "upstream request rejected");
        return Err(ForwardError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    Ok(UpstreamOk {
        status: status.as_u16(),
        body,
        rate_limit,
    })
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let result = DoClient::new("not a url", "token");
        assert!(matches!(result, Err(ForwardError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn accepts_the_default_base_url() {
        assert!(DoClient::new(DEFAULT_BASE_URL, "token").is_ok());
    }
}

use crate::core::decode::decode_payload;
use crate::domain::model::DecodedText;
use crate::utils::error::{ConvertError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Downloads a subscription and decodes its base64 body into text.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    headers: HeaderMap,
}

impl ContentFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_headers(timeout, None, &HashMap::new())
    }

    pub fn with_headers(
        timeout: Duration,
        user_agent: Option<&str>,
        extra: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in extra {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ConvertError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ConvertError::InvalidConfigValueError {
                    field: format!("headers.{}", key),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(name, value);
        }
        if let Some(agent) = user_agent {
            let value = HeaderValue::from_str(agent).map_err(|e| {
                ConvertError::InvalidConfigValueError {
                    field: "user_agent".to_string(),
                    value: agent.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(USER_AGENT, value);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, headers })
    }

    pub async fn fetch(&self, url: &str) -> Result<DecodedText> {
        tracing::debug!("Requesting subscription from: {}", url);
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Subscription response status: {}", status);
        if !status.is_success() {
            return Err(ConvertError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes", body.len());

        let decoded = decode_payload(&body)?;
        tracing::info!(
            "Decoded subscription as {} ({} chars)",
            decoded.encoding,
            decoded.text.chars().count()
        );
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TextEncoding;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use httpmock::prelude::*;

    fn fetcher() -> ContentFetcher {
        ContentFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_base64_body() {
        let server = MockServer::start();
        let payload = "trojan://pw@a.example:443?sni=a#A\ntrojan://pw@b.example:443?sni=b#B";
        let mock = server.mock(|when, then| {
            when.method(GET).path("/sub");
            then.status(200).body(STANDARD.encode(payload));
        });

        let decoded = fetcher().fetch(&server.url("/sub")).await.unwrap();

        mock.assert();
        assert_eq!(decoded.text, payload);
        assert_eq!(decoded.encoding, TextEncoding::Utf8);
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let err = fetcher().fetch(&server.url("/missing")).await.unwrap_err();

        mock.assert();
        assert!(matches!(err, ConvertError::HttpStatus { status: 404 }));
        assert_eq!(err.to_string(), "请求失败，状态码: 404");
    }

    #[tokio::test]
    async fn test_fetch_reports_invalid_encoding() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/plain");
            then.status(200).body("abcde");
        });

        let err = fetcher().fetch(&server.url("/plain")).await.unwrap_err();
        assert!(matches!(err, ConvertError::InvalidEncoding { .. }));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/sub")
                .header("user-agent", "clash-verge/1.0")
                .header("x-token", "secret");
            then.status(200).body(STANDARD.encode("plain"));
        });

        let mut extra = HashMap::new();
        extra.insert("X-Token".to_string(), "secret".to_string());
        let fetcher =
            ContentFetcher::with_headers(Duration::from_secs(5), Some("clash-verge/1.0"), &extra)
                .unwrap();

        let decoded = fetcher.fetch(&server.url("/sub")).await.unwrap();
        mock.assert();
        assert_eq!(decoded.text, "plain");
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let mut extra = HashMap::new();
        extra.insert("bad header".to_string(), "v".to_string());
        let err = ContentFetcher::with_headers(Duration::from_secs(1), None, &extra).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfigValueError { .. }));
    }
}

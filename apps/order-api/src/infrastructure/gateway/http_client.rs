//! HTTP client for gateway-routed services.
//!
//! Issues exactly one request per call. Retrying is left to the
//! resilience policy wrapped around the port.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::config::{CALLER_ID_HEADER, GatewayConfig};
use super::error::GatewayError;

/// HTTP client that signs every request for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayHttpClient {
    client: Client,
    base_url: String,
    caller_id: HeaderValue,
    gateway_header_name: HeaderName,
    gateway_header_value: HeaderValue,
}

impl GatewayHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(GatewayError::InvalidConfig(
                "gateway base URL must not be empty".to_string(),
            ));
        }
        let parsed = Url::parse(base_url)
            .map_err(|e| GatewayError::InvalidConfig(format!("invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidConfig(format!(
                "base URL '{base_url}' must use http or https"
            )));
        }

        let gateway_header_name = HeaderName::from_bytes(config.gateway_header_name.as_bytes())
            .map_err(|e| GatewayError::InvalidConfig(format!("gateway header name: {e}")))?;
        let gateway_header_value = HeaderValue::from_str(&config.gateway_header_value)
            .map_err(|e| GatewayError::InvalidConfig(format!("gateway header value: {e}")))?;
        let caller_id = HeaderValue::from_str(&config.caller_id)
            .map_err(|e| GatewayError::InvalidConfig(format!("caller id: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            caller_id,
            gateway_header_name,
            gateway_header_value,
        })
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` relative to the base URL and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .header(self.gateway_header_name.clone(), self.gateway_header_value.clone())
            .header(CALLER_ID_HEADER, self.caller_id.clone())
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| GatewayError::Network(e.to_string()))?;
            return serde_json::from_str(&text).map_err(|e| GatewayError::JsonParse(e.to_string()));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                resource: path.trim_start_matches('/').to_string(),
            });
        }

        let message = response.text().await.unwrap_or_default();
        tracing::debug!(
            status = status.as_u16(),
            url = %url,
            "Gateway returned error status"
        );
        Err(GatewayError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

fn classify_send_error(error: reqwest::Error) -> GatewayError {
    if error.is_builder() {
        GatewayError::Build(error.to_string())
    } else if error.is_timeout() {
        GatewayError::Timeout(error.to_string())
    } else {
        GatewayError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        id: i64,
    }

    fn client_for(server: &MockServer) -> GatewayHttpClient {
        GatewayHttpClient::new(&GatewayConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = GatewayHttpClient::new(&GatewayConfig::new("  ")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = GatewayHttpClient::new(&GatewayConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = GatewayHttpClient::new(&GatewayConfig::new("ftp://gateway")).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_invalid_header_name() {
        let config = GatewayConfig::new("http://gateway").with_gateway_header("bad header", "x");
        let err = GatewayHttpClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("gateway header name"));
    }

    #[test]
    fn trims_trailing_slash() {
        let client = GatewayHttpClient::new(&GatewayConfig::new("http://gateway:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://gateway:8080");
    }

    #[tokio::test]
    async fn sends_gateway_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/3"))
            .and(header("Api-Gateway", "SignedByApiGateway"))
            .and(header("ClientId", "order-api"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":3}"#))
            .expect(1)
            .mount(&server)
            .await;

        let probe: Probe = client_for(&server)
            .get_json("/api/products/3")
            .await
            .unwrap();
        assert_eq!(probe, Probe { id: 3 });
    }

    #[tokio::test]
    async fn not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Probe>("api/products/3")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::NotFound {
                resource: "api/products/3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Probe>("api/products/3")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Http {
                status: 503,
                message: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_json::<Probe>("api/products/3")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::JsonParse(_)));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = GatewayConfig::new(server.uri()).with_timeout(Duration::from_millis(100));
        let err = GatewayHttpClient::new(&config)
            .unwrap()
            .get_json::<Probe>("api/products/3")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = GatewayHttpClient::new(&GatewayConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.get_json::<Probe>("api/products/3").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Network(_) | GatewayError::Timeout(_)
        ));
    }
}

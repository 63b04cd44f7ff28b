//! Public IP detection.

use crate::error::{CfddnsError, Result};

const CHECKIP_URL: &str = "https://checkip.amazonaws.com";

/// Detects the machine's public IP via a plaintext echo endpoint.
pub struct IpDetector {
    client: reqwest::Client,
    url: String,
}

impl IpDetector {
    /// Create a detector against the default endpoint.
    pub fn new() -> Self {
        Self::with_url(CHECKIP_URL.to_string())
    }

    /// Create a detector against a custom endpoint (for testing).
    pub fn with_url(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Fetch the current public IP.
    ///
    /// Returns the response body with surrounding whitespace stripped.
    /// The body is not validated as an IP address; the record update
    /// submits it as-is.
    pub async fn detect(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(CfddnsError::IpDetection(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let ip = response.text().await?.trim().to_string();
        tracing::debug!("Detected public IP {} from {}", ip, self.url);
        Ok(ip)
    }
}

impl Default for IpDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_endpoint() {
        let detector = IpDetector::new();
        assert_eq!(detector.url, CHECKIP_URL);
    }

    #[tokio::test]
    async fn test_detect_trims_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.5\n"))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::with_url(mock_server.uri());
        assert_eq!(detector.detect().await.unwrap(), "203.0.113.5");
    }

    #[tokio::test]
    async fn test_detect_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::with_url(mock_server.uri());
        let result = detector.detect().await;

        assert!(matches!(result, Err(CfddnsError::IpDetection(_))));
    }
}

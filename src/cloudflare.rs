//! Cloudflare API v4 client.

use crate::error::{ApiError, CfddnsError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Cloudflare API client.
///
/// Owns one HTTP client carrying the fixed header set (JSON content
/// type, bearer auth); the connection is reused across every call in a
/// run. Zone and record ids are opaque and re-resolved on each update,
/// never cached.
pub struct CloudflareClient {
    client: reqwest::Client,
    base_url: String,
}

/// Response envelope shared by all API endpoints.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DnsRecord {
    id: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    content: &'a str,
    name: &'a str,
    proxied: bool,
    #[serde(rename = "type")]
    record_type: &'a str,
    ttl: u32,
}

/// Record state reported back by a successful update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedRecord {
    /// Record name, e.g. `www.example.com`.
    pub name: String,
    /// Record content, the IP it now points at.
    pub content: String,
}

impl fmt::Display for UpdatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.content)
    }
}

impl CloudflareClient {
    /// Create a client authenticated with the given API token.
    pub fn new(api_token: &str) -> Result<Self> {
        Self::with_base_url(api_token, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(api_token: &str, base_url: String) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .map_err(|_| {
                CfddnsError::Token("token is not a valid header value".to_string())
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.get(&url).send().await?.json().await?)
    }

    async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.put(&url).json(body).send().await?.json().await?)
    }

    /// Look up the opaque id of an active zone by name.
    pub async fn resolve_zone_id(&self, zone: &str) -> Result<String> {
        let path = format!("/client/v4/zones?name={}&status=active", zone);
        let response: ApiResponse<Vec<Zone>> = self.get(&path).await?;

        if !response.success {
            return Err(CfddnsError::Api(first_error_message(&response.errors)));
        }

        let id = response
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|z| z.id)
            .ok_or_else(|| CfddnsError::ZoneNotFound(zone.to_string()))?;

        tracing::debug!("Resolved zone {} to {}", zone, id);
        Ok(id)
    }

    /// Look up the opaque id of the A record named `record` in a zone.
    pub async fn resolve_record_id(&self, zone_id: &str, record: &str) -> Result<String> {
        let path = format!(
            "/client/v4/zones/{}/dns_records?type=A&name={}",
            zone_id, record
        );
        let response: ApiResponse<Vec<DnsRecord>> = self.get(&path).await?;

        if !response.success {
            return Err(CfddnsError::Api(first_error_message(&response.errors)));
        }

        let entry = response
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| CfddnsError::RecordNotFound(record.to_string()))?;

        tracing::debug!(
            "Resolved record {} to {} (currently {})",
            record,
            entry.id,
            entry.content
        );
        Ok(entry.id)
    }

    /// Point an A record at `ip`.
    ///
    /// The payload always submits `proxied=false`, `type="A"` and
    /// `ttl=1` (Cloudflare's "automatic" TTL), regardless of the
    /// record's prior state.
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &str,
        ip: &str,
    ) -> Result<UpdatedRecord> {
        let payload = UpdateRequest {
            content: ip,
            name: record,
            proxied: false,
            record_type: "A",
            ttl: 1,
        };

        let path = format!("/client/v4/zones/{}/dns_records/{}", zone_id, record_id);
        let response: ApiResponse<UpdatedRecord> = self.put(&path, &payload).await?;

        if !response.success {
            return Err(CfddnsError::UpdateRejected {
                record: record.to_string(),
                errors: response.errors,
            });
        }

        response.result.ok_or_else(|| {
            CfddnsError::UnexpectedResponse(
                "update succeeded but response carried no record".to_string(),
            )
        })
    }

    /// Resolve the zone and record ids for `record`, then point it at
    /// `ip`. Both ids are resolved fresh on every call.
    pub async fn update_sub_domain(
        &self,
        zone: &str,
        record: &str,
        ip: &str,
    ) -> Result<UpdatedRecord> {
        let zone_id = self.resolve_zone_id(zone).await?;
        let record_id = self.resolve_record_id(&zone_id, record).await?;
        self.update_record(&zone_id, &record_id, record, ip).await
    }
}

fn first_error_message(errors: &[ApiError]) -> String {
    errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Unknown error".to_string())
}

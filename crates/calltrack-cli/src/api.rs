//! Calltrack API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for Calltrack
pub struct CalltrackClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Types
// ============================================

/// `{ data, success, error }` wrapper used by every API route
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    success: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    pub id: String,
    pub prospect_name: String,
    pub company: String,
    pub outcome: String,
    pub notes: String,
    pub date: String,
    pub duration: u64,
    pub status: Option<String>,
    pub talk_time_ratio: Option<f64>,
    pub questions_asked: Option<u32>,
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_calls: usize,
    pub avg_duration_minutes: f64,
    pub qualified_rate: f64,
    pub avg_sentiment: f64,
    pub outcomes: Vec<OutcomeCount>,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeCount {
    pub outcome: String,
    pub count: usize,
}

/// Body for both create and update; omitted fields are not sent
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prospect_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talk_time_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_asked: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CallFields {
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().is_some_and(|o| o.is_empty()))
            .unwrap_or(false)
    }
}

/// `?search=..&status=..`, or an empty string when both are absent
pub fn filter_query(search: Option<&str>, status: Option<&str>) -> String {
    let params: Vec<String> = [("search", search), ("status", status)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, urlencoding::encode(v))))
        .collect();

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

impl CalltrackClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Send a request and unwrap the response envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self
            .authorize(request)
            .send()
            .await
            .context("Failed to connect to Calltrack API")?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => bail!("API error ({}): {}", status, body),
            Err(e) => return Err(e).context("Failed to parse response"),
        };

        if !envelope.success {
            let message = envelope.error.unwrap_or_else(|| "unknown error".to_string());
            bail!("API error ({}): {}", status, message);
        }

        envelope.data.context("Response contained no data")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Check that the configured key is accepted by `/api` routes
    pub async fn verify_key(&self) -> Result<()> {
        self.list_calls(None, Some("all")).await.map(|_| ())
    }

    pub async fn list_calls(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<CallResponse>> {
        let url = self.url(&format!("/api/calls{}", filter_query(search, status)));
        self.send(self.client.get(url)).await
    }

    pub async fn get_call(&self, id: &str) -> Result<CallResponse> {
        let url = self.url(&format!("/api/calls/{}", urlencoding::encode(id)));
        self.send(self.client.get(url)).await
    }

    pub async fn create_call(&self, fields: &CallFields) -> Result<CallResponse> {
        let url = self.url("/api/calls");
        self.send(self.client.post(url).json(fields)).await
    }

    pub async fn update_call(&self, id: &str, fields: &CallFields) -> Result<CallResponse> {
        let url = self.url(&format!("/api/calls/{}", urlencoding::encode(id)));
        self.send(self.client.put(url).json(fields)).await
    }

    pub async fn delete_call(&self, id: &str) -> Result<CallResponse> {
        let url = self.url(&format!("/api/calls/{}", urlencoding::encode(id)));
        self.send(self.client.delete(url)).await
    }

    pub async fn dashboard(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<DashboardResponse> {
        let url = self.url(&format!("/api/dashboard{}", filter_query(search, status)));
        self.send(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_encodes_values() {
        assert_eq!(filter_query(None, None), "");
        assert_eq!(filter_query(Some("bob smith"), None), "?search=bob%20smith");
        assert_eq!(
            filter_query(Some("a&b"), Some("follow-up")),
            "?search=a%26b&status=follow-up"
        );
    }

    #[test]
    fn test_empty_fields_detected() {
        assert!(CallFields::default().is_empty());
        let fields = CallFields {
            notes: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_error_envelope_parses_with_null_data() {
        let envelope: Envelope<CallResponse> =
            serde_json::from_str(r#"{"data":null,"success":false,"error":"Call not found"}"#)
                .unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("Call not found"));
    }
}

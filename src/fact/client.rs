use crate::foundation::error::{FactReelError, FactReelResult};

/// Public endpoint returning `{"text": "...", ...}` with an English fact.
pub const DEFAULT_FACT_ENDPOINT: &str = "https://uselessfacts.jsph.pl/random.json?language=en";

/// Response body of the fact API. Only `text` is required.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct FactResponse {
    /// The fact itself.
    pub text: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

impl FactResponse {
    /// Decode a raw JSON body.
    pub fn from_json(bytes: &[u8]) -> FactReelResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| FactReelError::serde(format!("fact response json parse failed: {e}")))
    }
}

/// Blocking client for a single fixed fact endpoint.
#[derive(Clone, Debug)]
pub struct FactClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl Default for FactClient {
    fn default() -> Self {
        Self::new(DEFAULT_FACT_ENDPOINT)
    }
}

impl FactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform one GET and return the fact text. No retries.
    pub fn fetch(&self) -> FactReelResult<String> {
        tracing::debug!(endpoint = %self.endpoint, "requesting fact");
        let resp = self
            .http
            .get(&self.endpoint)
            .send()?
            .error_for_status()?;
        let body = resp.bytes()?;
        Ok(FactResponse::from_json(&body)?.text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fact/client.rs"]
mod tests;

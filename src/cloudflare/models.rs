use crate::common::{Diffable, Record, RECORD_KIND_MX};

/// A single error object from the API `errors` array, kept verbatim
/// for diagnostics.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

/// The v4 response envelope. `result_info` is only present on
/// paginated listings.
#[derive(serde::Deserialize)]
pub(super) struct ApiResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    pub result_info: Option<ResultInfo>,
}

#[derive(serde::Deserialize)]
pub(super) struct ResultInfo {
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A record as the provider returns it. `kind` stays a plain string:
/// the remote zone may hold kinds we do not manage, and those must
/// flow through the diff (and get deleted) untyped.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: Option<bool>,
}

impl Diffable for DnsRecord {
    fn matches(&self, authority: &Record) -> bool {
        if self.kind == RECORD_KIND_MX && authority.kind() == RECORD_KIND_MX {
            self.name == authority.name && self.content == authority.content()
        } else {
            self.kind == authority.kind() && self.name == authority.name
        }
    }

    fn drifted(&self, authority: &Record) -> bool {
        self.content != authority.content() || self.ttl != authority.ttl
    }
}

/// The request body for record writes.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl RecordPayload {
    /// Payload for a brand new record: local fields only, no proxied
    /// flag for the provider to trip over.
    pub fn create(authority: &Record) -> Self {
        Self {
            kind: authority.kind().to_string(),
            name: authority.name.clone(),
            priority: authority.priority(),
            content: authority.content().to_string(),
            ttl: authority.ttl,
            proxied: None,
        }
    }

    /// Payload for an in-place update. Kind, name and the proxied
    /// toggle are whatever the provider already holds; content, ttl
    /// and priority come from the zone file.
    pub fn update(current: &DnsRecord, authority: &Record) -> Self {
        Self {
            kind: current.kind.clone(),
            name: current.name.clone(),
            priority: authority.priority(),
            content: authority.content().to_string(),
            ttl: authority.ttl,
            proxied: current.proxied,
        }
    }
}

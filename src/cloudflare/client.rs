use reqwest::Method;
use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::common::{ApiSnafu, NetworkSnafu, Result};

use super::models::{ApiError, ApiResponse, DnsRecord, RecordPayload, Zone};

const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// The provider ignores larger values for some listings, so every
/// GET pages at this size regardless of what the caller wants.
const PER_PAGE: u32 = 100;

/// Global API key credentials, sent as header pairs on every call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub key: String,
}

pub struct Cloudflare {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Cloudflare {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{API_BASE_URL}{path}"))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", &self.credentials.key)
    }

    /// GET a listing, following `result_info` until the last page.
    /// A response without paging metadata is a single-page response.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut page = 1u32;
        let mut items: Vec<T> = Vec::new();
        loop {
            tracing::debug!(method = "GET", path, page, "Sending request");
            let response: ApiResponse<Vec<T>> = self
                .request(Method::GET, path)
                .query(query)
                .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())])
                .send()
                .await
                .context(NetworkSnafu {
                    method: "GET",
                    path,
                })?
                .json()
                .await
                .context(NetworkSnafu {
                    method: "GET",
                    path,
                })?;

            if !response.errors.is_empty() {
                return ApiSnafu {
                    method: "GET",
                    path,
                    query: owned_query(query),
                    body: None::<String>,
                    errors: response.errors,
                }
                .fail();
            }

            items.extend(response.result.unwrap_or_default());

            match response.result_info {
                Some(info) if info.page < info.total_pages => page = info.page + 1,
                _ => return Ok(items),
            }
        }
    }

    async fn write<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        tracing::debug!(method = method.as_str(), path, "Sending request");
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response: ApiResponse<T> = request
            .send()
            .await
            .context(NetworkSnafu {
                method: method.as_str(),
                path,
            })?
            .json()
            .await
            .context(NetworkSnafu {
                method: method.as_str(),
                path,
            })?;

        if !response.errors.is_empty() {
            return ApiSnafu {
                method: method.as_str(),
                path,
                query: Vec::<(String, String)>::new(),
                body: body.map(|b| serde_json::to_string(b).unwrap_or_default()),
                errors: response.errors,
            }
            .fail();
        }

        response.result.with_context(|| ApiSnafu {
            method: method.as_str(),
            path,
            query: Vec::<(String, String)>::new(),
            body: None::<String>,
            errors: vec![ApiError {
                code: 0,
                message: "Response missing result".to_string(),
            }],
        })
    }

    /// Look a zone up by its exact name. The listing is filtered
    /// server-side, so the first entry is the zone or there is none.
    pub async fn find_zone(&self, name: &str) -> Result<Option<Zone>> {
        tracing::debug!(zone = name, "Looking up zone");
        let zones: Vec<Zone> = self.get_paginated("/zones", &[("name", name)]).await?;
        Ok(zones.into_iter().next())
    }

    pub async fn create_zone(&self, name: &str) -> Result<Zone> {
        tracing::info!(zone = name, "Creating zone");
        self.write(
            Method::POST,
            "/zones",
            Some(&serde_json::json!({ "name": name, "jump_start": false })),
        )
        .await
    }

    pub async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        tracing::debug!(zone_id, "Fetching zone records");
        self.get_paginated(&format!("/zones/{zone_id}/dns_records"), &[])
            .await
    }

    pub async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        self.write(
            Method::POST,
            &format!("/zones/{zone_id}/dns_records"),
            Some(payload),
        )
        .await
    }

    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        self.write(
            Method::PUT,
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            Some(payload),
        )
        .await
    }

    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.write::<serde_json::Value, ()>(
            Method::DELETE,
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            None,
        )
        .await
        .map(|_| ())
    }
}

fn owned_query(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

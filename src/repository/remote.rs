//! Remote backend over the hosted database's REST interface.
//!
//! Speaks PostgREST conventions against `{url}/rest/v1/equipment`: filters as
//! `column=op.value` query parameters, writes returning the affected rows via
//! the `Prefer: return=representation` header. The table carries a uniqueness
//! constraint on `serial_number` and a trigger maintaining `updated_at`.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Equipment, EquipmentPatch, NewEquipment};

use super::backend::EquipmentBackend;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct RemoteRepository {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: String,
}

impl RemoteRepository {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/equipment", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn checked(builder: RequestBuilder) -> AppResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!("HTTP {}: {}", status, body)));
        }
        Ok(response)
    }

    /// One-row probe used by the settings connection test.
    pub async fn probe(&self) -> AppResult<()> {
        Self::checked(
            self.request(Method::GET)
                .query(&[("select", "id"), ("limit", "1")]),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl EquipmentBackend for RemoteRepository {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        let response = Self::checked(
            self.request(Method::GET)
                .query(&[("select", "*"), ("order", "created_at.desc")]),
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let response = Self::checked(
            self.request(Method::POST)
                .header("Prefer", "return=representation")
                .json(&[data]),
        )
        .await?;
        let mut rows: Vec<Equipment> = response.json().await?;
        rows.pop()
            .ok_or_else(|| AppError::Backend("insert returned no row".to_string()))
    }

    async fn update(&self, id: &str, patch: &EquipmentPatch) -> AppResult<Equipment> {
        let response = Self::checked(
            self.request(Method::PATCH)
                .header("Prefer", "return=representation")
                .query(&[("id", format!("eq.{}", id))])
                .json(patch),
        )
        .await?;
        let mut rows: Vec<Equipment> = response.json().await?;
        rows.pop()
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let builder = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))]);
        // PostgREST answers 204 whether or not a row matched.
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }

    async fn exists_by_serial<'a>(
        &self,
        serial: &str,
        exclude_id: Option<&'a str>,
    ) -> AppResult<bool> {
        let mut query = vec![
            ("select".to_string(), "id".to_string()),
            ("serial_number".to_string(), format!("eq.{}", serial)),
        ];
        if let Some(exclude) = exclude_id {
            query.push(("id".to_string(), format!("neq.{}", exclude)));
        }
        let response = Self::checked(self.request(Method::GET).query(&query)).await?;
        let rows: Vec<IdRow> = response.json().await?;
        Ok(!rows.is_empty())
    }
}

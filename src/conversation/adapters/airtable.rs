//! Airtable-backed player record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AirtableConfig;
use crate::conversation::ports::record_store::{
    NewPlayerRecord, RecordId, RecordStore, RecordStoreError, RecordStoreResult,
};

const AIRTABLE_API: &str = "https://api.airtable.com/v0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`RecordStore`] writing to one Airtable table.
///
/// Records use the fields `first_name`, `last_name`, `full_name` and
/// `player_email`.
pub struct AirtableRecordStore {
    client: Client,
    api_key: String,
    table_url: String,
}

impl AirtableRecordStore {
    /// Creates a store for the configured base and table.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Persistence`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &AirtableConfig) -> RecordStoreResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RecordStoreError::persistence)?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            table_url: format!("{AIRTABLE_API}/{}/{}", config.base_id, config.table_id),
        })
    }

    async fn send<B: Serialize + Sync>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> RecordStoreResult<(StatusCode, String)> {
        let response = request
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(RecordStoreError::persistence)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(RecordStoreError::persistence)?;
        Ok((status, text))
    }
}

#[derive(Serialize)]
struct FieldsBody<T> {
    fields: T,
}

#[derive(Serialize)]
struct EmailFields<'a> {
    player_email: &'a str,
}

#[derive(Deserialize)]
struct CreatedRecord {
    id: String,
}

#[async_trait]
impl RecordStore for AirtableRecordStore {
    async fn create_player(&self, record: &NewPlayerRecord) -> RecordStoreResult<RecordId> {
        let (status, text) = self
            .send(
                self.client.post(&self.table_url),
                &FieldsBody { fields: record },
            )
            .await?;
        if !status.is_success() {
            return Err(RecordStoreError::Rejected(format!("HTTP {status}: {text}")));
        }
        let created: CreatedRecord =
            serde_json::from_str(&text).map_err(RecordStoreError::persistence)?;
        info!(record_id = %created.id, "airtable record created");
        Ok(RecordId::new(created.id))
    }

    async fn update_email(&self, record_id: &RecordId, email: &str) -> RecordStoreResult<()> {
        let url = format!("{}/{record_id}", self.table_url);
        let (status, text) = self
            .send(
                self.client.patch(url),
                &FieldsBody {
                    fields: EmailFields {
                        player_email: email,
                    },
                },
            )
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Err(RecordStoreError::NotFound(record_id.clone()));
        }
        if !status.is_success() {
            return Err(RecordStoreError::Rejected(format!("HTTP {status}: {text}")));
        }
        info!(record_id = %record_id, "airtable record updated");
        Ok(())
    }
}

//! Remote sheet backend
//!
//! Talks to a values API over HTTP: one worksheet of one named document,
//! first row the schema header, one row per record after that. Reads are a
//! single GET of the whole grid; writes are a single PUT that replaces the
//! grid server-side in one request, with no clear-then-append window where an
//! interruption could leave the worksheet empty.

use kassabok_core::{Dataset, importer, model};
use serde_json::{Value, json};

use crate::config::SheetConfig;
use crate::storage::{StorageBackend, StorageError};

const HTTP_TIMEOUT_SECS: u64 = 10;

pub struct RemoteSheetBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    document: String,
    worksheet: String,
    api_token: String,
}

impl RemoteSheetBackend {
    pub fn from_config(config: &SheetConfig) -> color_eyre::Result<RemoteSheetBackend> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(RemoteSheetBackend {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            document: config.document.clone(),
            worksheet: config.worksheet.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn values_url(&self) -> String {
        format!(
            "{}/documents/{}/worksheets/{}/values",
            self.base_url, self.document, self.worksheet
        )
    }

    fn authorized(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        if self.api_token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_token)
        }
    }
}

/// Flatten one wire cell to its storage string. The API may hand back
/// numbers and booleans as JSON scalars rather than strings.
fn cell_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

impl StorageBackend for RemoteSheetBackend {
    fn identity(&self) -> String {
        format!("sheet:{}/{}", self.document, self.worksheet)
    }

    fn read_all(&self) -> Result<Dataset, StorageError> {
        let unavailable = |msg: String| StorageError::Unavailable(msg);

        let response = self
            .authorized(self.client.get(self.values_url()))
            .send()
            .map_err(|e| unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?;

        let payload: Value = response
            .json()
            .map_err(|e| unavailable(format!("bad response body: {e}")))?;

        let Some(values) = payload.get("values").and_then(|v| v.as_array()) else {
            // A worksheet that was never written to has no values at all.
            return Ok(Dataset::new());
        };
        let mut grid = values.iter().map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(cell_string).collect::<Vec<String>>())
                .unwrap_or_default()
        });

        let Some(header) = grid.next() else {
            return Ok(Dataset::new());
        };
        let rows = importer::rows_from_cells(&header, grid.collect());
        Ok(Dataset::from_rows(rows))
    }

    fn write_all(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let failed = |msg: String| StorageError::WriteFailed(msg);

        let mut values: Vec<Vec<String>> = vec![
            model::header_row().iter().map(|s| s.to_string()).collect(),
        ];
        values.extend(dataset.rows().iter().map(|r| r.cells()));

        self.authorized(self.client.put(self.values_url()))
            .json(&json!({ "values": values }))
            .send()
            .map_err(|e| failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| failed(e.to_string()))?;

        tracing::debug!(rows = dataset.len(), sheet = %self.identity(), "dataset written");
        Ok(())
    }
}

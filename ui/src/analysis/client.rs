//! HTTP client for the external analysis service.

use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::core::config::ApiConfig;

use super::{AnalysisError, AnalysisResult, FileSlot, UploadedFile};

const USE_BATCH_FIELD: &str = "use_batch";

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl AnalysisClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// One multipart POST carrying both files and the processing-mode flag.
    ///
    /// No retry and no timeout beyond what the transport applies.
    pub async fn analyze(
        &self,
        obligations: &UploadedFile,
        contract: &UploadedFile,
    ) -> Result<AnalysisResult, AnalysisError> {
        let correlation = Uuid::new_v4();
        let url = self.config.analyze_url();
        tracing::info!(
            %correlation,
            %url,
            obligations = %obligations.name,
            contract = %contract.name,
            "submitting analysis"
        );

        let form = self.form(obligations, contract)?;
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(%correlation, error = %err, "analysis request failed");
                AnalysisError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%correlation, status = status.as_u16(), "analysis service rejected request");
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let result = AnalysisResult::ingest(&body).inspect_err(|err| {
            tracing::warn!(%correlation, error = %err, "analysis response rejected");
        })?;

        tracing::info!(
            %correlation,
            findings = result.results.len(),
            batch = result.batch_processing_used.unwrap_or(false),
            "analysis complete"
        );
        Ok(result)
    }

    fn form(&self, obligations: &UploadedFile, contract: &UploadedFile) -> Result<Form, AnalysisError> {
        let mut form = Form::new();
        for (slot, file) in [(FileSlot::Obligations, obligations), (FileSlot::Contract, contract)] {
            form = form.part(slot.field_name(), file_part(file)?);
        }
        Ok(form.text(USE_BATCH_FIELD, batch_flag(self.config.use_batch)))
    }
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

fn file_part(file: &UploadedFile) -> Result<Part, AnalysisError> {
    Part::bytes(file.bytes.to_vec())
        .file_name(file.name.clone())
        .mime_str(file.mime())
        .map_err(|err| AnalysisError::Transport(err.to_string()))
}

fn batch_flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

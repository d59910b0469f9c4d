use std::time::Duration;

use intake_logging::intake_debug;
use reqwest::multipart::{Form, Part};

use crate::{FailureKind, TransmissionError, UploadReceipt, UploadRequest};

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl UploadSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, TransmissionError>;
}

/// Sends every file of a request as one `multipart/form-data` POST.
#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransmissionError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| TransmissionError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, TransmissionError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| TransmissionError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let form = build_form(request).await?;
        let client = self.build_client()?;

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            intake_debug!(
                "attempt {} rejected with {}: {}",
                request.attempt,
                status,
                body
            );
            return Err(TransmissionError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

/// One part per file, all under the request's shared field name.
async fn build_form(request: &UploadRequest) -> Result<Form, TransmissionError> {
    let mut form = Form::new();
    for file in &request.files {
        let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
            TransmissionError::new(
                FailureKind::PayloadUnreadable {
                    name: file.name.clone(),
                },
                err.to_string(),
            )
        })?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|err| {
                TransmissionError::new(
                    FailureKind::PayloadUnreadable {
                        name: file.name.clone(),
                    },
                    err.to_string(),
                )
            })?;
        form = form.part(request.field_name.clone(), part);
    }
    Ok(form)
}

fn map_reqwest_error(err: reqwest::Error) -> TransmissionError {
    if err.is_timeout() {
        return TransmissionError::new(FailureKind::Timeout, err.to_string());
    }
    TransmissionError::new(FailureKind::Network, err.to_string())
}

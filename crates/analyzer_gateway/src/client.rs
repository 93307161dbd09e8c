use std::time::Duration;

use serde::Deserialize;

use crate::types::{
    FailureKind, FilePayload, GatewayError, SummaryReply, SummaryRequest, UploadFlags,
    UploadReply,
};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Service root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The boundary issuing outbound HTTP calls and normalizing outcomes.
#[async_trait::async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn upload(
        &self,
        files: &[FilePayload],
        flags: &UploadFlags,
    ) -> Result<UploadReply, GatewayError>;

    async fn extract_text(&self, file: &FilePayload) -> Result<String, GatewayError>;

    async fn predict_topics(&self, text: &str) -> Result<Vec<String>, GatewayError>;

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReply, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GatewayError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<serde_json::Value, GatewayError> {
        let client = self.build_client()?;
        let response = client
            .post(self.endpoint(path))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json_body(response).await
    }
}

fn file_part(
    field_hint: &str,
    file: &FilePayload,
) -> Result<reqwest::multipart::Part, GatewayError> {
    reqwest::multipart::Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.media_type)
        .map_err(|err| {
            GatewayError::new(
                FailureKind::InvalidRequest,
                format!("bad media type for {field_hint}: {err}"),
            )
        })
}

#[async_trait::async_trait]
impl AnalysisGateway for ReqwestGateway {
    async fn upload(
        &self,
        files: &[FilePayload],
        flags: &UploadFlags,
    ) -> Result<UploadReply, GatewayError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            form = form.part("paper_files", file_part("paper_files", file)?);
        }
        for field in flags.form_fields() {
            form = form.text(field, "on");
        }

        let value = self.post_multipart("/upload", form).await?;
        serde_json::from_value(value)
            .map_err(|err| GatewayError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    async fn extract_text(&self, file: &FilePayload) -> Result<String, GatewayError> {
        let form = reqwest::multipart::Form::new().part("file", file_part("file", file)?);
        let value = self.post_multipart("/extract_text", form).await?;

        #[derive(Deserialize)]
        struct Body {
            text: Option<String>,
        }
        let body: Body = serde_json::from_value(value)
            .map_err(|err| GatewayError::new(FailureKind::MalformedResponse, err.to_string()))?;
        body.text.ok_or_else(|| {
            GatewayError::new(
                FailureKind::MalformedResponse,
                "response carried neither text nor error",
            )
        })
    }

    async fn predict_topics(&self, text: &str) -> Result<Vec<String>, GatewayError> {
        let client = self.build_client()?;
        let response = client
            .post(self.endpoint("/predict_topics"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let value = read_json_body(response).await?;

        #[derive(Deserialize)]
        struct Body {
            topics: Option<Vec<String>>,
        }
        let body: Body = serde_json::from_value(value)
            .map_err(|err| GatewayError::new(FailureKind::MalformedResponse, err.to_string()))?;
        body.topics.ok_or_else(|| {
            GatewayError::new(
                FailureKind::MalformedResponse,
                "response carried neither topics nor error",
            )
        })
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReply, GatewayError> {
        let form = match request {
            SummaryRequest::Text(text) => reqwest::multipart::Form::new()
                .text("input_mode", "text")
                .text("noteInput", text.clone()),
            SummaryRequest::File(file) => reqwest::multipart::Form::new()
                .text("input_mode", "file")
                .part("fileUpload", file_part("fileUpload", file)?),
        };

        let value = self.post_multipart("/api/summarize", form).await?;

        #[derive(Deserialize)]
        struct Body {
            summary: Option<String>,
            #[serde(default)]
            key_points: Vec<String>,
        }
        let body: Body = serde_json::from_value(value)
            .map_err(|err| GatewayError::new(FailureKind::MalformedResponse, err.to_string()))?;
        match body.summary {
            Some(summary) => Ok(SummaryReply {
                summary,
                key_points: body.key_points,
            }),
            None => Err(GatewayError::new(
                FailureKind::MalformedResponse,
                "response carried neither summary nor error",
            )),
        }
    }
}

/// Reads and parses a response body, folding the service's `error`
/// field and the HTTP status into the normalized error taxonomy. The
/// service reports failures in the body regardless of status, so a
/// JSON `error` wins over a non-2xx code.
async fn read_json_body(response: reqwest::Response) -> Result<serde_json::Value, GatewayError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => {
            if let Some(error) = value.get("error").and_then(|field| field.as_str()) {
                return Err(GatewayError::new(FailureKind::Backend, error));
            }
            if !status.is_success() {
                return Err(GatewayError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
            Ok(value)
        }
        Err(_) if !status.is_success() => Err(GatewayError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        )),
        Err(err) => Err(GatewayError::new(
            FailureKind::MalformedResponse,
            err.to_string(),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() || err.is_request() {
        return GatewayError::new(FailureKind::InvalidRequest, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}

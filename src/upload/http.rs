// src/upload/http.rs — Multipart upload to the chat server

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use super::{FileRef, Uploader};
use crate::infra::config::ServerConfig;
use crate::infra::errors::{ChatError, Result};

#[derive(Deserialize)]
struct UploadResponse {
    path: String,
}

/// Posts the file as the `file` part of a multipart form and expects
/// `{ "path": "<url>" }` back.
pub struct HttpUploader {
    client: Client,
    url: String,
}

impl HttpUploader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(server: &ServerConfig) -> Result<Self> {
        Self::new(
            server.upload_url.clone(),
            Duration::from_secs(server.upload_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, file: &FileRef) -> Result<String> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ChatError::Upload(format!("bad MIME type '{}': {e}", file.mime_type)))?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChatError::Upload(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Upload(format!("{} returned {status}", self.url)));
        }

        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ChatError::Upload(format!("unreadable response: {e}")))?;

        if body.path.trim().is_empty() {
            return Err(ChatError::Upload("response carried no path".into()));
        }

        tracing::debug!(file = %file.name, url = %body.path, "uploaded");
        Ok(body.path)
    }
}

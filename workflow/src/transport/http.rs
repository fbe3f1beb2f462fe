use log::debug;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::Transport;
use crate::error::TransportError;
use crate::request::{RawResponse, UploadRequest};

/// Native transport backed by `reqwest`.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: UploadRequest) -> Result<RawResponse, TransportError> {
        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name)
            .mime_str(request.content_type)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(request.field_name, part);

        debug!("POST {} ({} bytes)", request.endpoint, request.bytes.len());
        let response = self
            .client
            .post(request.endpoint)
            .header(ACCEPT, request.accept)
            .multipart(form)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

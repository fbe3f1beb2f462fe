use futures::future::{select, Either};
use gloo_file::Blob;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::FormData;
use workflow::{RawResponse, Transport, TransportError, UploadRequest};

/// Browser transport: `fetch` through gloo-net with a `FormData` body.
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: UploadRequest) -> Result<RawResponse, TransportError> {
        let form_data = FormData::new().map_err(js_error)?;
        let blob = Blob::new_with_options(&request.bytes[..], Some(request.content_type));
        form_data
            .append_with_blob_and_filename(
                request.field_name,
                &web_sys::Blob::from(blob),
                &request.file_name,
            )
            .map_err(js_error)?;

        let outgoing = Request::post(request.endpoint.as_str())
            .header("Accept", request.accept)
            .body(form_data)
            .map_err(|e| TransportError::Network(e.to_string()))?;

        // The deadline covers the body as well as the headers.
        let exchange = async move {
            let response = outgoing
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok::<_, TransportError>(RawResponse { status, body })
        };

        let timeout_ms = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        match select(Box::pin(exchange), TimeoutFuture::new(timeout_ms)).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", value))
}

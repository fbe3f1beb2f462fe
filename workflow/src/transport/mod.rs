use crate::error::TransportError;
use crate::request::{RawResponse, UploadRequest};

#[cfg(not(target_arch = "wasm32"))]
mod http;

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpTransport;

/// Sends an [`UploadRequest`] and hands back whatever the server answered.
///
/// Implementations report any HTTP status as a [`RawResponse`]; only failures
/// to get a response at all are errors. They must give up after
/// `request.timeout`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: UploadRequest) -> Result<RawResponse, TransportError>;
}

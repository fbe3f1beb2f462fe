//! Client-side prediction workflow for tomato leaf photos: pick an image,
//! upload it to the inference service, and expose the classification together
//! with the matching causes and treatments.
//!
//! The workflow has no UI dependency. Renderers hold a [`PredictionWorkflow`],
//! subscribe to its [`WorkflowEvent`]s and call [`PredictionWorkflow::select_image`]
//! and [`PredictionWorkflow::submit`].

pub mod config;
pub mod error;
pub mod image;
pub mod presentation;
pub mod request;
pub mod transport;
mod workflow;

pub use config::WorkflowConfig;
pub use error::{ConfigError, PredictionError, TransportError};
pub use image::ImageReference;
pub use presentation::{notice, ResultView};
pub use request::{parse_response, RawResponse, UploadRequest};
pub use shared::{DiseaseInfo, DiseaseLabel, PredictionResult};
pub use transport::Transport;
pub use workflow::{PredictionWorkflow, SubmitOutcome, WorkflowEvent, WorkflowState};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::HttpTransport;

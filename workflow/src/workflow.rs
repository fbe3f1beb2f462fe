use futures::future::{AbortHandle, Abortable};
use log::{debug, info, warn};
use shared::PredictionResult;
use std::cell::{Cell, RefCell};

use crate::config::WorkflowConfig;
use crate::error::{PredictionError, TransportError};
use crate::image::ImageReference;
use crate::request::{parse_response, UploadRequest};
use crate::transport::Transport;

/// Everything a renderer needs to draw the prediction screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub image: Option<ImageReference>,
    pub result: Option<PredictionResult>,
    pub is_submitting: bool,
    pub error: Option<PredictionError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// Something in [`WorkflowState`] changed; re-render.
    StateChanged,
    /// A new result arrived and should be brought to the user's attention.
    PresentResult(PredictionResult),
    /// Submit was requested without an image.
    SelectImageFirst,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success(PredictionResult),
    Failed(PredictionError),
    /// No image was selected; nothing was sent.
    NoImage,
    /// Another submission was already in flight; nothing was sent.
    Busy,
    /// The image changed while the request was in flight and the response was
    /// dropped.
    Superseded,
}

type Subscriber = Box<dyn Fn(&WorkflowEvent)>;

struct InFlight {
    ticket: u64,
    abort: AbortHandle,
}

/// Releases the single-flight slot if a `submit()` future is dropped before
/// its response is handled.
struct Dispatched<'a, T: Transport> {
    workflow: &'a PredictionWorkflow<T>,
    ticket: u64,
}

impl<T: Transport> Drop for Dispatched<'_, T> {
    fn drop(&mut self) {
        let abandoned = {
            let mut in_flight = self.workflow.in_flight.borrow_mut();
            match in_flight.as_ref() {
                Some(current) if current.ticket == self.ticket => in_flight.take(),
                _ => None,
            }
        };
        if abandoned.is_none() {
            return;
        }

        info!("Submission #{} abandoned before completion", self.ticket);
        self.workflow.state.borrow_mut().is_submitting = false;
        self.workflow.emit(&WorkflowEvent::StateChanged);
    }
}

/// Single-flight prediction workflow shared by every renderer.
///
/// Meant for one UI thread: state lives behind `RefCell`s and the type is not
/// `Send`. Subscribers must not call [`PredictionWorkflow::subscribe`] from
/// inside a callback.
pub struct PredictionWorkflow<T> {
    config: WorkflowConfig,
    transport: T,
    state: RefCell<WorkflowState>,
    in_flight: RefCell<Option<InFlight>>,
    next_ticket: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl<T: Transport> PredictionWorkflow<T> {
    pub fn new(config: WorkflowConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            state: RefCell::new(WorkflowState::default()),
            in_flight: RefCell::new(None),
            next_ticket: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    pub fn image(&self) -> Option<ImageReference> {
        self.state.borrow().image.clone()
    }

    pub fn result(&self) -> Option<PredictionResult> {
        self.state.borrow().result.clone()
    }

    pub fn error(&self) -> Option<PredictionError> {
        self.state.borrow().error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting
    }

    pub fn subscribe(&self, subscriber: impl Fn(&WorkflowEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    /// Makes `image` the current selection.
    ///
    /// Any submission still in flight is cancelled and its response will be
    /// discarded. The previous result stays visible unless the configuration
    /// asks for it to be cleared.
    pub fn select_image(&self, image: ImageReference) {
        if let Some(in_flight) = self.in_flight.borrow_mut().take() {
            info!("Image changed, cancelling submission #{}", in_flight.ticket);
            in_flight.abort.abort();
        }

        {
            let mut state = self.state.borrow_mut();
            debug!("Selected {} ({} bytes)", image.file_name(), image.len());
            state.image = Some(image);
            state.is_submitting = false;
            state.error = None;
            if self.config.clear_result_on_select {
                state.result = None;
            }
        }
        self.emit(&WorkflowEvent::StateChanged);
    }

    /// Uploads the current image and records the prediction.
    ///
    /// Calls made while a submission is in flight return
    /// [`SubmitOutcome::Busy`] without touching the network or the state.
    /// Dropping the returned future mid-flight frees the workflow for the
    /// next submission.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, ticket) = {
            let mut state = self.state.borrow_mut();
            if state.is_submitting {
                debug!("Submit ignored, a prediction is already in flight");
                return SubmitOutcome::Busy;
            }
            let request = state
                .image
                .as_ref()
                .map(|image| UploadRequest::for_image(&self.config, image));
            let Some(request) = request else {
                drop(state);
                info!("Submit requested without an image");
                self.emit(&WorkflowEvent::SelectImageFirst);
                return SubmitOutcome::NoImage;
            };

            state.is_submitting = true;
            state.error = None;

            let ticket = self.next_ticket.get() + 1;
            self.next_ticket.set(ticket);
            (request, ticket)
        };

        let (abort, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(InFlight { ticket, abort });
        let _dispatched = Dispatched {
            workflow: self,
            ticket,
        };
        info!(
            "Submission #{} dispatched to {} ({} bytes)",
            ticket,
            request.endpoint,
            request.bytes.len()
        );
        self.emit(&WorkflowEvent::StateChanged);

        let response = match Abortable::new(self.transport.send(request), registration).await {
            Ok(response) => response,
            Err(_aborted) => {
                debug!("Submission #{} discarded", ticket);
                return SubmitOutcome::Superseded;
            }
        };
        self.in_flight.borrow_mut().take();

        let outcome = response
            .map_err(|e| self.transport_failure(e))
            .and_then(|response| parse_response(&response));

        {
            let mut state = self.state.borrow_mut();
            state.is_submitting = false;
            match &outcome {
                Ok(result) => state.result = Some(result.clone()),
                Err(e) => state.error = Some(e.clone()),
            }
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Submission #{} resolved: {} ({})",
                    ticket, result.class, result.confidence
                );
                self.emit(&WorkflowEvent::StateChanged);
                self.emit(&WorkflowEvent::PresentResult(result.clone()));
                SubmitOutcome::Success(result)
            }
            Err(e) => {
                warn!("Submission #{} failed: {}", ticket, e);
                self.emit(&WorkflowEvent::StateChanged);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn transport_failure(&self, e: TransportError) -> PredictionError {
        match e {
            TransportError::Timeout => PredictionError::Timeout {
                after: self.config.timeout(),
            },
            TransportError::Network(message) => PredictionError::Network(message),
        }
    }

    fn emit(&self, event: &WorkflowEvent) {
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(event);
        }
    }
}

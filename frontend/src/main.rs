mod components;
mod transport;

use components::handlers;
use components::header::render_header;
use components::notice::render_notice;
use components::preview_area::render_preview_area;
use components::results::{render_result_drawer, render_results};
use components::upload_section::render_upload_section;
use components::utils::ReadSequence;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use std::rc::Rc;
use transport::GlooTransport;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use workflow::{ImageReference, PredictionWorkflow, WorkflowConfig, WorkflowEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Image source
    FilesAdded(Vec<GlooFile>),
    ImageLoaded(u64, ImageReference, ObjectUrl),
    ReadFailed(u64, String),

    // Prediction
    Submit,
    Workflow(WorkflowEvent),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),
    CloseDrawer,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    workflow: Rc<PredictionWorkflow<GlooTransport>>,
    preview_url: Option<ObjectUrl>,
    reading_file: bool,
    reads: ReadSequence,
    error: Option<String>,
    drawer_open: bool,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

fn workflow_config() -> WorkflowConfig {
    match option_env!("PREDICT_ENDPOINT") {
        Some(endpoint) => WorkflowConfig::new(endpoint).unwrap_or_else(|e| {
            log::error!("Ignoring PREDICT_ENDPOINT: {}", e);
            WorkflowConfig::default()
        }),
        None => WorkflowConfig::default(),
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let workflow = Rc::new(PredictionWorkflow::new(workflow_config(), GlooTransport));
        log::info!("Predictions go to {}", workflow.config().endpoint);
        let link = ctx.link().clone();
        workflow.subscribe(move |event| link.send_message(Msg::Workflow(event.clone())));

        let mut model = Self {
            workflow,
            preview_url: None,
            reading_file: false,
            reads: ReadSequence::default(),
            error: None,
            drawer_open: false,
            is_dragging: false,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesAdded(files) => handlers::handle_files_added(self, ctx, files),
            Msg::ImageLoaded(read, image, url) => {
                handlers::handle_image_loaded(self, read, image, url)
            }
            Msg::ReadFailed(read, message) => handlers::handle_read_failed(self, read, message),

            Msg::Submit => handlers::handle_submit(self),
            Msg::Workflow(event) => handlers::handle_workflow_event(self, event),

            Msg::SetError(error) => {
                self.error = error;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::CloseDrawer => {
                self.drawer_open = false;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header(self) }

                <main class="main-content">
                    <section class="workspace">
                        { render_upload_section(self, ctx) }
                        { render_preview_area(self, ctx) }
                        { render_notice(self.error.as_deref()) }
                    </section>
                    <aside class="results-panel">
                        { render_results(self) }
                    </aside>
                </main>

                { render_result_drawer(self, ctx) }

                <footer class="app-footer">
                    <p>{"Tomato Disease Classification | Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

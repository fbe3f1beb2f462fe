use super::super::{Model, Msg};
use super::utils::{extract_image_files, is_image};
use gloo_file::{File as GlooFile, ObjectUrl};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList, HtmlInputElement};
use workflow::{notice, ImageReference, PredictionError, WorkflowEvent};
use yew::prelude::*;

pub fn handle_files_added(model: &mut Model, ctx: &Context<Model>, files: Vec<GlooFile>) -> bool {
    let Some(file) = files.into_iter().next() else {
        return false;
    };

    model.error = None;
    model.reading_file = true;
    let read = model.reads.begin();

    let link = ctx.link().clone();
    spawn_local(async move {
        match gloo_file::futures::read_as_bytes(&file).await {
            Ok(bytes) => {
                let image = ImageReference::new(bytes, file.name(), file.raw_mime_type());
                link.send_message(Msg::ImageLoaded(read, image, ObjectUrl::from(file)));
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", file.name(), e);
                link.send_message(Msg::ReadFailed(read, format!("Could not read {}.", file.name())));
            }
        }
    });

    true
}

pub fn handle_image_loaded(model: &mut Model, read: u64, image: ImageReference, url: ObjectUrl) -> bool {
    if !model.reads.is_current(read) {
        log::debug!("Dropping stale read of {}", image.file_name());
        return false;
    }

    model.reading_file = false;
    model.preview_url = Some(url);
    model.workflow.select_image(image);
    true
}

pub fn handle_read_failed(model: &mut Model, read: u64, message: String) -> bool {
    if !model.reads.is_current(read) {
        return false;
    }

    model.reading_file = false;
    model.error = Some(message);
    true
}

pub fn handle_submit(model: &mut Model) -> bool {
    if model.workflow.is_submitting() {
        return false;
    }

    let workflow = Rc::clone(&model.workflow);
    spawn_local(async move {
        let outcome = workflow.submit().await;
        log::debug!("Submission finished: {:?}", outcome);
    });

    false
}

pub fn handle_workflow_event(model: &mut Model, event: WorkflowEvent) -> bool {
    match event {
        WorkflowEvent::StateChanged => {
            model.error = notice(&model.workflow.state());
        }
        WorkflowEvent::PresentResult(_) => {
            model.drawer_open = true;
        }
        WorkflowEvent::SelectImageFirst => {
            model.error = Some(PredictionError::NoImageSelected.to_string());
        }
    }
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file_list) = event.data_transfer().and_then(|data| data.files()) {
        process_file_list(ctx, file_list);
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(file_list) = event.clipboard_data().and_then(|data| data.files()) {
        if file_list.length() > 0 {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    if let Some(file) = file_list.item(0).filter(|file| !is_image(file)) {
        log::warn!("Skipping non-image file: {}", file.name());
        ctx.link().send_message(Msg::SetError(Some(format!(
            "Skipped non-image file: {}",
            file.name()
        ))));
        return;
    }

    let files = extract_image_files(&file_list);
    if !files.is_empty() {
        ctx.link().send_message(Msg::FilesAdded(files));
    }
}

pub fn files_from_input(e: Event) -> Msg {
    let input: HtmlInputElement = e.target_unchecked_into();
    let files = input.files().map(|list| extract_image_files(&list)).unwrap_or_default();
    // Clear so that picking the same file again still fires `change`.
    input.set_value("");

    if files.is_empty() {
        Msg::SetError(Some("No valid image file selected.".into()))
    } else {
        Msg::FilesAdded(files)
    }
}

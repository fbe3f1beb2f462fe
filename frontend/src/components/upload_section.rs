use super::super::{Model, Msg};
use super::handlers::files_from_input;
use web_sys::DragEvent;
use yew::html::Scope;
use yew::prelude::*;

const FILE_INPUT_ID: &str = "leaf-photo";

fn drag_state(link: &Scope<Model>, dragging: bool) -> Callback<DragEvent> {
    link.callback(move |e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(dragging)
    })
}

/// The drop zone is the `<label>` of a hidden file input, so clicking it opens
/// the picker without any script.
pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let hint = if model.reading_file {
        "Reading image..."
    } else {
        "Drop a leaf photo here, paste one, or click to browse"
    };

    html! {
        <div class="upload-section">
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept="image/*"
                hidden=true
                onchange={link.callback(files_from_input)}
            />
            <label
                for={FILE_INPUT_ID}
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={drag_state(link, true)}
                ondragleave={drag_state(link, false)}
                ondrop={link.callback(Msg::HandleDrop)}
            >
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <span class="upload-hint">{ hint }</span>
                <span class="file-types">{"JPG, PNG or WEBP"}</span>
            </label>
        </div>
    }
}

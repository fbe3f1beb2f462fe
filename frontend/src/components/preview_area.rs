use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let submitting = model.workflow.is_submitting();

    html! {
        <div id="preview-container">
            <span class="preview-badge">{"Preview"}</span>
            { render_selected_image_preview(model) }
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={ctx.link().callback(|_| Msg::Submit)}
                    disabled={submitting || model.reading_file}
                >
                    { render_submit_button_content(model, submitting) }
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(model: &Model) -> Html {
    match (&model.preview_url, model.workflow.image()) {
        (Some(url), Some(image)) => html! {
            <img id="actual-image-preview"
                src={url.to_string()}
                alt={image.file_name().to_string()}
                style="max-width:100%; max-height: 400px; object-fit: contain; margin-bottom: 10px;" />
        },
        _ => html! {
            <div class="preview-placeholder">
                <p>{"No image selected"}</p>
            </div>
        },
    }
}

fn render_submit_button_content(model: &Model, submitting: bool) -> Html {
    if submitting {
        return html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> };
    }

    let filename = model
        .workflow
        .image()
        .map(|image| image.file_name().to_string())
        .unwrap_or_default();

    if filename.is_empty() {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Predict Disease"}</> }
    } else {
        let display_name = if filename.chars().count() > 20 {
            format!("{}...", filename.chars().take(17).collect::<String>())
        } else {
            filename
        };
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Predict \"{}\"", display_name) }</> }
    }
}

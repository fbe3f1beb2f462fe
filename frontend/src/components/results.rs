use super::super::{Model, Msg};
use workflow::ResultView;
use yew::prelude::*;

const NO_GUIDANCE: &str = "No information available for this label.";

pub fn render_results(model: &Model) -> Html {
    let view = ResultView::from_state(&model.workflow.state());

    html! {
        <div class="results-container">
            <fieldset class="result-group">
                <legend>{"Prediction"}</legend>
                <label for="disease">{"Disease"}</label>
                <input id="disease" type="text" readonly=true value={view.disease.clone()} />
                <label for="confidence">{"Confidence"}</label>
                <input id="confidence" type="text" readonly=true value={view.confidence.clone()} />
            </fieldset>
            <fieldset class="result-group">
                <legend>{"Guidance"}</legend>
                <label for="causes">{"Causes"}</label>
                <textarea id="causes" readonly=true value={guidance(&view, view.causes)} />
                <label for="treatments">{"Treatments"}</label>
                <textarea id="treatments" readonly=true value={guidance(&view, view.treatments)} />
            </fieldset>
        </div>
    }
}

/// Narrow screens get the result in a drawer that opens when a prediction
/// arrives.
pub fn render_result_drawer(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.drawer_open {
        return html! {};
    }

    let close = ctx.link().callback(|_| Msg::CloseDrawer);
    html! {
        <div class="drawer-backdrop" onclick={close.clone()}>
            <div class="drawer" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="drawer-header">
                    <h2>{"Prediction"}</h2>
                    <p>{"The predicted tomato disease will be shown here."}</p>
                    <button class="remove-btn" title="Close" onclick={close}>
                        <i class="fa-solid fa-times"></i>
                    </button>
                </div>
                { render_results(model) }
            </div>
        </div>
    }
}

fn guidance(view: &ResultView, text: Option<&'static str>) -> String {
    match text {
        Some(text) if view.has_guidance() => text.to_string(),
        _ if view.disease.is_empty() => String::new(),
        _ => NO_GUIDANCE.to_string(),
    }
}

use super::super::Model;
use yew::prelude::*;

pub fn render_header(model: &Model) -> Html {
    let endpoint = &model.workflow.config().endpoint;
    let service = endpoint.host_str().unwrap_or("inference service").to_string();

    html! {
        <header class="app-header">
            <div class="brand">
                <i class="fa-solid fa-seedling"></i>
                <h1>{"Tomato Leaf Check"}</h1>
            </div>
            <span class="service-badge" title={endpoint.to_string()}>
                { format!("Model at {service}") }
            </span>
        </header>
    }
}

use yew::prelude::*;

pub fn render_notice(message: Option<&str>) -> Html {
    message.map_or_else(|| html! {}, |message| {
        html! {
            <p class="notice" role="alert">
                <i class="fa-solid fa-triangle-exclamation"></i>
                { format!(" {message}") }
            </p>
        }
    })
}

use yew::{function_component, Html};

#[function_component]
pub fn App() -> Html {
    use {
        crate::component::{DropZone, NotificationManager},
        js_sys::Date,
        yew::html,
    };

    html! {
        <div id="global">
        <div id="content">
            <p class="title">{ "Drop a file, get a link" }</p>
            <DropZone />
            <NotificationManager />
        </div>
        <footer>
            { format!("Rendered: {}", String::from(Date::new_0().to_string())) }
        </footer>
        </div>
    }
}

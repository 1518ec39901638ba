mod api;
mod components;
mod geolocation;
mod pages;
mod state;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/report/:lat/:lon")]
    SharedReport { lat: String, lon: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::report::ReportPage { latitude: None::<String>, longitude: None::<String> }
    }
}

#[component]
fn SharedReport(lat: String, lon: String) -> Element {
    rsx! {
        pages::report::ReportPage { latitude: Some(lat), longitude: Some(lon) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}

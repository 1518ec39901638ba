use dioxus::prelude::*;

#[component]
pub fn ShareLink(url: String) -> Element {
    let mut copied = use_signal(|| false);

    rsx! {
        div { class: "plan-url",
            input {
                r#type: "text",
                readonly: true,
                value: "{url}",
            }
            button {
                class: "secondary",
                onclick: {
                    let url = url.clone();
                    move |_| {
                        let url = url.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Some(window) = web_sys::window() {
                                let clipboard = window.navigator().clipboard();
                                match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&url)).await {
                                    Ok(_) => copied.set(true),
                                    Err(e) => tracing::warn!(error = ?e, "clipboard write failed"),
                                }
                            }
                        });
                    }
                },
                if *copied.read() { "Copied" } else { "Copy link" }
            }
        }
    }
}

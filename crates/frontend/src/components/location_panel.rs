use blightwatch_shared::location::LocationFields;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::geolocation;
use crate::state::{FarmOptions, Notice};

#[component]
pub fn LocationPanel(fields: Signal<LocationFields>, farm_options: FarmOptions) -> Element {
    let mut fields = fields;
    let mut detecting = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let current = fields.read().clone();
    let selected_farm = current.selected_farm().unwrap_or_default().to_string();
    let farms = farm_options.farms().to_vec();
    let placeholder = farm_options.placeholder();
    let farm_select_disabled = farm_options.is_disabled();

    rsx! {
        div { class: "panel",
            h3 { "Location" }

            // Saved farms
            select {
                "aria-label": "Select saved farm",
                disabled: farm_select_disabled,
                value: "{selected_farm}",
                onchange: move |evt: Event<FormData>| {
                    let name = evt.value();
                    if name.is_empty() {
                        fields.write().clear();
                    } else if let Some(farm) = farm_options.find(&name) {
                        fields.write().select_farm(farm);
                        notice.set(None);
                    }
                },
                option { value: "", "{placeholder}" }
                for f in farms {
                    option {
                        value: "{f.name}",
                        selected: selected_farm == f.name,
                        "{f.name} ({f.latitude}, {f.longitude})"
                    }
                }
            }

            // Device geolocation
            div { style: "margin-top: 8px;",
                button {
                    class: "secondary",
                    disabled: *detecting.read(),
                    onclick: move |_| {
                        detecting.set(true);
                        notice.set(Some(Notice::Info("Detecting your location\u{2026}".to_string())));
                        spawn(async move {
                            // Starts counting now; awaited after the fix.
                            let hold = TimeoutFuture::new(geolocation::DETECT_BUTTON_HOLD_MS);
                            match geolocation::current_position().await {
                                Ok(fix) => {
                                    tracing::info!(accuracy = fix.accuracy, "device location fixed");
                                    fields.write().apply_device_fix(fix.latitude, fix.longitude);
                                    notice.set(Some(Notice::Info(fix.user_message())));
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "geolocation failed");
                                    notice.set(Some(Notice::Error(e.user_message())));
                                }
                            }
                            hold.await;
                            detecting.set(false);
                        });
                    },
                    if *detecting.read() { "Detecting\u{2026}" } else { "Detect My Location" }
                }
            }

            // Manual entry
            div { class: "coord-inputs",
                label { "Latitude"
                    input {
                        r#type: "text",
                        placeholder: "e.g. 44.4759",
                        value: "{current.latitude}",
                        oninput: move |evt: Event<FormData>| {
                            fields.write().edit_latitude(evt.value());
                        },
                    }
                }
                label { "Longitude"
                    input {
                        r#type: "text",
                        placeholder: "e.g. -73.2121",
                        value: "{current.longitude}",
                        oninput: move |evt: Event<FormData>| {
                            fields.write().edit_longitude(evt.value());
                        },
                    }
                }
            }

            if let Some(n) = notice.read().clone() {
                p { class: "{n.class()}", "{n.text()}" }
            }
        }
    }
}

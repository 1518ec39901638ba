use blightwatch_shared::report::treatment_text;
use dioxus::prelude::*;

use crate::api;

/// Reference table of every catalogued disease and its treatments.
#[component]
pub fn TreatmentGuide() -> Element {
    let catalog = use_resource(|| async {
        let result = api::fetch_disease_catalog().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to load treatment guide");
        }
        result
    });

    let body = match &*catalog.read() {
        None => rsx! {
            p { class: "notice", "Loading treatment guide\u{2026}" }
        },
        Some(Err(e)) => rsx! {
            p { class: "notice notice-error", "Could not load the treatment guide: {e}" }
        },
        Some(Ok(entries)) => {
            let rows: Vec<_> = entries.iter().filter(|e| !e.is_healthy()).cloned().collect();
            rsx! {
                table { class: "guide-table",
                    thead {
                        tr {
                            th { "Disease" }
                            th { "Organic Treatment" }
                            th { "Chemical Treatment" }
                        }
                    }
                    tbody {
                        for entry in rows {
                            tr { key: "{entry.name}",
                                td { "{entry.name}" }
                                td { "{treatment_text(entry.organic_treatment.as_deref())}" }
                                td { "{treatment_text(entry.chemical_treatment.as_deref())}" }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "panel",
            h3 { "Treatment Guide" }
            {body}
        }
    }
}

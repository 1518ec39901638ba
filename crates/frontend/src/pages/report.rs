use blightwatch_shared::chart::ChartSlot;
use blightwatch_shared::location::LocationFields;
use dioxus::prelude::*;

use crate::api;
use crate::components::distribution_chart::DistributionChart;
use crate::components::location_panel::LocationPanel;
use crate::components::share_link::ShareLink;
use crate::components::summary_table::SummaryTable;
use crate::components::treatment_cards::TreatmentCards;
use crate::components::treatment_guide::TreatmentGuide;
use crate::state::{begin_report, settle_report, FarmOptions, ReportGeneration, ReportView};

#[component]
pub fn ReportPage(latitude: Option<String>, longitude: Option<String>) -> Element {
    // Prefilled from the /report/:lat/:lon route; generated on load.
    let auto_generate = latitude.is_some() && longitude.is_some();
    let farms_resource = use_resource(|| async {
        let result = api::fetch_farms().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to load farms");
        }
        result
    });

    let fields = use_signal(move || LocationFields {
        latitude: latitude.unwrap_or_default(),
        longitude: longitude.unwrap_or_default(),
        ..LocationFields::default()
    });
    let mut chart = use_signal(ChartSlot::default);
    let mut view = use_signal(|| ReportView::Idle);
    let mut prompt = use_signal(|| None::<String>);
    let mut generating = use_signal(|| false);
    let mut generation = use_signal(ReportGeneration::default);

    let mut generate = move || {
        let started = begin_report(&fields.peek(), &mut generation.write());
        let (coordinates, ticket) = match started {
            Ok(started) => started,
            Err(e) => {
                prompt.set(Some(e.to_string()));
                return;
            }
        };
        prompt.set(None);
        generating.set(true);
        view.set(ReportView::Loading);
        tracing::info!(
            ticket,
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            "requesting regional report"
        );

        spawn(async move {
            let outcome = api::fetch_regional_report(coordinates).await;
            if !generation.peek().is_current(ticket) {
                tracing::debug!(ticket, "dropping superseded regional report");
                return;
            }
            let next = settle_report(outcome, coordinates, &mut chart.write());
            view.set(next);
            generating.set(false);
        });
    };

    use_effect(move || {
        if auto_generate {
            generate();
        }
    });

    let farm_options = match &*farms_resource.read() {
        None => FarmOptions::Loading,
        Some(result) => FarmOptions::from_result(result),
    };

    let current_view = view.read().clone();
    let status = current_view.status();
    let status_class = if current_view.is_error() {
        "status status-error"
    } else {
        "status"
    };
    let is_generating = *generating.read();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Blightwatch" }
                span { class: "subtitle", "Regional orchard disease report" }
            }

            div { class: "sidebar",
                LocationPanel { fields: fields, farm_options: farm_options }

                div { class: "panel",
                    button {
                        disabled: is_generating,
                        onclick: move |_| generate(),
                        if is_generating { "Generating\u{2026}" } else { "Generate Report" }
                    }
                    if let Some(message) = prompt.read().clone() {
                        p { class: "notice notice-error", "{message}" }
                    }
                }

                TreatmentGuide {}
            }

            div { class: "report",
                if let Some(s) = status {
                    p { class: "{status_class}", "{s}" }
                }
                if let ReportView::Ready { report, coordinates } = current_view {
                    DistributionChart { chart: chart }
                    SummaryTable { distribution: report.affected() }
                    TreatmentCards { treatments: report.top_treatments.clone() }
                    ShareLink { url: api::build_report_url(&api::page_origin(), coordinates) }
                }
            }
        }
    }
}

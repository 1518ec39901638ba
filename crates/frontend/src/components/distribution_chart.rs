use blightwatch_shared::chart::{ChartSlot, DonutChart, CHART_SIZE};
use dioxus::prelude::*;

/// Renders whatever chart the slot currently holds.
///
/// The inner component is keyed by chart id, so mounting a new chart tears
/// down the old SVG (and its hover state) instead of patching it.
#[component]
pub fn DistributionChart(chart: Signal<ChartSlot>) -> Element {
    let current: Option<DonutChart> = chart.read().current().cloned();

    rsx! {
        div { class: "panel",
            h3 { "Disease Distribution" }
            for donut in current {
                Donut { key: "{donut.id}", chart: donut }
            }
        }
    }
}

#[component]
fn Donut(chart: DonutChart) -> Element {
    let mut hovered = use_signal(|| None::<usize>);
    let view_box = format!("0 0 {CHART_SIZE} {CHART_SIZE}");
    let center = CHART_SIZE / 2.0;
    let hovered_index = *hovered.read();
    let tooltip = hovered_index
        .and_then(|i| chart.slices.get(i))
        .map(|s| s.tooltip());

    rsx! {
        div { class: "donut-wrap",
            svg {
                class: "donut",
                width: "{CHART_SIZE}",
                height: "{CHART_SIZE}",
                view_box: "{view_box}",
                for (i, slice) in chart.slices.iter().enumerate() {
                    path {
                        key: "{slice.disease}",
                        d: "{slice.path()}",
                        fill: "{slice.color}",
                        stroke: "#1b1f24",
                        stroke_width: "1",
                        class: if hovered_index == Some(i) { "slice hovered" } else { "slice" },
                        onmouseenter: move |_| hovered.set(Some(i)),
                        onmouseleave: move |_| hovered.set(None),
                    }
                }
                text {
                    x: "{center}",
                    y: "{center - 4.0}",
                    text_anchor: "middle",
                    class: "donut-total",
                    "{chart.total}"
                }
                text {
                    x: "{center}",
                    y: "{center + 16.0}",
                    text_anchor: "middle",
                    class: "donut-caption",
                    if chart.total == 1 { "affected tree" } else { "affected trees" }
                }
            }

            if let Some(line) = tooltip {
                div { class: "chart-tooltip", "{line}" }
            }

            ul { class: "legend",
                for (i, slice) in chart.slices.iter().enumerate() {
                    li {
                        key: "{slice.disease}",
                        onmouseenter: move |_| hovered.set(Some(i)),
                        onmouseleave: move |_| hovered.set(None),
                        span { class: "swatch", style: "background: {slice.color};" }
                        "{slice.disease}: {slice.percentage_label()}"
                    }
                }
            }
        }
    }
}

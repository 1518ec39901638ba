use blightwatch_shared::models::RegionalDistribution;
use blightwatch_shared::report;
use dioxus::prelude::*;

#[component]
pub fn SummaryTable(distribution: RegionalDistribution) -> Element {
    let table = report::summary_table(&distribution);

    rsx! {
        div { class: "panel",
            h3 { "Summary" }
            table { class: "summary-table",
                thead {
                    tr {
                        th { "Disease" }
                        th { "Affected Trees" }
                        th { "Share" }
                        th { "Severity" }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        tr { key: "{row.disease}",
                            td { "{row.disease}" }
                            td { "{row.count}" }
                            td { "{row.percentage}" }
                            td {
                                class: "{row.level.css_class()}",
                                style: "color: {row.level.color()};",
                                "{row.severity_label()}"
                            }
                        }
                    }
                    tr { class: "total-row",
                        td { strong { "Total" } }
                        td { strong { "{table.total}" } }
                        td { strong { "{table.total_percentage()}" } }
                        td {}
                    }
                }
            }
        }
    }
}

use blightwatch_shared::models::TopTreatment;
use blightwatch_shared::report;
use dioxus::prelude::*;

#[component]
pub fn TreatmentCards(treatments: Vec<TopTreatment>) -> Element {
    let cards = report::treatment_cards(&treatments);
    if cards.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "panel",
            h3 { "Recommended Actions" }
            div { class: "action-cards",
                for card in cards {
                    div { class: "action-card", key: "{card.rank}",
                        div { class: "action-head",
                            span { class: "rank", "#{card.rank}" }
                            h4 { "{card.disease}" }
                            span { class: "affected", "{card.affected}" }
                        }
                        div { class: "stat",
                            div { class: "label", "Organic" }
                            div { class: "value", "{card.organic}" }
                        }
                        div { class: "stat",
                            div { class: "label", "Chemical" }
                            div { class: "value", "{card.chemical}" }
                        }
                    }
                }
            }
        }
    }
}

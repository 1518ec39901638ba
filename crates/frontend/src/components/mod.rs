pub mod distribution_chart;
pub mod location_panel;
pub mod share_link;
pub mod summary_table;
pub mod treatment_cards;
pub mod treatment_guide;

//! Shared types and pure report logic for the Blightwatch regional disease report.

pub mod chart;
pub mod location;
pub mod models;
pub mod reference;
pub mod report;

use blightwatch_shared::chart::ChartSlot;
use blightwatch_shared::location::{CoordinateError, Coordinates, LocationFields};
use blightwatch_shared::models::{Farm, RegionalReport};
use blightwatch_shared::report::{self, DEFAULT_EMPTY_MESSAGE};

use crate::api::ApiError;

/// Contents of the saved-farm dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum FarmOptions {
    Loading,
    Ready(Vec<Farm>),
    Empty,
    Failed,
}

impl FarmOptions {
    pub fn from_result(result: &Result<Vec<Farm>, ApiError>) -> Self {
        match result {
            Ok(farms) if farms.is_empty() => FarmOptions::Empty,
            Ok(farms) => FarmOptions::Ready(farms.clone()),
            Err(_) => FarmOptions::Failed,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FarmOptions::Loading => "Loading farms\u{2026}",
            FarmOptions::Ready(_) => "-- Select a saved farm --",
            FarmOptions::Empty => "No farms with saved coordinates",
            FarmOptions::Failed => "Could not load farms",
        }
    }

    pub fn is_disabled(&self) -> bool {
        !matches!(self, FarmOptions::Ready(_))
    }

    pub fn farms(&self) -> &[Farm] {
        match self {
            FarmOptions::Ready(farms) => farms,
            _ => &[],
        }
    }

    pub fn find(&self, name: &str) -> Option<&Farm> {
        self.farms().iter().find(|f| f.name == name)
    }
}

/// What the report region currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Idle,
    Loading,
    Empty(String),
    Failed(String),
    Ready {
        report: RegionalReport,
        coordinates: Coordinates,
    },
}

impl ReportView {
    /// Status line above the report.
    pub fn status(&self) -> Option<String> {
        match self {
            ReportView::Idle => None,
            ReportView::Loading => Some("Fetching regional data\u{2026}".to_string()),
            ReportView::Empty(message) | ReportView::Failed(message) => Some(message.clone()),
            ReportView::Ready {
                report: data,
                coordinates,
            } => {
                let affected = data.affected();
                Some(report::report_status(
                    // One per summary-table row, zero counts included.
                    affected.len(),
                    affected.values().sum(),
                    coordinates.latitude,
                    coordinates.longitude,
                ))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReportView::Failed(_))
    }
}

/// A one-line message under a control.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Notice::Info(_) => "notice",
            Notice::Error(_) => "notice notice-error",
        }
    }
}

/// Turn a finished fetch into the next view, keeping the chart slot in step.
///
/// Empty and failed outcomes destroy any chart on screen.
pub fn settle_report(
    outcome: Result<RegionalReport, ApiError>,
    coordinates: Coordinates,
    chart: &mut ChartSlot,
) -> ReportView {
    match outcome {
        Ok(report) if report.is_empty() => {
            chart.destroy();
            let message = report
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());
            ReportView::Empty(message)
        }
        Ok(report) => {
            chart.mount(&report.affected());
            ReportView::Ready {
                report,
                coordinates,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "regional report failed");
            chart.destroy();
            ReportView::Failed(format!("Could not load regional data: {}", e))
        }
    }
}

/// Ticket source for report requests. Only the newest ticket may render.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReportGeneration {
    latest: u64,
}

impl ReportGeneration {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Validate the location and take a ticket for a new report request.
///
/// A rejected location leaves `generation` untouched, so no request is issued.
pub fn begin_report(
    fields: &LocationFields,
    generation: &mut ReportGeneration,
) -> Result<(Coordinates, u64), CoordinateError> {
    let coordinates = fields.coordinates()?;
    Ok((coordinates, generation.issue()))
}

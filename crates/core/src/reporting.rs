//! Dashboard report aggregation.
//!
//! Everything here is a read-side computation over collections the caller
//! has already fetched: participant totals, event bucket counts, and the
//! per-event completion / self-sufficiency percentages that feed the two
//! doughnut charts.

use serde::Serialize;

use crate::event_status::EventBuckets;
use crate::lookup::Placeholder;
use crate::models::{Attendance, Event, Participant};
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline counts shown on the report cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_participants: usize,
    pub events: EventBuckets,
}

impl ReportSummary {
    pub fn compute(participants: &[Participant], events: &[Event], today: Date) -> Self {
        Self {
            total_participants: participants.len(),
            events: EventBuckets::count(events, today),
        }
    }
}

// ---------------------------------------------------------------------------
// Assessment percentages
// ---------------------------------------------------------------------------

/// Completion and self-sufficiency shares for one event, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub completed_percentage: f64,
    pub self_sufficient_percentage: f64,
    /// Number of attendance records the percentages were computed over.
    pub total: usize,
}

impl Assessment {
    /// Compute the assessment for `selected_event` over `attendances`.
    ///
    /// Records for other events are ignored even if the caller already
    /// filtered server-side. With no selection, or no matching records,
    /// both percentages are zero.
    pub fn compute(attendances: &[Attendance], selected_event: Option<DbId>) -> Self {
        let Some(event_id) = selected_event else {
            return Self::default();
        };

        let matching: Vec<&Attendance> =
            attendances.iter().filter(|a| a.event == event_id).collect();
        let total = matching.len();
        let completed = matching.iter().filter(|a| a.finished_program).count();
        let self_sufficient = matching.iter().filter(|a| a.self_sufficient).count();

        Self {
            completed_percentage: percentage(completed, total),
            self_sufficient_percentage: percentage(self_sufficient, total),
            total,
        }
    }

    /// True when no attendance records matched the selection.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `100 - share`, or zero when there was nothing to assess.
    fn complement(&self, share: f64) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            finite_or_zero(100.0 - share)
        }
    }
}

/// `100 * part / total`, with zero for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    finite_or_zero(100.0 * part as f64 / total as f64)
}

/// Replace NaN and infinities with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Event selector
// ---------------------------------------------------------------------------

/// One entry of the report's event selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOption {
    pub id: DbId,
    pub name: String,
    /// Number of nested attendance records the API returned for the event.
    pub attendance_count: usize,
}

pub fn event_options(events: &[Event]) -> Vec<EventOption> {
    events
        .iter()
        .map(|e| EventOption {
            id: e.id,
            name: e.name.clone(),
            attendance_count: e.event_attendances.len(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub y: f64,
}

/// A titled doughnut chart. No points are emitted when no event is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutChart {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

/// Build the completion and sufficiency charts for the current selection.
pub fn assessment_charts(
    options: &[EventOption],
    selected_event: Option<DbId>,
    assessment: &Assessment,
) -> (DoughnutChart, DoughnutChart) {
    let Some(event_id) = selected_event else {
        return (
            DoughnutChart {
                title: "Completion Status".to_string(),
                points: Vec::new(),
            },
            DoughnutChart {
                title: "Sufficiency Status".to_string(),
                points: Vec::new(),
            },
        );
    };

    let (name, count) = match find_option(options, event_id) {
        Some(option) => (option.name.as_str(), option.attendance_count),
        None => (Placeholder::Unknown.as_str(), 0),
    };

    let completed = finite_or_zero(assessment.completed_percentage);
    let sufficient = finite_or_zero(assessment.self_sufficient_percentage);

    let completion = DoughnutChart {
        title: format!("Completion Assessment for {name} : {count}"),
        points: vec![
            ChartPoint { label: "Completed Program", y: completed },
            ChartPoint { label: "Not Completed", y: assessment.complement(completed) },
        ],
    };
    let sufficiency = DoughnutChart {
        title: format!("Sufficiency Assessment for {name}"),
        points: vec![
            ChartPoint { label: "Sufficient", y: sufficient },
            ChartPoint { label: "Insufficient", y: assessment.complement(sufficient) },
        ],
    };
    (completion, sufficiency)
}

fn find_option(options: &[EventOption], id: DbId) -> Option<&EventOption> {
    options.iter().find(|o| o.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The report screen: headline counts and the two assessment charts.
//!
//! Participants and events are fetched concurrently. The assessment is
//! refreshed whenever the selected event changes, from
//! `participantattendances/?event={id}`; the records are still filtered by
//! event on the client before the percentages are computed.

use std::sync::Arc;

use dreams_core::models::{Attendance, Event, Participant};
use dreams_core::reporting::{
    assessment_charts, event_options, Assessment, DoughnutChart, EventOption, ReportSummary,
};
use dreams_core::types::{Date, DbId};

use crate::api::DreamsApi;
use crate::auth::Session;
use crate::controller::{credential_for, fetch_collection};
use crate::error::ClientResult;
use crate::resource::{Attendances, Events, Participants, Resource};
use crate::screens::LoadReport;

pub struct ReportScreen {
    api: DreamsApi,
    session: Arc<Session>,
    participants: Vec<Participant>,
    events: Vec<Event>,
    attendances: Vec<Attendance>,
    selected_event: Option<DbId>,
    assessment: Assessment,
}

impl ReportScreen {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            participants: Vec::new(),
            events: Vec::new(),
            attendances: Vec::new(),
            selected_event: None,
            assessment: Assessment::default(),
        }
    }

    /// Fetch participants, events and (if an event is selected) its
    /// attendances concurrently. Each result is applied independently.
    pub async fn load(&mut self) -> LoadReport {
        let selected = self.selected_event;
        let (participants, events, attendances) = tokio::join!(
            fetch_collection::<Participants>(&self.api, &self.session),
            fetch_collection::<Events>(&self.api, &self.session),
            self.fetch_attendances(selected),
        );

        let mut report = LoadReport::default();
        match participants {
            Ok(records) => self.participants = records,
            Err(e) => report.failures.push((Participants::PATH, e)),
        }
        match events {
            Ok(records) => self.events = records,
            Err(e) => report.failures.push((Events::PATH, e)),
        }
        match attendances {
            Ok(records) => self.apply_attendances(selected, records),
            Err(e) => report.failures.push((Attendances::PATH, e)),
        }
        report
    }

    /// Change the selected event and recompute the assessment.
    ///
    /// Clearing the selection resets both percentages to zero without a
    /// request. If the fetch fails the previous selection and assessment
    /// are both kept.
    pub async fn select_event(&mut self, event_id: Option<DbId>) -> ClientResult<()> {
        let records = self.fetch_attendances(event_id).await?;
        self.selected_event = event_id;
        self.apply_attendances(event_id, records);
        Ok(())
    }

    pub fn selected_event(&self) -> Option<DbId> {
        self.selected_event
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn attendances(&self) -> &[Attendance] {
        &self.attendances
    }

    pub fn summary(&self, today: Date) -> ReportSummary {
        ReportSummary::compute(&self.participants, &self.events, today)
    }

    pub fn assessment(&self) -> Assessment {
        self.assessment
    }

    pub fn event_options(&self) -> Vec<EventOption> {
        event_options(&self.events)
    }

    /// Completion and sufficiency charts for the current selection.
    pub fn charts(&self) -> (DoughnutChart, DoughnutChart) {
        assessment_charts(&self.event_options(), self.selected_event, &self.assessment)
    }

    async fn fetch_attendances(&self, event_id: Option<DbId>) -> ClientResult<Vec<Attendance>> {
        let Some(event_id) = event_id else {
            return Ok(Vec::new());
        };
        let token = credential_for(&self.session, Attendances::NAME)?;
        self.api
            .list_for_event::<Attendances>(&token, event_id)
            .await
            .inspect_err(|e| {
                tracing::error!(event_id, error = %e, "Failed to fetch assessments");
            })
    }

    fn apply_attendances(&mut self, event_id: Option<DbId>, records: Vec<Attendance>) {
        self.assessment = Assessment::compute(&records, event_id);
        self.attendances = records;
        tracing::debug!(
            ?event_id,
            completed = self.assessment.completed_percentage,
            self_sufficient = self.assessment.self_sufficient_percentage,
            "Recomputed assessment"
        );
    }
}

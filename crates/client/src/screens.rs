//! The concrete list screens: a [`ResourceListController`] plus the
//! lookup collections each screen joins against for labels.
//!
//! Loading a screen issues its fetches concurrently. Each fetch writes
//! only its own collection, so a screen whose lookups failed or are still
//! pending still shows its rows, with placeholders for the labels.

use std::sync::Arc;

use dreams_core::event_status::EventView;
use dreams_core::lookup::{resolve_label, resolve_labels, Placeholder};
use dreams_core::models::{Attendance, Event, Material, MaterialAssignment, Participant};
use dreams_core::pagination::ATTENDANCE_PAGE_SIZE;
use dreams_core::types::{Date, DbId};

use crate::api::DreamsApi;
use crate::auth::Session;
use crate::controller::{LookupCollection, ResourceListController};
use crate::error::{ClientError, ClientResult};
use crate::resource::{
    AgeGroups, Attendances, Events, Facilitators, MaterialAssignments, Materials, Participants,
};

/// Age groups have no lookups.
pub type AgeGroupsScreen = ResourceListController<AgeGroups>;

/// Facilitators have no lookups.
pub type FacilitatorsScreen = ResourceListController<Facilitators>;

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Outcome of loading every collection a screen needs.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Collections whose fetch failed, with the error.
    pub failures: Vec<(&'static str, ClientError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, collection: &'static str, result: ClientResult<()>) {
        if let Err(e) = result {
            self.failures.push((collection, e));
        }
    }
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

pub struct ParticipantsScreen {
    pub list: ResourceListController<Participants>,
    pub age_groups: LookupCollection<AgeGroups>,
}

impl ParticipantsScreen {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            list: ResourceListController::new(api.clone(), Arc::clone(&session)),
            age_groups: LookupCollection::new(api, session),
        }
    }

    pub async fn load(&mut self) -> LoadReport {
        let (list, age_groups) = tokio::join!(self.list.load(), self.age_groups.load());
        let mut report = LoadReport::default();
        report.record("participants", list);
        report.record("agegroups", age_groups);
        report
    }

    /// Age group label, or `-`.
    pub fn age_group_label(&self, participant: &Participant) -> &str {
        resolve_label(
            self.age_groups.records(),
            participant.age_group,
            |g| g.group.as_str(),
            Placeholder::Dash,
        )
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// One of the upcoming / ongoing / closed event lists.
///
/// All three views share the same collection; the view predicate is
/// applied before pagination.
pub struct EventsScreen {
    view: EventView,
    pub list: ResourceListController<Events>,
    pub facilitators: LookupCollection<Facilitators>,
}

impl EventsScreen {
    pub fn new(view: EventView, api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            view,
            list: ResourceListController::new(api.clone(), Arc::clone(&session)),
            facilitators: LookupCollection::new(api, session),
        }
    }

    pub fn view(&self) -> EventView {
        self.view
    }

    pub fn set_view(&mut self, view: EventView) {
        self.view = view;
        self.list.set_page(1);
    }

    pub async fn load(&mut self) -> LoadReport {
        let (list, facilitators) = tokio::join!(self.list.load(), self.facilitators.load());
        let mut report = LoadReport::default();
        report.record("events", list);
        report.record("facilitators", facilitators);
        report
    }

    /// Every event in this view as of `today`.
    pub fn visible(&self, today: Date) -> Vec<&Event> {
        let view = self.view;
        self.list.filtered(|e| view.matches(e, today))
    }

    pub fn page(&self, today: Date, page_number: usize) -> Vec<&Event> {
        let view = self.view;
        self.list.page_where(page_number, |e| view.matches(e, today))
    }

    pub fn current_items(&self, today: Date) -> Vec<&Event> {
        self.page(today, self.list.current_page())
    }

    pub fn total_pages(&self, today: Date) -> usize {
        let view = self.view;
        self.list.total_pages_where(|e| view.matches(e, today))
    }

    /// Facilitator names for `event`, `Unknown` for unresolved ids.
    pub fn facilitator_names<'a>(&'a self, event: &Event) -> Vec<&'a str> {
        resolve_labels(
            self.facilitators.records(),
            &event.facilitator_ids(),
            |f| f.name.as_str(),
            Placeholder::Unknown,
        )
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

pub struct MaterialsScreen {
    pub list: ResourceListController<Materials>,
    pub age_groups: LookupCollection<AgeGroups>,
}

impl MaterialsScreen {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            list: ResourceListController::new(api.clone(), Arc::clone(&session)),
            age_groups: LookupCollection::new(api, session),
        }
    }

    pub async fn load(&mut self) -> LoadReport {
        let (list, age_groups) = tokio::join!(self.list.load(), self.age_groups.load());
        let mut report = LoadReport::default();
        report.record("materials", list);
        report.record("agegroups", age_groups);
        report
    }

    /// Target group label, or `N/A`.
    pub fn target_group_label(&self, material: &Material) -> &str {
        resolve_label(
            self.age_groups.records(),
            material.target_group,
            |g| g.group.as_str(),
            Placeholder::NotAvailable,
        )
    }
}

// ---------------------------------------------------------------------------
// Material assignments
// ---------------------------------------------------------------------------

pub struct MaterialAssignmentsScreen {
    pub list: ResourceListController<MaterialAssignments>,
    pub materials: LookupCollection<Materials>,
    pub events: LookupCollection<Events>,
}

impl MaterialAssignmentsScreen {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            list: ResourceListController::new(api.clone(), Arc::clone(&session)),
            materials: LookupCollection::new(api.clone(), Arc::clone(&session)),
            events: LookupCollection::new(api, session),
        }
    }

    pub async fn load(&mut self) -> LoadReport {
        let (list, materials, events) = tokio::join!(
            self.list.load(),
            self.materials.load(),
            self.events.load()
        );
        let mut report = LoadReport::default();
        report.record("materialevents", list);
        report.record("materials", materials);
        report.record("events", events);
        report
    }

    pub fn material_label(&self, assignment: &MaterialAssignment) -> &str {
        resolve_label(
            self.materials.records(),
            assignment.material,
            |m| m.name.as_str(),
            Placeholder::Unknown,
        )
    }

    pub fn event_label(&self, assignment: &MaterialAssignment) -> &str {
        resolve_label(
            self.events.records(),
            assignment.event,
            |e| e.name.as_str(),
            Placeholder::Unknown,
        )
    }
}

// ---------------------------------------------------------------------------
// Progress (attendance)
// ---------------------------------------------------------------------------

/// Attendance records, optionally narrowed to one event, five per page.
pub struct ProgressScreen {
    pub list: ResourceListController<Attendances>,
    pub participants: LookupCollection<Participants>,
    pub events: LookupCollection<Events>,
    selected_event: Option<DbId>,
}

impl ProgressScreen {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            list: ResourceListController::new(api.clone(), Arc::clone(&session))
                .with_page_size(ATTENDANCE_PAGE_SIZE),
            participants: LookupCollection::new(api.clone(), Arc::clone(&session)),
            events: LookupCollection::new(api, session),
            selected_event: None,
        }
    }

    pub async fn load(&mut self) -> LoadReport {
        let (participants, events, list) = tokio::join!(
            self.participants.load(),
            self.events.load(),
            self.list.load()
        );
        let mut report = LoadReport::default();
        report.record("participants", participants);
        report.record("events", events);
        report.record("participantattendances", list);
        report
    }

    pub fn selected_event(&self) -> Option<DbId> {
        self.selected_event
    }

    /// Narrow the list to one event (or show all with `None`) and go back
    /// to the first page.
    pub fn select_event(&mut self, event_id: Option<DbId>) {
        self.selected_event = event_id;
        self.list.set_page(1);
    }

    fn matches(&self, attendance: &Attendance) -> bool {
        self.selected_event.map_or(true, |id| attendance.event == id)
    }

    pub fn visible(&self) -> Vec<&Attendance> {
        self.list.filtered(|a| self.matches(a))
    }

    pub fn page(&self, page_number: usize) -> Vec<&Attendance> {
        self.list.page_where(page_number, |a| self.matches(a))
    }

    pub fn current_items(&self) -> Vec<&Attendance> {
        self.page(self.list.current_page())
    }

    pub fn total_pages(&self) -> usize {
        self.list.total_pages_where(|a| self.matches(a))
    }

    pub fn participant_label(&self, attendance: &Attendance) -> &str {
        resolve_label(
            self.participants.records(),
            attendance.participant,
            |p| p.name.as_str(),
            Placeholder::Unknown,
        )
    }

    pub fn event_label(&self, attendance: &Attendance) -> &str {
        resolve_label(
            self.events.records(),
            attendance.event,
            |e| e.name.as_str(),
            Placeholder::Unknown,
        )
    }
}

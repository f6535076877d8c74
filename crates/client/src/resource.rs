//! Descriptors binding each API collection to its record and draft types.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use dreams_core::models::{
    AgeGroup, AgeGroupDraft, Attendance, AttendanceDraft, Event, EventDraft, Facilitator,
    FacilitatorDraft, Material, MaterialAssignment, MaterialAssignmentDraft, MaterialDraft,
    Participant, ParticipantDraft,
};
use dreams_core::types::Identified;

/// HTTP method used to submit an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

impl UpdateMethod {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            UpdateMethod::Put => reqwest::Method::PUT,
            UpdateMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One REST collection.
///
/// Edit forms are pre-populated through `Draft: From<&Record>`, which is
/// where nested detail objects are translated back to plain ids.
pub trait Resource: Send + Sync + 'static {
    /// Collection path under the API base, without slashes.
    const PATH: &'static str;
    /// Human-readable name used in log lines.
    const NAME: &'static str;
    const UPDATE_METHOD: UpdateMethod;

    type Record: DeserializeOwned + Identified + Clone + Debug + Send + Sync;
    type Draft: Serialize
        + Validate
        + Default
        + Clone
        + Debug
        + Send
        + Sync
        + for<'a> From<&'a Self::Record>;
}

macro_rules! resource {
    ($(#[$meta:meta])* $marker:ident, $path:literal, $name:literal, $method:ident, $record:ty, $draft:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $marker;

        impl Resource for $marker {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
            const UPDATE_METHOD: UpdateMethod = UpdateMethod::$method;
            type Record = $record;
            type Draft = $draft;
        }
    };
}

resource!(
    /// `participants/`, edited with PUT.
    Participants, "participants", "participant", Put, Participant, ParticipantDraft
);
resource!(
    /// `agegroups/`, edited with PATCH.
    AgeGroups, "agegroups", "age group", Patch, AgeGroup, AgeGroupDraft
);
resource!(
    /// `events/`, edited with PATCH.
    Events, "events", "event", Patch, Event, EventDraft
);
resource!(
    /// `facilitators/`, edited with PATCH.
    Facilitators, "facilitators", "facilitator", Patch, Facilitator, FacilitatorDraft
);
resource!(
    /// `materials/`, edited with PATCH.
    Materials, "materials", "material", Patch, Material, MaterialDraft
);
resource!(
    /// `materialevents/`, edited with PATCH.
    MaterialAssignments, "materialevents", "material assignment", Patch, MaterialAssignment, MaterialAssignmentDraft
);
resource!(
    /// `participantattendances/`, edited with PUT.
    Attendances, "participantattendances", "attendance", Put, Attendance, AttendanceDraft
);

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Attendance, Facilitator};
use crate::types::{Date, DbId, Identified};

/// A programme event.
///
/// `facilitators` is the writable id list; `facilitators_details` and
/// `event_attendances` are nested read-only expansions and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub event_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub location: String,
    #[serde(default)]
    pub facilitators: Vec<DbId>,
    #[serde(default)]
    pub lessons: String,
    #[serde(default)]
    pub learning_outcomes: String,
    #[serde(default, skip_serializing)]
    pub facilitators_details: Vec<Facilitator>,
    #[serde(default, skip_serializing)]
    pub event_attendances: Vec<Attendance>,
}

impl Event {
    /// Facilitator ids for this event, preferring the nested details.
    pub fn facilitator_ids(&self) -> Vec<DbId> {
        if self.facilitators_details.is_empty() {
            self.facilitators.clone()
        } else {
            self.facilitators_details.iter().map(|f| f.id).collect()
        }
    }
}

impl Identified for Event {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "event type is required"))]
    pub event_type: String,
    #[validate(required(message = "start date is required"))]
    pub start_date: Option<Date>,
    #[validate(required(message = "end date is required"))]
    pub end_date: Option<Date>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    pub facilitators: Vec<DbId>,
    pub lessons: String,
    pub learning_outcomes: String,
}

impl From<&Event> for EventDraft {
    fn from(record: &Event) -> Self {
        Self {
            name: record.name.clone(),
            event_type: record.event_type.clone(),
            start_date: Some(record.start_date),
            end_date: Some(record.end_date),
            location: record.location.clone(),
            facilitators: record.facilitator_ids(),
            lessons: record.lessons.clone(),
            learning_outcomes: record.learning_outcomes.clone(),
        }
    }
}

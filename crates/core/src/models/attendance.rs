use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Participant;
use crate::types::{DbId, Identified};

/// A participant's attendance and progress record for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: DbId,
    pub participant: DbId,
    pub event: DbId,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub lessons_attended: i32,
    #[serde(default)]
    pub finished_program: bool,
    #[serde(default)]
    pub self_sufficient: bool,
    #[serde(default, skip_serializing)]
    pub participant_details: Option<Participant>,
}

impl Identified for Attendance {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AttendanceDraft {
    #[validate(required(message = "participant is required"))]
    pub participant: Option<DbId>,
    #[validate(required(message = "event is required"))]
    pub event: Option<DbId>,
    #[validate(length(min = 1, message = "skills are required"))]
    pub skills: String,
    pub lessons_attended: i32,
    pub finished_program: bool,
    pub self_sufficient: bool,
}

impl From<&Attendance> for AttendanceDraft {
    fn from(record: &Attendance) -> Self {
        Self {
            participant: Some(record.participant),
            event: Some(record.event),
            skills: record.skills.clone(),
            lessons_attended: record.lessons_attended,
            finished_program: record.finished_program,
            self_sufficient: record.self_sufficient,
        }
    }
}

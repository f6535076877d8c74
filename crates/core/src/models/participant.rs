use serde::{Deserialize, Serialize};
use validator::Validate;

use super::AgeGroup;
use crate::types::{Date, DbId, Identified};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: DbId,
    pub name: String,
    pub age_group: DbId,
    pub village: String,
    pub has_hiv: bool,
    #[serde(default)]
    pub is_in_school: bool,
    pub dob: Date,
    pub enrollment_date: Date,
    /// Read-only copy of the referenced age group.
    #[serde(default, skip_serializing)]
    pub age_group_details: Option<AgeGroup>,
}

impl Identified for Participant {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Editable participant fields.
///
/// New participants default to being in school, matching the enrolment
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParticipantDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(required(message = "age group is required"))]
    pub age_group: Option<DbId>,
    #[validate(required(message = "date of birth is required"))]
    pub dob: Option<Date>,
    pub has_hiv: bool,
    pub is_in_school: bool,
    #[validate(length(min = 1, message = "village is required"))]
    pub village: String,
    #[validate(required(message = "enrollment date is required"))]
    pub enrollment_date: Option<Date>,
}

impl Default for ParticipantDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age_group: None,
            dob: None,
            has_hiv: false,
            is_in_school: true,
            village: String::new(),
            enrollment_date: None,
        }
    }
}

impl From<&Participant> for ParticipantDraft {
    fn from(record: &Participant) -> Self {
        Self {
            name: record.name.clone(),
            age_group: Some(record.age_group),
            dob: Some(record.dob),
            has_hiv: record.has_hiv,
            is_in_school: record.is_in_school,
            village: record.village.clone(),
            enrollment_date: Some(record.enrollment_date),
        }
    }
}

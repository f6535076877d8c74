use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Date, DbId, Identified};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facilitator {
    pub id: DbId,
    pub name: String,
    pub dob: Date,
    pub gender: String,
    pub facilitates: String,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Identified for Facilitator {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FacilitatorDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(required(message = "date of birth is required"))]
    pub dob: Option<Date>,
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "facilitates is required"))]
    pub facilitates: String,
    pub contact: Option<String>,
}

impl From<&Facilitator> for FacilitatorDraft {
    fn from(record: &Facilitator) -> Self {
        Self {
            name: record.name.clone(),
            dob: Some(record.dob),
            gender: record.gender.clone(),
            facilitates: record.facilitates.clone(),
            contact: record.contact.clone(),
        }
    }
}

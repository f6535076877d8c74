use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Identified};

/// An age bracket label such as `10-14`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: DbId,
    pub group: String,
}

impl Identified for AgeGroup {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AgeGroupDraft {
    #[validate(length(min = 1, message = "group is required"))]
    pub group: String,
}

impl From<&AgeGroup> for AgeGroupDraft {
    fn from(record: &AgeGroup) -> Self {
        Self {
            group: record.group.clone(),
        }
    }
}

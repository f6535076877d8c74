use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Event;
use crate::types::{DbId, Identified};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: DbId,
    pub name: String,
    pub stock: i32,
    pub target_group: DbId,
}

impl Identified for Material {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MaterialDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub stock: i32,
    #[validate(required(message = "target group is required"))]
    pub target_group: Option<DbId>,
}

impl From<&Material> for MaterialDraft {
    fn from(record: &Material) -> Self {
        Self {
            name: record.name.clone(),
            stock: record.stock,
            target_group: Some(record.target_group),
        }
    }
}

/// A quantity of one material handed out at one event.
///
/// The client never checks `quantity` against the material's stock; the
/// server rejects over-allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAssignment {
    pub id: DbId,
    pub material: DbId,
    pub event: DbId,
    pub quantity: i32,
    #[serde(default, skip_serializing)]
    pub material_details: Option<Material>,
    #[serde(default, skip_serializing)]
    pub event_details: Option<Event>,
}

impl Identified for MaterialAssignment {
    fn id(&self) -> DbId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MaterialAssignmentDraft {
    #[validate(required(message = "material is required"))]
    pub material: Option<DbId>,
    #[validate(required(message = "event is required"))]
    pub event: Option<DbId>,
    pub quantity: i32,
}

impl From<&MaterialAssignment> for MaterialAssignmentDraft {
    fn from(record: &MaterialAssignment) -> Self {
        Self {
            material: Some(record.material),
            event: Some(record.event),
            quantity: record.quantity,
        }
    }
}

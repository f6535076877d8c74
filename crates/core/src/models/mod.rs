//! Entity records as returned by the API, and the editable drafts the
//! forms submit back.
//!
//! Records carry the server-assigned `id` plus any read-only nested
//! `*_details` objects the serializers embed. Drafts hold only the
//! writable fields; their required markers are declared with
//! [`validator::Validate`] and checked before anything is sent.

mod age_group;
mod attendance;
mod event;
mod facilitator;
mod material;
mod participant;

pub use age_group::{AgeGroup, AgeGroupDraft};
pub use attendance::{Attendance, AttendanceDraft};
pub use event::{Event, EventDraft};
pub use facilitator::{Facilitator, FacilitatorDraft};
pub use material::{Material, MaterialAssignment, MaterialAssignmentDraft, MaterialDraft};
pub use participant::{Participant, ParticipantDraft};

use validator::Validate;

use crate::error::CoreError;

/// Check a draft's required markers, mapping failures into [`CoreError`].
pub fn validate_draft<D: Validate>(draft: &D) -> Result<(), CoreError> {
    draft.validate().map_err(CoreError::from)
}

//! Foreign-id label resolution against cached lookup collections.
//!
//! Every screen that shows a referenced record joins by id against a
//! separately fetched collection. When the collection has not loaded yet,
//! or the id no longer exists, the screen's placeholder is shown instead.

use crate::types::{DbId, Identified};

/// Literal shown in place of an unresolvable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `-`, used for participant age groups.
    Dash,
    /// `N/A`, used for material target groups.
    NotAvailable,
    /// `Unknown`, used for assignment and attendance references.
    Unknown,
}

impl Placeholder {
    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Dash => "-",
            Placeholder::NotAvailable => "N/A",
            Placeholder::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the record with the given id.
pub fn find_by_id<T: Identified>(items: &[T], id: DbId) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Resolve `id` to a display label, or the placeholder when not found.
pub fn resolve_label<'a, T, F>(items: &'a [T], id: DbId, label: F, fallback: Placeholder) -> &'a str
where
    T: Identified,
    F: Fn(&'a T) -> &'a str,
{
    find_by_id(items, id).map(label).unwrap_or(fallback.as_str())
}

/// Resolve a list of ids, keeping order and substituting the placeholder
/// for each missing id.
pub fn resolve_labels<'a, T, F>(
    items: &'a [T],
    ids: &[DbId],
    label: F,
    fallback: Placeholder,
) -> Vec<&'a str>
where
    T: Identified,
    F: Fn(&'a T) -> &'a str + Copy,
{
    ids.iter()
        .map(|&id| resolve_label(items, id, label, fallback))
        .collect()
}

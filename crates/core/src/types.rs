/// All server primary keys are integer serials.
pub type DbId = i64;

/// Calendar dates as exchanged with the API (`YYYY-MM-DD`).
pub type Date = chrono::NaiveDate;

/// A server record carrying its own primary key.
pub trait Identified {
    fn id(&self) -> DbId;
}

//! Upcoming / ongoing / closed classification of events.
//!
//! Classification is derived from the event dates and a caller-supplied
//! `today`; it is never stored. The three predicates are evaluated
//! independently and are not a partition: an event that started before
//! today and ends after today matches none of them, and an event that
//! starts today matches only [`EventView::Ongoing`].

use serde::{Deserialize, Serialize};

use crate::models::Event;
use crate::types::Date;

/// The three event list screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventView {
    Upcoming,
    Ongoing,
    Closed,
}

impl EventView {
    pub const ALL: [EventView; 3] = [EventView::Upcoming, EventView::Ongoing, EventView::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            EventView::Upcoming => "upcoming",
            EventView::Ongoing => "ongoing",
            EventView::Closed => "closed",
        }
    }

    /// Whether `event` belongs on this screen as of `today`.
    pub fn matches(self, event: &Event, today: Date) -> bool {
        match self {
            EventView::Upcoming => is_upcoming(event, today),
            EventView::Ongoing => is_ongoing(event, today),
            EventView::Closed => is_closed(event, today),
        }
    }

    /// Events of this view, in collection order.
    pub fn filter<'a>(self, events: &'a [Event], today: Date) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e, today)).collect()
    }
}

/// Starts strictly after today.
pub fn is_upcoming(event: &Event, today: Date) -> bool {
    event.start_date > today
}

/// Starts on today's calendar day.
pub fn is_ongoing(event: &Event, today: Date) -> bool {
    event.start_date == today
}

/// Ended strictly before today.
pub fn is_closed(event: &Event, today: Date) -> bool {
    event.end_date < today
}

/// Today's date in the local time zone.
pub fn local_today() -> Date {
    chrono::Local::now().date_naive()
}

/// Per-view counts over a full (unpaginated) event collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventBuckets {
    pub upcoming: usize,
    pub ongoing: usize,
    pub closed: usize,
}

impl EventBuckets {
    pub fn count(events: &[Event], today: Date) -> Self {
        events.iter().fold(Self::default(), |mut acc, event| {
            if is_upcoming(event, today) {
                acc.upcoming += 1;
            }
            if is_ongoing(event, today) {
                acc.ongoing += 1;
            }
            if is_closed(event, today) {
                acc.closed += 1;
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> Date {
        "2026-10-14".parse().unwrap()
    }

    fn event(id: i64, start: Date, end: Date) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            event_type: "Workshop".to_string(),
            start_date: start,
            end_date: end,
            location: "Hall".to_string(),
            facilitators: vec![],
            lessons: String::new(),
            learning_outcomes: String::new(),
            facilitators_details: vec![],
            event_attendances: vec![],
        }
    }

    #[test]
    fn starting_today_is_ongoing_only() {
        let t = today();
        let e = event(1, t, t + Duration::days(5));
        assert!(EventView::Ongoing.matches(&e, t));
        assert!(!EventView::Upcoming.matches(&e, t));
        assert!(!EventView::Closed.matches(&e, t));
    }

    #[test]
    fn started_earlier_and_still_running_matches_no_view() {
        let t = today();
        let e = event(1, t - Duration::days(2), t + Duration::days(2));
        for view in EventView::ALL {
            assert!(!view.matches(&e, t), "{} unexpectedly matched", view.as_str());
        }
    }

    #[test]
    fn future_start_is_upcoming() {
        let t = today();
        let e = event(1, t + Duration::days(1), t + Duration::days(3));
        assert!(is_upcoming(&e, t));
        assert!(!is_ongoing(&e, t));
        assert!(!is_closed(&e, t));
    }

    #[test]
    fn ending_today_is_not_closed() {
        let t = today();
        let e = event(1, t - Duration::days(3), t);
        assert!(!is_closed(&e, t));
    }

    #[test]
    fn ended_yesterday_is_closed() {
        let t = today();
        let e = event(1, t - Duration::days(3), t - Duration::days(1));
        assert!(is_closed(&e, t));
    }

    #[test]
    fn single_day_event_today_is_ongoing() {
        let t = today();
        let e = event(1, t, t);
        assert!(is_ongoing(&e, t));
        assert!(!is_closed(&e, t));
    }

    #[test]
    fn filter_keeps_collection_order() {
        let t = today();
        let events = vec![
            event(1, t + Duration::days(4), t + Duration::days(5)),
            event(2, t - Duration::days(4), t - Duration::days(3)),
            event(3, t + Duration::days(1), t + Duration::days(1)),
        ];
        let ids: Vec<_> = EventView::Upcoming.filter(&events, t).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn bucket_counts_leave_gaps() {
        let t = today();
        let events = vec![
            event(1, t + Duration::days(1), t + Duration::days(2)),
            event(2, t, t + Duration::days(5)),
            event(3, t - Duration::days(9), t - Duration::days(8)),
            event(4, t - Duration::days(1), t + Duration::days(1)),
        ];
        let buckets = EventBuckets::count(&events, t);
        assert_eq!(
            buckets,
            EventBuckets { upcoming: 1, ongoing: 1, closed: 1 }
        );
        assert!(buckets.upcoming + buckets.ongoing + buckets.closed < events.len());
    }
}

// src/routes/timeline.rs

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{CategoryCounts, EventCategory, round_dp};
use crate::state::AppState;

/// Number of days of synthetic history backing the timeline views.
const TIMELINE_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEvent {
    pub date: String,
    #[serde(rename = "type")]
    pub event_type: EventCategory,
    pub title: String,
    pub description: String,
    pub impact: f64,
}

#[derive(Serialize)]
pub struct TimelineSummary {
    pub total_events: usize,
    pub events_by_type: CategoryCounts,
    pub average_impact: f64,
    pub date_range: DateRange,
}

#[derive(Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Generate demo data for timeline visualization: one to four categorized
/// events per day over the trailing window, ordered by date.
fn generate_demo_timeline_data(rng: &mut impl Rng, days: i64) -> Vec<TimelineEvent> {
    let base_date = Utc::now() - Duration::days(days);
    let mut events = Vec::new();

    for day in 0..days {
        let date =
            (base_date + Duration::days(day)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let num_events = rng.random_range(1..=4);

        for _ in 0..num_events {
            let event_type = EventCategory::pick(rng);
            events.push(TimelineEvent {
                date: date.clone(),
                event_type,
                title: format!("{event_type} Event {day}"),
                description: format!(
                    "Sample {} event description",
                    event_type.as_str().to_lowercase()
                ),
                impact: round_dp(rng.random_range(0.0..1.0), 2),
            });
        }
    }

    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}

#[derive(Debug, Deserialize)]
pub struct TimelineEventsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_type: Option<String>,
}

/// GET /api/timeline/events — timeline events with optional filtering.
///
/// Date bounds are inclusive and compared lexicographically against the
/// RFC 3339 event dates, so a bare `YYYY-MM-DD` works as expected.
pub async fn get_timeline_events(
    State(state): State<AppState>,
    Query(params): Query<TimelineEventsParams>,
) -> Json<Vec<TimelineEvent>> {
    let mut rng = state.demo_rng();
    let mut events = generate_demo_timeline_data(&mut rng, TIMELINE_DAYS);

    if let Some(start) = &params.start_date {
        events.retain(|e| e.date.as_str() >= start.as_str());
    }
    if let Some(end) = &params.end_date {
        events.retain(|e| e.date.as_str() <= end.as_str());
    }
    if let Some(kind) = &params.event_type {
        events.retain(|e| e.event_type.as_str() == kind);
    }

    Json(events)
}

/// GET /api/timeline/summary — summary statistics for timeline events.
pub async fn get_timeline_summary(State(state): State<AppState>) -> Json<TimelineSummary> {
    let mut rng = state.demo_rng();
    let events = generate_demo_timeline_data(&mut rng, TIMELINE_DAYS);

    let events_by_type = CategoryCounts::tally(events.iter().map(|e| e.event_type));
    let average_impact = if events.is_empty() {
        0.0
    } else {
        round_dp(
            events.iter().map(|e| e.impact).sum::<f64>() / events.len() as f64,
            2,
        )
    };
    // Events are sorted by date, so the range is first/last.
    let (start, end) = match (events.first(), events.last()) {
        (Some(first), Some(last)) => (first.date.clone(), last.date.clone()),
        _ => (String::new(), String::new()),
    };

    Json(TimelineSummary {
        total_events: events.len(),
        events_by_type,
        average_impact,
        date_range: DateRange { start, end },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generator_event_counts_and_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let events = generate_demo_timeline_data(&mut rng, TIMELINE_DAYS);

        // Between 1 and 4 events per day.
        assert!(events.len() >= TIMELINE_DAYS as usize);
        assert!(events.len() <= 4 * TIMELINE_DAYS as usize);

        for pair in events.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn test_generator_impact_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        for event in generate_demo_timeline_data(&mut rng, TIMELINE_DAYS) {
            assert!((0.0..=1.0).contains(&event.impact), "impact {}", event.impact);
        }
    }

    #[test]
    fn test_generator_is_reproducible() {
        let a = generate_demo_timeline_data(&mut StdRng::seed_from_u64(3), TIMELINE_DAYS);
        let b = generate_demo_timeline_data(&mut StdRng::seed_from_u64(3), TIMELINE_DAYS);
        let titles_a: Vec<&str> = a.iter().map(|e| e.title.as_str()).collect();
        let titles_b: Vec<&str> = b.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles_a, titles_b);
    }

    #[test]
    fn test_titles_carry_category_and_day() {
        let mut rng = StdRng::seed_from_u64(4);
        let events = generate_demo_timeline_data(&mut rng, TIMELINE_DAYS);
        let first = &events[0];
        assert_eq!(
            first.title,
            format!("{} Event 0", first.event_type.as_str())
        );
    }
}

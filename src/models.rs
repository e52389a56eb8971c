//! Shared vocabulary for the demo-data generators.
//!
//! Every route group fabricates records tagged with one of four fixed event
//! categories and, where a direction is reported, one of three trends.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Political,
    Economic,
    Social,
    Environmental,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Political,
        EventCategory::Economic,
        EventCategory::Social,
        EventCategory::Environmental,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Political => "Political",
            EventCategory::Economic => "Economic",
            EventCategory::Social => "Social",
            EventCategory::Environmental => "Environmental",
        }
    }

    pub fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Increasing, Trend::Stable, Trend::Decreasing];

    pub fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Per-category tallies, serialized with the category names as keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    #[serde(rename = "Political")]
    pub political: usize,
    #[serde(rename = "Economic")]
    pub economic: usize,
    #[serde(rename = "Social")]
    pub social: usize,
    #[serde(rename = "Environmental")]
    pub environmental: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: EventCategory) {
        match category {
            EventCategory::Political => self.political += 1,
            EventCategory::Economic => self.economic += 1,
            EventCategory::Social => self.social += 1,
            EventCategory::Environmental => self.environmental += 1,
        }
    }

    pub fn tally(categories: impl IntoIterator<Item = EventCategory>) -> Self {
        let mut counts = Self::default();
        for category in categories {
            counts.record(category);
        }
        counts
    }
}

/// Round to `places` decimal places, matching what the dashboard displays.
pub(crate) fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

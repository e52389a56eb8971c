// src/routes/probability.rs

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};
use crate::models::{EventCategory, Trend, round_dp};
use crate::state::AppState;

/// Daily noise around the per-category baseline.
const NOISE_STD_DEV: f64 = 0.1;
const HISTORICAL_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize)]
pub struct ContributingFactor {
    pub name: String,
    pub impact: f64,
    pub trend: Trend,
}

#[derive(Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Serialize)]
pub struct ProbabilityAnalysis {
    pub category: String,
    pub timeframe: i64,
    pub dates: Vec<String>,
    pub probabilities: Vec<f64>,
    pub contributing_factors: Vec<Vec<ContributingFactor>>,
    pub overall_probability: f64,
    pub confidence_interval: ConfidenceInterval,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub probability: f64,
    pub actual_occurrence: bool,
}

/// Different event categories have different baseline probabilities.
fn category_baseline(category: &str) -> f64 {
    match category {
        "Political" => 0.4,
        "Economic" => 0.6,
        "Social" => 0.5,
        "Environmental" => 0.3,
        _ => 0.5,
    }
}

/// Generate demo probability data: a per-day series around the category
/// baseline plus contributing factors, a mean, and a one-standard-deviation
/// confidence interval clamped to [0, 1].
fn generate_demo_probability_data(
    rng: &mut impl Rng,
    category: &str,
    timeframe: i64,
) -> ProbabilityAnalysis {
    let baseline = category_baseline(category);
    let noise = Normal::new(0.0, NOISE_STD_DEV).expect("standard deviation is positive");

    let base_date = Utc::now();
    let mut dates = Vec::with_capacity(timeframe as usize);
    let mut probabilities = Vec::with_capacity(timeframe as usize);
    let mut factors = Vec::with_capacity(timeframe as usize);

    for day in 0..timeframe {
        let current_date = base_date + Duration::days(day);
        let probability = (baseline + noise.sample(rng)).clamp(0.0, 1.0);

        let num_factors = rng.random_range(2..=4);
        let current_factors = (0..num_factors)
            .map(|j| ContributingFactor {
                name: format!("Factor {}", j + 1),
                impact: round_dp(rng.random_range(0.1..0.4), 2),
                trend: Trend::pick(rng),
            })
            .collect();

        dates.push(current_date.to_rfc3339_opts(SecondsFormat::Secs, true));
        probabilities.push(round_dp(probability, 3));
        factors.push(current_factors);
    }

    let mean = probabilities.iter().sum::<f64>() / probabilities.len() as f64;
    let variance = probabilities
        .iter()
        .map(|p| (p - mean).powi(2))
        .sum::<f64>()
        / probabilities.len() as f64;
    let std_dev = variance.sqrt();

    ProbabilityAnalysis {
        category: category.to_string(),
        timeframe,
        dates,
        probabilities,
        overall_probability: round_dp(mean, 3),
        confidence_interval: ConfidenceInterval {
            lower: round_dp((mean - std_dev).max(0.0), 3),
            upper: round_dp((mean + std_dev).min(1.0), 3),
        },
        contributing_factors: factors,
    }
}

fn default_timeframe() -> i64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub category: String,
    #[serde(default = "default_timeframe")]
    pub timeframe: i64,
}

/// GET /api/probability/analyze — probability forecast for a category over a
/// timeframe of 1 to 365 days.
pub async fn analyze_probability(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<ProbabilityAnalysis>> {
    if !(1..=365).contains(&params.timeframe) {
        return Err(AppError::BadRequest(
            "Timeframe must be between 1 and 365 days".to_string(),
        ));
    }

    let mut rng = state.demo_rng();
    Ok(Json(generate_demo_probability_data(
        &mut rng,
        &params.category,
        params.timeframe,
    )))
}

/// GET /api/probability/categories — available event categories.
pub async fn get_categories() -> Json<Vec<&'static str>> {
    Json(EventCategory::ALL.iter().map(|c| c.as_str()).collect())
}

#[derive(Debug, Deserialize)]
pub struct HistoricalParams {
    pub category: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/probability/historical — a year of daily probability lookups with
/// simulated outcomes, filtered by the optional date bounds.
pub async fn get_historical_probabilities(
    State(state): State<AppState>,
    Query(params): Query<HistoricalParams>,
) -> Json<Vec<HistoricalPoint>> {
    tracing::debug!(category = %params.category, "generating historical probability series");

    let mut rng = state.demo_rng();
    let base_date = Utc::now() - Duration::days(HISTORICAL_DAYS);
    let mut data_points = Vec::new();

    for day in 0..HISTORICAL_DAYS {
        let date =
            (base_date + Duration::days(day)).to_rfc3339_opts(SecondsFormat::Secs, true);
        if let Some(start) = &params.start_date {
            if date.as_str() < start.as_str() {
                continue;
            }
        }
        if let Some(end) = &params.end_date {
            if date.as_str() > end.as_str() {
                continue;
            }
        }

        let probability = round_dp(rng.random_range(0.2..0.8), 3);
        data_points.push(HistoricalPoint {
            date,
            actual_occurrence: rng.random_bool(probability),
            probability,
        });
    }

    Json(data_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_series_length_matches_timeframe() {
        let mut rng = StdRng::seed_from_u64(1);
        for timeframe in [1, 30, 365] {
            let analysis = generate_demo_probability_data(&mut rng, "Economic", timeframe);
            assert_eq!(analysis.dates.len(), timeframe as usize);
            assert_eq!(analysis.probabilities.len(), timeframe as usize);
            assert_eq!(analysis.contributing_factors.len(), timeframe as usize);
        }
    }

    #[test]
    fn test_probabilities_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(2);
        for category in ["Political", "Economic", "Social", "Environmental", "Other"] {
            let analysis = generate_demo_probability_data(&mut rng, category, 90);
            for p in &analysis.probabilities {
                assert!((0.0..=1.0).contains(p), "probability {p}");
            }
            assert!((0.0..=1.0).contains(&analysis.confidence_interval.lower));
            assert!((0.0..=1.0).contains(&analysis.confidence_interval.upper));
            assert!(analysis.confidence_interval.lower <= analysis.confidence_interval.upper);
        }
    }

    #[test]
    fn test_overall_probability_is_rounded_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let analysis = generate_demo_probability_data(&mut rng, "Social", 60);
        let mean =
            analysis.probabilities.iter().sum::<f64>() / analysis.probabilities.len() as f64;
        assert_eq!(analysis.overall_probability, round_dp(mean, 3));
    }

    #[test]
    fn test_contributing_factor_shape() {
        let mut rng = StdRng::seed_from_u64(4);
        let analysis = generate_demo_probability_data(&mut rng, "Environmental", 30);
        for daily in &analysis.contributing_factors {
            assert!((2..=4).contains(&daily.len()));
            for factor in daily {
                assert!((0.1..=0.4).contains(&factor.impact), "impact {}", factor.impact);
                assert!(factor.name.starts_with("Factor "));
            }
        }
    }

    #[test]
    fn test_unknown_category_uses_default_baseline() {
        assert_eq!(category_baseline("Cryptozoology"), 0.5);
        assert_eq!(category_baseline("Environmental"), 0.3);
    }
}

// src/routes/narratives.rs

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};
use crate::models::round_dp;
use crate::state::AppState;

/// Cluster theme catalog. When more clusters are requested than there are
/// themes, the shuffled catalog is reused cyclically.
const THEMES: [&str; 8] = [
    "Technology Impact",
    "Global Politics",
    "Climate Change",
    "Economic Trends",
    "Social Movements",
    "Healthcare Innovation",
    "Education Reform",
    "Urban Development",
];

const TREND_THEMES: [&str; 5] = ["Technology", "Politics", "Environment", "Economy", "Society"];

const DEFAULT_CLUSTER_COUNT: usize = 5;

/// Spread of narratives around their cluster center.
const NARRATIVE_STD_DEV: f64 = 0.1;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Narrative {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sentiment: f64,
    pub coordinates: Point2D,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrativeCluster {
    pub id: String,
    pub theme: String,
    pub size: usize,
    pub center: Point2D,
    pub narratives: Vec<Narrative>,
    pub sentiment_score: f64,
    pub growth_rate: f64,
}

#[derive(Serialize)]
pub struct ClusterDetails {
    #[serde(flatten)]
    pub cluster: NarrativeCluster,
    pub temporal_evolution: Vec<EvolutionPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionPoint {
    pub date: String,
    pub size: i64,
    pub sentiment: f64,
}

#[derive(Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub strength: f64,
}

#[derive(Serialize)]
pub struct ThemeTrend {
    pub name: String,
    pub trend_data: Vec<TrendPoint>,
}

#[derive(Serialize)]
pub struct NarrativeTrends {
    pub timeframe: String,
    pub themes: Vec<ThemeTrend>,
}

/// Generate demo narrative cluster data: themed clusters with 2-D centers and
/// Gaussian-perturbed member narratives, all coordinates kept within [0, 1].
fn generate_demo_narrative_clusters(
    rng: &mut impl Rng,
    num_clusters: usize,
) -> Vec<NarrativeCluster> {
    let spread = Normal::new(0.0, NARRATIVE_STD_DEV).expect("standard deviation is positive");
    let mut themes = THEMES.to_vec();
    themes.shuffle(rng);

    (0..num_clusters)
        .map(|i| {
            let center = Point2D {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
            };

            let num_narratives = rng.random_range(5..=15);
            let narratives: Vec<Narrative> = (0..num_narratives)
                .map(|j| Narrative {
                    id: format!("narrative_{i}_{j}"),
                    title: format!("Narrative {}", j + 1),
                    summary: format!(
                        "Sample narrative summary for cluster {}, narrative {}",
                        i + 1,
                        j + 1
                    ),
                    sentiment: rng.random_range(-1.0..1.0),
                    coordinates: Point2D {
                        x: (center.x + spread.sample(rng)).clamp(0.0, 1.0),
                        y: (center.y + spread.sample(rng)).clamp(0.0, 1.0),
                    },
                })
                .collect();

            NarrativeCluster {
                id: format!("cluster_{i}"),
                theme: themes[i % themes.len()].to_string(),
                size: narratives.len(),
                center,
                narratives,
                sentiment_score: round_dp(rng.random_range(-1.0..1.0), 2),
                growth_rate: round_dp(rng.random_range(-0.5..0.5), 2),
            }
        })
        .collect()
}

fn default_min_size() -> i64 {
    5
}

fn default_max_clusters() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ClustersParams {
    #[serde(default = "default_min_size")]
    pub min_size: i64,
    #[serde(default = "default_max_clusters")]
    pub max_clusters: i64,
}

/// GET /api/narratives/clusters — narrative clusters with their data points.
///
/// `min_size` is validated but not applied as a filter; the generated
/// clusters always hold at least 5 narratives anyway.
pub async fn get_narrative_clusters(
    State(state): State<AppState>,
    Query(params): Query<ClustersParams>,
) -> Result<Json<Vec<NarrativeCluster>>> {
    if params.min_size < 1 {
        return Err(AppError::BadRequest(
            "Minimum cluster size must be at least 1".to_string(),
        ));
    }
    if !(1..=20).contains(&params.max_clusters) {
        return Err(AppError::BadRequest(
            "Number of clusters must be between 1 and 20".to_string(),
        ));
    }

    let mut rng = state.demo_rng();
    Ok(Json(generate_demo_narrative_clusters(
        &mut rng,
        params.max_clusters as usize,
    )))
}

fn default_trends_timeframe() -> String {
    "7d".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TrendsParams {
    #[serde(default = "default_trends_timeframe")]
    pub timeframe: String,
}

/// GET /api/narratives/trends — per-theme strength series over 7d/30d/90d.
/// Unknown timeframes fall back to 7 days.
pub async fn get_narrative_trends(
    State(state): State<AppState>,
    Query(params): Query<TrendsParams>,
) -> Json<NarrativeTrends> {
    let days: i64 = match params.timeframe.as_str() {
        "30d" => 30,
        "90d" => 90,
        _ => 7,
    };

    let mut rng = state.demo_rng();
    let base_date = Utc::now() - Duration::days(days);

    let themes = TREND_THEMES
        .iter()
        .map(|theme| ThemeTrend {
            name: theme.to_string(),
            trend_data: (0..days)
                .map(|day| {
                    let base_value = rng.random_range(0.3..0.7);
                    let jitter = rng.random_range(-0.1..0.1);
                    TrendPoint {
                        date: (base_date + Duration::days(day))
                            .to_rfc3339_opts(SecondsFormat::Secs, true),
                        strength: round_dp(base_value + jitter, 2),
                    }
                })
                .collect(),
        })
        .collect();

    Json(NarrativeTrends {
        timeframe: params.timeframe,
        themes,
    })
}

/// GET /api/narratives/cluster/{cluster_id} — details for one cluster.
///
/// The cluster set is regenerated on every call, so only the default ids
/// (`cluster_0` .. `cluster_4`) resolve; anything else is a 404.
pub async fn get_cluster_details(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
) -> Result<Json<ClusterDetails>> {
    let mut rng = state.demo_rng();
    let clusters = generate_demo_narrative_clusters(&mut rng, DEFAULT_CLUSTER_COUNT);

    let cluster = clusters
        .into_iter()
        .find(|c| c.id == cluster_id)
        .ok_or_else(|| AppError::NotFound(format!("Cluster {cluster_id} not found")))?;

    let temporal_evolution = (0..30)
        .map(|days_ago| EvolutionPoint {
            date: (Utc::now() - Duration::days(days_ago))
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            size: rng.random_range(5..=20),
            sentiment: round_dp(rng.random_range(-1.0..1.0), 2),
        })
        .collect();

    Ok(Json(ClusterDetails {
        cluster,
        temporal_evolution,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_requested_cluster_count_is_honored() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [1, 5, 20] {
            let clusters = generate_demo_narrative_clusters(&mut rng, count);
            assert_eq!(clusters.len(), count);
        }
    }

    #[test]
    fn test_theme_catalog_cycles_past_eight() {
        // 20 clusters from an 8-entry catalog must still all get a theme.
        let mut rng = StdRng::seed_from_u64(2);
        let clusters = generate_demo_narrative_clusters(&mut rng, 20);
        for cluster in &clusters {
            assert!(THEMES.contains(&cluster.theme.as_str()));
        }
    }

    #[test]
    fn test_cluster_ids_are_index_based() {
        let mut rng = StdRng::seed_from_u64(3);
        let clusters = generate_demo_narrative_clusters(&mut rng, 4);
        let ids: Vec<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cluster_0", "cluster_1", "cluster_2", "cluster_3"]);
    }

    #[test]
    fn test_narrative_coordinates_and_size() {
        let mut rng = StdRng::seed_from_u64(4);
        for cluster in generate_demo_narrative_clusters(&mut rng, 10) {
            assert_eq!(cluster.size, cluster.narratives.len());
            assert!((5..=15).contains(&cluster.size));
            assert!((0.0..=1.0).contains(&cluster.center.x));
            assert!((0.0..=1.0).contains(&cluster.center.y));
            for narrative in &cluster.narratives {
                assert!((0.0..=1.0).contains(&narrative.coordinates.x));
                assert!((0.0..=1.0).contains(&narrative.coordinates.y));
                assert!((-1.0..=1.0).contains(&narrative.sentiment));
            }
            assert!((-1.0..=1.0).contains(&cluster.sentiment_score));
            assert!((-0.5..=0.5).contains(&cluster.growth_rate));
        }
    }

    #[test]
    fn test_cluster_details_flatten_keeps_base_fields() {
        let mut rng = StdRng::seed_from_u64(5);
        let cluster = generate_demo_narrative_clusters(&mut rng, 1).remove(0);
        let details = ClusterDetails {
            cluster,
            temporal_evolution: vec![EvolutionPoint {
                date: "2026-01-01T00:00:00Z".to_string(),
                size: 7,
                sentiment: 0.25,
            }],
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], "cluster_0");
        assert_eq!(json["temporal_evolution"][0]["size"], 7);
    }
}

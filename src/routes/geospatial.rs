// src/routes/geospatial.rs

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};
use crate::models::{CategoryCounts, EventCategory, Trend, round_dp};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

pub struct RegionInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub center: LatLng,
}

/// Fixed continental buckets for demo data.
pub const REGIONS: [RegionInfo; 6] = [
    RegionInfo {
        code: "NA",
        name: "North America",
        center: LatLng { lat: 54.5260, lng: -105.2551 },
    },
    RegionInfo {
        code: "SA",
        name: "South America",
        center: LatLng { lat: -8.7832, lng: -55.4915 },
    },
    RegionInfo {
        code: "EU",
        name: "Europe",
        center: LatLng { lat: 54.5260, lng: 15.2551 },
    },
    RegionInfo {
        code: "AF",
        name: "Africa",
        center: LatLng { lat: -8.7832, lng: 34.5085 },
    },
    RegionInfo {
        code: "AS",
        name: "Asia",
        center: LatLng { lat: 34.0479, lng: 100.6197 },
    },
    RegionInfo {
        code: "OC",
        name: "Oceania",
        center: LatLng { lat: -22.7359, lng: 140.0188 },
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct GeoPoint {
    pub id: String,
    pub region: String,
    pub location: LatLng,
    pub category: EventCategory,
    pub intensity: f64,
    pub timestamp: String,
    pub details: PointDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointDetails {
    pub title: String,
    pub description: String,
    pub impact_radius: i64,
}

#[derive(Serialize)]
pub struct HeatmapPoint {
    pub location: LatLng,
    pub weight: f64,
}

#[derive(Serialize)]
pub struct RegionSummary {
    pub code: &'static str,
    pub name: &'static str,
    pub center: LatLng,
    pub statistics: RegionStatistics,
}

#[derive(Serialize)]
pub struct RegionStatistics {
    pub total_events: i64,
    pub average_intensity: f64,
    pub trend: Trend,
    pub dominant_category: EventCategory,
}

#[derive(Serialize)]
pub struct SpatialCluster {
    pub center: LatLng,
    pub radius: f64,
    pub points: Vec<GeoPoint>,
    pub statistics: SpatialClusterStatistics,
}

#[derive(Serialize)]
pub struct SpatialClusterStatistics {
    pub point_count: usize,
    pub average_intensity: f64,
    pub categories: CategoryCounts,
}

/// Generate demo geospatial data: 5 to 15 points per region, uniformly
/// offset from the region center.
fn generate_demo_geospatial_data(rng: &mut impl Rng) -> Vec<GeoPoint> {
    let now = Utc::now();
    let mut data_points = Vec::new();

    for region in &REGIONS {
        let num_points = rng.random_range(5..=15);

        for k in 0..num_points {
            let category = EventCategory::pick(rng);
            data_points.push(GeoPoint {
                id: format!("point_{}_{k}", region.code),
                region: region.name.to_string(),
                location: LatLng {
                    lat: region.center.lat + rng.random_range(-10.0..10.0),
                    lng: region.center.lng + rng.random_range(-10.0..10.0),
                },
                category,
                intensity: round_dp(rng.random_range(0.1..1.0), 2),
                timestamp: (now - Duration::days(rng.random_range(0..=30)))
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                details: PointDetails {
                    title: format!("{category} Event in {}", region.name),
                    description: format!("Sample event description for {}", region.name),
                    impact_radius: rng.random_range(50..=200),
                },
            });
        }
    }

    data_points
}

#[derive(Debug, Deserialize)]
pub struct PointsParams {
    pub region: Option<String>,
    pub category: Option<String>,
    pub min_intensity: Option<f64>,
}

/// GET /api/geospatial/points — geospatial data points with optional
/// filtering. `region` matches the full region name.
pub async fn get_geospatial_points(
    State(state): State<AppState>,
    Query(params): Query<PointsParams>,
) -> Json<Vec<GeoPoint>> {
    let mut rng = state.demo_rng();
    let mut points = generate_demo_geospatial_data(&mut rng);

    if let Some(region) = &params.region {
        points.retain(|p| &p.region == region);
    }
    if let Some(category) = &params.category {
        points.retain(|p| p.category.as_str() == category);
    }
    if let Some(min_intensity) = params.min_intensity {
        points.retain(|p| p.intensity >= min_intensity);
    }

    Json(points)
}

/// GET /api/geospatial/heatmap — location/weight pairs for the heatmap layer.
pub async fn get_heatmap_data(State(state): State<AppState>) -> Json<Vec<HeatmapPoint>> {
    let mut rng = state.demo_rng();
    let heatmap_points = generate_demo_geospatial_data(&mut rng)
        .into_iter()
        .map(|p| HeatmapPoint {
            location: p.location,
            weight: p.intensity,
        })
        .collect();

    Json(heatmap_points)
}

/// GET /api/geospatial/regions — the six fixed regions with fabricated
/// statistics.
pub async fn get_regions(State(state): State<AppState>) -> Json<Vec<RegionSummary>> {
    let mut rng = state.demo_rng();
    let regions_data = REGIONS
        .iter()
        .map(|region| RegionSummary {
            code: region.code,
            name: region.name,
            center: region.center,
            statistics: RegionStatistics {
                total_events: rng.random_range(50..=200),
                average_intensity: round_dp(rng.random_range(0.3..0.8), 2),
                trend: Trend::pick(&mut rng),
                dominant_category: EventCategory::pick(&mut rng),
            },
        })
        .collect();

    Json(regions_data)
}

fn default_min_points() -> usize {
    3
}

fn default_max_radius() -> f64 {
    1000.0
}

#[derive(Debug, Deserialize)]
pub struct SpatialClustersParams {
    #[serde(default = "default_min_points")]
    pub min_points: usize,
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,
}

/// GET /api/geospatial/clusters — naive clustering: points grouped by their
/// fixed region, reported with per-category counts and mean intensity.
pub async fn get_spatial_clusters(
    State(state): State<AppState>,
    Query(params): Query<SpatialClustersParams>,
) -> Result<Json<Vec<SpatialCluster>>> {
    // NaN or infinite values parse as f64 but make the radius range
    // unsampleable.
    if !params.max_radius.is_finite() {
        return Err(AppError::BadRequest(
            "max_radius must be a finite number".to_string(),
        ));
    }

    let mut rng = state.demo_rng();
    let points = generate_demo_geospatial_data(&mut rng);
    let mut clusters = Vec::new();

    for region in &REGIONS {
        let region_points: Vec<GeoPoint> = points
            .iter()
            .filter(|p| p.region == region.name)
            .cloned()
            .collect();

        if region_points.len() < params.min_points {
            continue;
        }

        // Bounds ordered so a max_radius below 100 still yields a valid range.
        let (lo, hi) = if params.max_radius >= 100.0 {
            (100.0, params.max_radius)
        } else {
            (params.max_radius, 100.0)
        };

        let average_intensity = round_dp(
            region_points.iter().map(|p| p.intensity).sum::<f64>() / region_points.len() as f64,
            2,
        );
        let categories = CategoryCounts::tally(region_points.iter().map(|p| p.category));

        clusters.push(SpatialCluster {
            center: region.center,
            radius: rng.random_range(lo..=hi),
            statistics: SpatialClusterStatistics {
                point_count: region_points.len(),
                average_intensity,
                categories,
            },
            points: region_points,
        });
    }

    Ok(Json(clusters))
}

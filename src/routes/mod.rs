pub mod geospatial;
pub mod health;
pub mod narratives;
pub mod probability;
pub mod timeline;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Assemble the full API surface. Layers (trace, CORS) are applied in main.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/timeline/events", get(timeline::get_timeline_events))
        .route("/api/timeline/summary", get(timeline::get_timeline_summary))
        .route("/api/probability/analyze", get(probability::analyze_probability))
        .route("/api/probability/categories", get(probability::get_categories))
        .route(
            "/api/probability/historical",
            get(probability::get_historical_probabilities),
        )
        .route("/api/narratives/clusters", get(narratives::get_narrative_clusters))
        .route("/api/narratives/trends", get(narratives::get_narrative_trends))
        .route(
            "/api/narratives/cluster/{cluster_id}",
            get(narratives::get_cluster_details),
        )
        .route("/api/geospatial/points", get(geospatial::get_geospatial_points))
        .route("/api/geospatial/heatmap", get(geospatial::get_heatmap_data))
        .route("/api/geospatial/regions", get(geospatial::get_regions))
        .route("/api/geospatial/clusters", get(geospatial::get_spatial_clusters))
        .with_state(state)
}

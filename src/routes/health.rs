use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub components: HealthComponents,
}

#[derive(Serialize)]
pub struct HealthComponents {
    pub api: &'static str,
    pub timeline: &'static str,
    pub probability: &'static str,
    pub narratives: &'static str,
    pub geospatial: &'static str,
}

/// Root endpoint for API health check.
pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "online",
        service: "Looking Glass API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Per-component health check endpoint.
pub async fn health_check() -> Json<HealthStatus> {
    tracing::debug!("Health check endpoint called");
    Json(HealthStatus {
        status: "healthy",
        components: HealthComponents {
            api: "operational",
            timeline: "operational",
            probability: "operational",
            narratives: "operational",
            geospatial: "operational",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_status() {
        let response = root().await;
        assert_eq!(response.0.status, "online");
        assert_eq!(response.0.service, "Looking Glass API");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        assert_eq!(response.0.status, "healthy");
        assert_eq!(response.0.components.geospatial, "operational");
    }
}

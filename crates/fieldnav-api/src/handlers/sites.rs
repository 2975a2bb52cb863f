use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use fieldnav_core::error::FieldnavError;
use fieldnav_core::models::{JobSite, NewJobSite};
use fieldnav_geo::distance::to_point;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_sites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<JobSite>>>, ApiError> {
    let sites = state.dispatch.list_sites().await?;
    Ok(Json(ApiResponse::ok(sites)))
}

pub async fn create_site(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewJobSite>,
) -> Result<(StatusCode, Json<ApiResponse<JobSite>>), ApiError> {
    tracing::info!(name = %request.name, "Registering job site");

    let site = state.dispatch.register_site(request).await.map_err(|e| match e {
        FieldnavError::InvalidInput { .. } | FieldnavError::InvalidCoordinates { .. } => {
            ApiError::from(e).with_code("JOBSITE_001")
        }
        other => ApiError::from(other),
    })?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(site))))
}

/// Job sites as a GeoJSON FeatureCollection of points, one per geofence center
pub async fn sites_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let sites = state.dispatch.list_sites().await?;
    Ok(Json(sites_to_geojson(&sites)))
}

fn sites_to_geojson(sites: &[JobSite]) -> FeatureCollection {
    let features = sites
        .iter()
        .map(|site| {
            let center = to_point(&site.geofence.center);

            let mut properties = Map::new();
            properties.insert("name".to_string(), JsonValue::from(site.name.clone()));
            properties.insert("address".to_string(), JsonValue::from(site.address.clone()));
            properties.insert("geofence_id".to_string(), JsonValue::from(site.geofence.id.0));
            properties.insert("radius_m".to_string(), JsonValue::from(site.geofence.radius_m));

            Feature {
                geometry: Some(Geometry::new(Value::Point(vec![center.x(), center.y()]))),
                properties: Some(properties),
                id: Some(Id::String(site.id.to_string())),
                bbox: None,
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AvailabilityFilter, SearchFilters, VetSearchRequest};
use crate::services::coordinator::SearchCoordinator;

pub struct DirectoryState {
    pub config: Arc<AppConfig>,
    pub coordinator: SearchCoordinator,
}

impl DirectoryState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let coordinator = SearchCoordinator::new(&config);
        Self {
            config,
            coordinator,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VetSearchQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub specialization: Option<String>,
    pub emergency_only: Option<bool>,
    pub available_only: Option<bool>,
    pub min_rating: Option<f32>,
    pub max_fee: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VetSearchQuery {
    fn into_request(self) -> VetSearchRequest {
        let defaults = SearchFilters::default();

        let filters = SearchFilters {
            max_distance_km: self.max_distance_km.unwrap_or(defaults.max_distance_km),
            min_rating: self.min_rating.unwrap_or(defaults.min_rating),
            max_fee: self.max_fee.unwrap_or(defaults.max_fee),
            emergency_only: self.emergency_only.unwrap_or(false),
            availability: if self.available_only.unwrap_or(false) {
                AvailabilityFilter::Available
            } else {
                AvailabilityFilter::All
            },
            specialization: self.specialization,
        };

        VetSearchRequest {
            page: self.page,
            search: self.search,
            latitude: self.latitude,
            longitude: self.longitude,
            filters,
        }
    }
}

fn token_of(auth: &Option<TypedHeader<Authorization<Bearer>>>) -> Option<&str> {
    auth.as_ref().map(|header| header.token())
}

/// Supersede scope for the coordinator. Authenticated callers get their own
/// scope keyed by bearer token; anonymous callers share one.
fn scope_of(auth: &Option<TypedHeader<Authorization<Bearer>>>) -> &str {
    token_of(auth).unwrap_or("anonymous")
}

#[axum::debug_handler]
pub async fn search_veterinarians(
    State(state): State<Arc<DirectoryState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<VetSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let request = query.into_request();

    let response = state
        .coordinator
        .search(scope_of(&auth), request, token_of(&auth))
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    match response {
        Some(result) => Ok(Json(json!(result))),
        None => Err(AppError::Conflict(
            "Search superseded by a newer request".to_string(),
        )),
    }
}

#[axum::debug_handler]
pub async fn get_veterinarian(
    State(state): State<Arc<DirectoryState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(vet_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let profile = state
        .coordinator
        .service()
        .get_veterinarian(&vet_id, token_of(&auth))
        .await
        .map_err(|_| AppError::NotFound("Veterinarian not found".to_string()))?;

    Ok(Json(json!(profile)))
}

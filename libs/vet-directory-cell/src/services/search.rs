use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::{normalize_page, BackendClient, Page};

use crate::models::{
    AvailabilityFilter, RefinedSearchResponse, SearchFilters, VetSearchRequest,
    VeterinarianProfile,
};
use crate::services::geo::{haversine_km, UserLocation};
use crate::services::refine::refine;

/// Envelope keys the veterinarian endpoints are known to reply with.
const VET_LIST_KEYS: &[&str] = &["veterinarians"];

pub struct VetSearchService {
    backend: BackendClient,
}

impl VetSearchService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Full search: fetch one server-filtered page, attach distances where
    /// the caller's location allows, then run the client-side refinement.
    pub async fn search(
        &self,
        request: VetSearchRequest,
        auth_token: Option<&str>,
    ) -> Result<RefinedSearchResponse> {
        let filters = request.filters.clone().clamped();
        let location = UserLocation::from_parts(request.latitude, request.longitude);

        let page = match location {
            Some(location) => {
                self.find_nearby(location, &filters, auth_token).await?
            }
            None => self.list(&request, &filters, auth_token).await?,
        };

        let mut veterinarians = page.items;
        if let Some(location) = location {
            attach_distances(&mut veterinarians, location);
        }

        let refined = refine(veterinarians, filters.min_rating, filters.max_fee);

        Ok(RefinedSearchResponse {
            refined_count: refined.len(),
            total_upstream: page.total,
            page_size: page.page_size,
            veterinarians: refined,
        })
    }

    /// Paged directory listing, server-side filtered only.
    pub async fn list(
        &self,
        request: &VetSearchRequest,
        filters: &SearchFilters,
        auth_token: Option<&str>,
    ) -> Result<Page<VeterinarianProfile>> {
        let mut query_parts = Vec::new();

        if let Some(page) = request.page {
            query_parts.push(format!("page={}", page));
        }
        if let Some(ref search) = request.search {
            query_parts.push(format!("search={}", search));
        }
        if let Some(ref specialization) = filters.specialization {
            query_parts.push(format!("specialization={}", specialization));
        }
        if filters.emergency_only {
            query_parts.push("emergency_only=true".to_string());
        }
        if filters.availability == AvailabilityFilter::Available {
            query_parts.push("available_only=true".to_string());
        }

        let mut path = "/api/consultations/veterinarians/".to_string();
        if !query_parts.is_empty() {
            path.push('?');
            path.push_str(&query_parts.join("&"));
        }

        debug!("Listing veterinarians: {}", path);
        let body: Value = self
            .backend
            .request(Method::GET, &path, auth_token, None)
            .await?;

        Ok(normalize_page(body, VET_LIST_KEYS))
    }

    /// Location-constrained search within the given radius.
    pub async fn find_nearby(
        &self,
        location: UserLocation,
        filters: &SearchFilters,
        auth_token: Option<&str>,
    ) -> Result<Page<VeterinarianProfile>> {
        let mut query_parts = vec![
            format!("latitude={}", location.latitude),
            format!("longitude={}", location.longitude),
            format!("radius={}", filters.max_distance_km as i64),
        ];

        if let Some(ref specialization) = filters.specialization {
            query_parts.push(format!("specialization={}", specialization));
        }
        if filters.emergency_only {
            query_parts.push("emergency_only=true".to_string());
        }

        let path = format!(
            "/api/consultations/veterinarians/nearby/?{}",
            query_parts.join("&")
        );

        debug!("Searching nearby veterinarians: {}", path);
        let body: Value = self
            .backend
            .request(Method::GET, &path, auth_token, None)
            .await?;

        Ok(normalize_page(body, VET_LIST_KEYS))
    }

    /// Single profile fetch.
    pub async fn get_veterinarian(
        &self,
        vet_id: &str,
        auth_token: Option<&str>,
    ) -> Result<VeterinarianProfile> {
        let path = format!("/api/consultations/veterinarians/{}/", vet_id);
        debug!("Fetching veterinarian profile: {}", vet_id);

        let profile: VeterinarianProfile = self
            .backend
            .request(Method::GET, &path, auth_token, None)
            .await?;

        Ok(profile)
    }
}

/// Fills in `distance_km` for profiles that carry coordinates but no
/// upstream-computed distance.
fn attach_distances(veterinarians: &mut [VeterinarianProfile], user: UserLocation) {
    for vet in veterinarians.iter_mut() {
        if vet.distance_km.is_none() {
            if let Some(coords) = vet.location() {
                vet.distance_km = Some(haversine_km(user, coords));
            }
        }
    }
}

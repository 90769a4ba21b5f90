use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Consultation delivery channel, each with its own fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationChannel {
    Chat,
    Voice,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeterinarianProfile {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub is_verified: bool,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_service_radius")]
    pub service_radius_km: i32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub consultation_fee_chat: Option<f64>,
    #[serde(default)]
    pub consultation_fee_voice: Option<f64>,
    #[serde(default)]
    pub consultation_fee_video: Option<f64>,
    #[serde(default)]
    pub emergency_fee_chat: Option<f64>,
    #[serde(default)]
    pub emergency_fee_voice: Option<f64>,
    #[serde(default)]
    pub emergency_fee_video: Option<f64>,
    #[serde(default)]
    pub average_rating: f32,
    #[serde(default)]
    pub total_consultations: i32,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_emergency_available: bool,
    /// Distance from the searching user, when their location is known.
    /// Populated upstream by the nearby endpoint or computed gateway-side.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

fn default_service_radius() -> i32 {
    50
}

impl VeterinarianProfile {
    pub fn fee_for(&self, channel: ConsultationChannel) -> Option<f64> {
        match channel {
            ConsultationChannel::Chat => self.consultation_fee_chat,
            ConsultationChannel::Voice => self.consultation_fee_voice,
            ConsultationChannel::Video => self.consultation_fee_video,
        }
    }

    pub fn emergency_fee_for(&self, channel: ConsultationChannel) -> Option<f64> {
        match channel {
            ConsultationChannel::Chat => self.emergency_fee_chat,
            ConsultationChannel::Voice => self.emergency_fee_voice,
            ConsultationChannel::Video => self.emergency_fee_video,
        }
    }

    /// Cheapest defined, nonzero channel fee. A profile with no usable fee
    /// reports 0 and therefore passes any fee ceiling.
    pub fn min_defined_fee(&self) -> f64 {
        let min = [
            self.consultation_fee_chat,
            self.consultation_fee_voice,
            self.consultation_fee_video,
        ]
        .into_iter()
        .flatten()
        .filter(|fee| *fee > 0.0)
        .fold(f64::INFINITY, f64::min);

        if min.is_finite() {
            min
        } else {
            0.0
        }
    }

    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
}

/// Client-held search filters. Numeric fields are clamped into the bounds the
/// interface promises before any query or refinement runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilters {
    pub max_distance_km: f64,
    pub min_rating: f32,
    pub max_fee: f64,
    pub emergency_only: bool,
    pub availability: AvailabilityFilter,
    pub specialization: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            max_distance_km: 50.0,
            min_rating: 0.0,
            max_fee: 2000.0,
            emergency_only: false,
            availability: AvailabilityFilter::All,
            specialization: None,
        }
    }
}

impl SearchFilters {
    pub const DISTANCE_BOUNDS_KM: (f64, f64) = (5.0, 200.0);
    pub const RATING_BOUNDS: (f32, f32) = (0.0, 5.0);
    pub const FEE_BOUNDS: (f64, f64) = (100.0, 2000.0);

    pub fn clamped(mut self) -> Self {
        let (dist_min, dist_max) = Self::DISTANCE_BOUNDS_KM;
        let (rating_min, rating_max) = Self::RATING_BOUNDS;
        let (fee_min, fee_max) = Self::FEE_BOUNDS;

        self.max_distance_km = self.max_distance_km.clamp(dist_min, dist_max);
        self.min_rating = self.min_rating.clamp(rating_min, rating_max);
        self.max_fee = self.max_fee.clamp(fee_min, fee_max);
        self
    }
}

/// One search as issued by a consumer: where to look, plus the filters to
/// refine the fetched page with.
#[derive(Debug, Clone)]
pub struct VetSearchRequest {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub filters: SearchFilters,
}

/// Search result after refinement, reporting both the upstream total and the
/// refined count so the page-scoped narrowing stays visible to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RefinedSearchResponse {
    pub veterinarians: Vec<VeterinarianProfile>,
    pub total_upstream: u64,
    pub refined_count: usize,
    pub page_size: Option<u64>,
}

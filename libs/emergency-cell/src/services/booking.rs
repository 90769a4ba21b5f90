use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_gateway::BackendClient;
use vet_directory_cell::models::{ConsultationChannel, VeterinarianProfile};
use vet_directory_cell::VetSearchService;

use crate::models::{
    BookingConfirmation, EmergencyBookingRequest, EmergencyCharge, EmergencyError,
};
use crate::services::gate::ConfirmationGate;

/// Fallback when a veterinarian has no explicit emergency fee for a channel.
/// Mirrors the upstream profile default; kept as a single named policy value.
pub const DEFAULT_EMERGENCY_FEE_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Deserialize)]
struct BookConsultationResponse {
    id: Uuid,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "scheduled".to_string()
}

pub struct EmergencyBookingService {
    backend: BackendClient,
    directory: VetSearchService,
}

impl EmergencyBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            directory: VetSearchService::new(config),
        }
    }

    /// Surcharged price for one channel: the profile's emergency fee when
    /// defined, otherwise base times the default multiplier. The surcharge is
    /// clamped non-negative since the emergency >= base invariant is advisory.
    pub fn quote(
        &self,
        profile: &VeterinarianProfile,
        channel: ConsultationChannel,
    ) -> EmergencyCharge {
        let base_fee = profile.fee_for(channel).unwrap_or(0.0);
        let emergency_fee = profile
            .emergency_fee_for(channel)
            .unwrap_or(base_fee * DEFAULT_EMERGENCY_FEE_MULTIPLIER);
        let surcharge = (emergency_fee - base_fee).max(0.0);

        EmergencyCharge {
            base_fee,
            surcharge,
            total_fee: base_fee + surcharge,
        }
    }

    /// Books an emergency consultation upstream. Refused outright unless both
    /// gate acknowledgements arrived with the request.
    pub async fn book(
        &self,
        request: EmergencyBookingRequest,
        auth_token: &str,
    ) -> Result<BookingConfirmation, EmergencyError> {
        let mut gate = ConfirmationGate::new();
        gate.acknowledge_genuine_emergency(request.genuine_emergency_acknowledged);
        gate.acknowledge_surcharge(request.surcharge_acknowledged);
        if !gate.is_ready() {
            return Err(EmergencyError::AcknowledgementRequired);
        }

        debug!(
            "Booking emergency consultation with veterinarian {}",
            request.veterinarian_id
        );

        let profile = self
            .directory
            .get_veterinarian(&request.veterinarian_id.to_string(), Some(auth_token))
            .await
            .map_err(|_| EmergencyError::VeterinarianNotFound)?;

        if !profile.is_emergency_available {
            return Err(EmergencyError::VeterinarianUnavailable);
        }

        let charge = self.quote(&profile, request.channel);

        let body = json!({
            "veterinarian_id": request.veterinarian_id,
            "cattle_id": request.cattle_id,
            "consultation_type": request.channel,
            "description": request.description,
            "is_emergency": true,
            "priority": request.priority,
        });

        let response: BookConsultationResponse = self
            .backend
            .request(
                Method::POST,
                "/api/consultations/book/",
                Some(auth_token),
                Some(body),
            )
            .await
            .map_err(|e| EmergencyError::Upstream(e.to_string()))?;

        info!(
            "Emergency consultation {} booked (total fee {:.2})",
            response.id, charge.total_fee
        );

        Ok(BookingConfirmation {
            consultation_id: response.id,
            status: response.status,
            charge,
        })
    }
}

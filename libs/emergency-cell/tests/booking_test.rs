use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use emergency_cell::models::{EmergencyBookingRequest, EmergencyError, EmergencyPriority};
use emergency_cell::services::booking::EmergencyBookingService;
use shared_config::AppConfig;
use vet_directory_cell::models::ConsultationChannel;

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        backend_api_url: base_url.to_string(),
        backend_api_key: String::new(),
        session_file: None,
    }
}

fn booking_request(vet_id: Uuid, genuine: bool, surcharge: bool) -> EmergencyBookingRequest {
    EmergencyBookingRequest {
        veterinarian_id: vet_id,
        cattle_id: Uuid::new_v4(),
        channel: ConsultationChannel::Video,
        description: "cow collapsed in the field".to_string(),
        priority: EmergencyPriority::Critical,
        genuine_emergency_acknowledged: genuine,
        surcharge_acknowledged: surcharge,
    }
}

fn vet_profile_json(vet_id: Uuid, emergency_available: bool) -> serde_json::Value {
    json!({
        "id": vet_id,
        "name": "Dr. Kulkarni",
        "license_number": "VET-9001",
        "is_verified": true,
        "consultation_fee_video": 200.0,
        "is_available": true,
        "is_emergency_available": emergency_available
    })
}

#[tokio::test]
async fn booking_without_both_acknowledgements_never_reaches_upstream() {
    let server = MockServer::start().await;
    let service = EmergencyBookingService::new(&test_config(&server.uri()));
    let vet_id = Uuid::new_v4();

    for (genuine, surcharge) in [(false, false), (true, false), (false, true)] {
        let result = service
            .book(booking_request(vet_id, genuine, surcharge), "token")
            .await;
        assert_matches!(result, Err(EmergencyError::AcknowledgementRequired));
    }

    // No mock was mounted, so any request would have errored differently;
    // received_requests proves nothing left the gateway at all.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn booking_applies_doubled_base_when_emergency_fee_missing() {
    let server = MockServer::start().await;
    let vet_id = Uuid::new_v4();
    let consultation_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/consultations/veterinarians/{}/", vet_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(vet_profile_json(vet_id, true)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/consultations/book/"))
        .and(body_partial_json(json!({
            "is_emergency": true,
            "consultation_type": "video"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": consultation_id,
            "status": "scheduled"
        })))
        .mount(&server)
        .await;

    let service = EmergencyBookingService::new(&test_config(&server.uri()));
    let confirmation = service
        .book(booking_request(vet_id, true, true), "token")
        .await
        .unwrap();

    assert_eq!(confirmation.consultation_id, consultation_id);
    assert_eq!(confirmation.charge.base_fee, 200.0);
    assert_eq!(confirmation.charge.surcharge, 200.0);
    assert_eq!(confirmation.charge.total_fee, 400.0);
}

#[tokio::test]
async fn booking_rejects_vets_that_refuse_emergencies() {
    let server = MockServer::start().await;
    let vet_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/consultations/veterinarians/{}/", vet_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(vet_profile_json(vet_id, false)))
        .mount(&server)
        .await;

    let service = EmergencyBookingService::new(&test_config(&server.uri()));
    let result = service.book(booking_request(vet_id, true, true), "token").await;

    assert_matches!(result, Err(EmergencyError::VeterinarianUnavailable));
}

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use consultation_cell::models::AddPatientNoteRequest;
use consultation_cell::ConsultationService;
use shared_config::AppConfig;

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        backend_api_url: base_url.to_string(),
        backend_api_key: String::new(),
        session_file: None,
    }
}

#[tokio::test]
async fn patient_roster_normalizes_keyed_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consultations/patients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patients": [
                {
                    "id": Uuid::new_v4(),
                    "owner_name": "Ravi",
                    "cattle_name": "Ganga",
                    "breed": "Gir"
                }
            ],
            "total_found": 1
        })))
        .mount(&server)
        .await;

    let service = ConsultationService::new(&test_config(&server.uri()));
    let page = service.get_my_patients("token").await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].cattle_name, "Ganga");
    assert!(!page.items[0].is_completed);
}

#[tokio::test]
async fn adding_a_note_posts_to_the_patient_resource() {
    let server = MockServer::start().await;
    let patient_id = Uuid::new_v4();
    let note_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/consultations/patients/{}/notes/", patient_id)))
        .and(body_partial_json(json!({"note": "responding to treatment"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": note_id,
            "note": "responding to treatment",
            "created_at": "2025-06-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let service = ConsultationService::new(&test_config(&server.uri()));
    let note = service
        .add_patient_note(
            &patient_id.to_string(),
            AddPatientNoteRequest {
                note: "responding to treatment".to_string(),
            },
            "token",
        )
        .await
        .unwrap();

    assert_eq!(note.id, note_id);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/consultations/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let service = ConsultationService::new(&test_config(&server.uri()));
    assert!(service.list(None, "token").await.is_err());
}

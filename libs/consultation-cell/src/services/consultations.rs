use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::{normalize_page, BackendClient, Page};

use crate::models::{AddPatientNoteRequest, ConsultationSummary, PatientNote, PatientRecord};

const CONSULTATION_LIST_KEYS: &[&str] = &["consultations"];
const PATIENT_LIST_KEYS: &[&str] = &["patients"];

pub struct ConsultationService {
    backend: BackendClient,
}

impl ConsultationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn list(
        &self,
        page: Option<u32>,
        auth_token: &str,
    ) -> Result<Page<ConsultationSummary>> {
        let path = match page {
            Some(page) => format!("/api/consultations/?page={}", page),
            None => "/api/consultations/".to_string(),
        };
        debug!("Listing consultations: {}", path);

        let body: Value = self
            .backend
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        Ok(normalize_page(body, CONSULTATION_LIST_KEYS))
    }

    pub async fn get_my_patients(&self, auth_token: &str) -> Result<Page<PatientRecord>> {
        debug!("Fetching patient roster");

        let body: Value = self
            .backend
            .request(
                Method::GET,
                "/api/consultations/patients/",
                Some(auth_token),
                None,
            )
            .await?;

        Ok(normalize_page(body, PATIENT_LIST_KEYS))
    }

    pub async fn get_patient_detail(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<PatientRecord> {
        let path = format!("/api/consultations/patients/{}/", patient_id);
        debug!("Fetching patient detail: {}", patient_id);

        let patient: PatientRecord = self
            .backend
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        Ok(patient)
    }

    pub async fn add_patient_note(
        &self,
        patient_id: &str,
        request: AddPatientNoteRequest,
        auth_token: &str,
    ) -> Result<PatientNote> {
        let path = format!("/api/consultations/patients/{}/notes/", patient_id);
        debug!("Adding note for patient {}", patient_id);

        let note: PatientNote = self
            .backend
            .request(
                Method::POST,
                &path,
                Some(auth_token),
                Some(json!({ "note": request.note })),
            )
            .await?;

        Ok(note)
    }

    pub async fn mark_patient_completed(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<PatientRecord> {
        let path = format!("/api/consultations/patients/{}/complete/", patient_id);
        debug!("Marking patient {} completed", patient_id);

        let patient: PatientRecord = self
            .backend
            .request(Method::POST, &path, Some(auth_token), None)
            .await?;

        Ok(patient)
    }
}

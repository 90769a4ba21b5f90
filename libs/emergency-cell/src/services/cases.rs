use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::{normalize_page, BackendClient, Page};

use crate::models::{CaseStatus, EmergencyCase};

const CASE_LIST_KEYS: &[&str] = &["cases", "consultations"];

pub struct EmergencyCaseService {
    backend: BackendClient,
}

impl EmergencyCaseService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Emergency cases visible to the caller, newest first upstream.
    pub async fn list_cases(&self, auth_token: &str) -> Result<Page<EmergencyCase>> {
        debug!("Listing emergency cases");

        let body: Value = self
            .backend
            .request(
                Method::GET,
                "/api/consultations/?priority=emergency",
                Some(auth_token),
                None,
            )
            .await?;

        Ok(normalize_page(body, CASE_LIST_KEYS))
    }

    /// Fetches one case. When the caller reports its last-known status, the
    /// fetched status is reconciled forward-only so an out-of-order read
    /// never walks a case backwards.
    pub async fn get_case(
        &self,
        case_id: &str,
        last_known_status: Option<CaseStatus>,
        auth_token: &str,
    ) -> Result<EmergencyCase> {
        let path = format!("/api/consultations/{}/", case_id);
        debug!("Fetching emergency case {}", case_id);

        let mut case: EmergencyCase = self
            .backend
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        if let Some(known) = last_known_status {
            case.status = known.reconcile(case.status);
        }

        Ok(case)
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{RefinedSearchResponse, VetSearchRequest};
use crate::services::search::VetSearchService;

/// Serializes the outcome of overlapping searches per client. Every issued
/// search takes a monotonically increasing ticket within its client scope; a
/// response whose ticket is no longer the latest for that scope is discarded
/// instead of overwriting a newer result. In-flight requests are never
/// cancelled, only their results dropped. Independent clients never supersede
/// each other.
pub struct SearchCoordinator {
    service: VetSearchService,
    latest: Mutex<HashMap<String, u64>>,
}

impl SearchCoordinator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            service: VetSearchService::new(config),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> &VetSearchService {
        &self.service
    }

    /// Runs a search under a fresh ticket for `scope`. Returns `None` when a
    /// later search was issued in the same scope while this one was in flight.
    pub async fn search(
        &self,
        scope: &str,
        request: VetSearchRequest,
        auth_token: Option<&str>,
    ) -> Result<Option<RefinedSearchResponse>> {
        let ticket = {
            let mut latest = self.latest.lock().unwrap();
            let entry = latest.entry(scope.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let response = self.service.search(request, auth_token).await?;

        let still_latest = {
            let latest = self.latest.lock().unwrap();
            latest.get(scope).copied() == Some(ticket)
        };

        if !still_latest {
            debug!(
                "Discarding superseded search response (scope {}, ticket {})",
                scope, ticket
            );
            return Ok(None);
        }

        Ok(Some(response))
    }
}

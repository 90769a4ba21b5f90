use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::{normalize_page, BackendClient, Page};

use crate::models::Notification;

const NOTIFICATION_LIST_KEYS: &[&str] = &["notifications"];

pub struct NotificationService {
    backend: BackendClient,
}

impl NotificationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn list(
        &self,
        unread_only: bool,
        auth_token: &str,
    ) -> Result<Page<Notification>> {
        let path = if unread_only {
            "/api/notifications/?unread=true"
        } else {
            "/api/notifications/"
        };
        debug!("Listing notifications: {}", path);

        let body: Value = self
            .backend
            .request(Method::GET, path, Some(auth_token), None)
            .await?;

        Ok(normalize_page(body, NOTIFICATION_LIST_KEYS))
    }

    pub async fn mark_as_read(
        &self,
        notification_id: &str,
        auth_token: &str,
    ) -> Result<Notification> {
        let path = format!("/api/notifications/{}/read/", notification_id);
        debug!("Marking notification {} read", notification_id);

        let notification: Notification = self
            .backend
            .request(Method::POST, &path, Some(auth_token), None)
            .await?;

        Ok(notification)
    }

    pub async fn mark_all_as_read(&self, auth_token: &str) -> Result<u64> {
        debug!("Marking all notifications read");

        let body: Value = self
            .backend
            .request(
                Method::POST,
                "/api/notifications/mark-all-read/",
                Some(auth_token),
                None,
            )
            .await?;

        Ok(body.get("updated").and_then(Value::as_u64).unwrap_or(0))
    }
}

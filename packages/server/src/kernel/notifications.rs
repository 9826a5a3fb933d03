//! Invite notice delivery.
//!
//! `WebhookNotificationService` POSTs notices to a mail relay; `NoopNotificationService`
//! only logs them and is used when no relay is configured.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::{BaseNotificationService, HouseInviteNotice};

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    template: &'static str,
    to: &'a str,
    subject: String,
    data: &'a HouseInviteNotice,
}

pub struct WebhookNotificationService {
    client: Client,
    url: String,
    token: Option<String>,
}

impl WebhookNotificationService {
    pub fn new(url: String, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
            token,
        }
    }
}

#[async_trait]
impl BaseNotificationService for WebhookNotificationService {
    async fn send_house_invite_notice(&self, notice: &HouseInviteNotice) -> Result<()> {
        let message = WebhookMessage {
            template: "user_added_to_house",
            to: &notice.to_email,
            subject: format!("You have been added to {}", notice.house_name),
            data: notice,
        };

        let mut request = self.client.post(&self.url).json(&message);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        info!("Sending house invite notice to: {}", notice.to_email);

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            error!("Invite notice webhook failed {}: {}", status, body);
            anyhow::bail!("Invite notice webhook error {}: {}", status, body);
        }

        Ok(())
    }
}

pub struct NoopNotificationService;

impl NoopNotificationService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNotificationService for NoopNotificationService {
    async fn send_house_invite_notice(&self, notice: &HouseInviteNotice) -> Result<()> {
        info!(
            to = %notice.to_email,
            house = %notice.house_name,
            "Invite notice not delivered (no webhook configured)"
        );
        Ok(())
    }
}

/// Pick the notification backend from configuration.
pub fn create_notification_service(
    webhook_url: Option<String>,
    webhook_token: Option<String>,
) -> Arc<dyn BaseNotificationService> {
    match webhook_url {
        Some(url) => {
            info!("Invite notices delivered via webhook");
            Arc::new(WebhookNotificationService::new(url, webhook_token))
        }
        None => {
            info!("Invite notice webhook not configured, notices will only be logged");
            Arc::new(NoopNotificationService::new())
        }
    }
}

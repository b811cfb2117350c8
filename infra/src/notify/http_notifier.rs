//! Notification dispatcher over the external delivery service's API.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use vf_core::services::verification::{NotificationChannel, NotificationDispatcher};
use vf_shared::config::notifier::NotifierConfig;

use crate::InfrastructureError;

/// Dispatch request body.
///
/// Rendering happens service-side: this client only names the template
/// and supplies the metadata the template interpolates.
#[derive(Debug, Serialize)]
struct DispatchRequest<'a> {
    channel: &'a str,
    recipient: &'a str,
    template: &'a str,
    metadata: &'a HashMap<String, String>,
}

/// [`NotificationDispatcher`] over the notification service's HTTP API.
#[derive(Clone)]
pub struct HttpNotifier {
    http: reqwest::Client,
    config: NotifierConfig,
}

impl HttpNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn dispatch(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        template_name: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<(), InfrastructureError> {
        let body = DispatchRequest {
            channel: channel.as_str(),
            recipient,
            template: template_name,
            metadata,
        };

        let response = self
            .http
            .post(format!("{}/notifications", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, template = template_name, "notification dispatch rejected");
            return Err(InfrastructureError::Notify(format!(
                "dispatch failed with status {status}"
            )));
        }

        debug!(template = template_name, channel = channel.as_str(), "notification dispatched");
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for HttpNotifier {
    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        template_name: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), String> {
        self.dispatch(channel, recipient, template_name, &metadata)
            .await
            .map_err(|e| e.to_string())
    }
}

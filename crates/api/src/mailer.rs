//! Outbound client for the invitation mail endpoint.
//!
//! Sending invitation email is delegated to an external HTTP service.
//! The service receives the invitation id and does its own lookup and
//! templating; this client only reports success or the service's error
//! message.

use rosteria_core::errors::{RosterError, RosterResult};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct MailErrorBody {
    error: String,
}

/// HTTP client for the invitation mail endpoint.
#[derive(Debug, Clone)]
pub struct InvitationMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl InvitationMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Asks the mail service to send the email for an invitation.
    ///
    /// A non-success response surfaces the service's own error message
    /// verbatim so operators can see what the mail service complained
    /// about.
    pub async fn send(&self, invitation_id: Uuid) -> RosterResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "invitation_id": invitation_id }))
            .send()
            .await
            .map_err(|e| {
                RosterError::ExternalService(format!("Mail service unreachable: {}", e))
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = match response.json::<MailErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Mail service returned status {}", status),
        };

        Err(RosterError::ExternalService(message))
    }
}

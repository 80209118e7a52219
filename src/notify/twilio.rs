use std::time::Duration;

use tracing::debug;

use crate::config::SEND_TIMEOUT_SECS;
use crate::error::{AppError, Result};

use super::MessageSender;

/// Client for the Twilio Messages REST API.
///
/// Posts form-encoded to `/2010-04-01/Accounts/{sid}/Messages.json` with
/// basic auth. Callers supply channel-qualified From/To addresses.
pub struct TwilioSender {
    client: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioSender {
    pub fn new(api_url: String, account_sid: String, auth_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_url, account_sid, auth_token })
    }
}

#[async_trait::async_trait]
impl MessageSender for TwilioSender {
    async fn send_message(&self, from: &str, to: &str, body: &str) -> Result<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url, self.account_sid
        );
        let params = [("From", from), ("To", to), ("Body", body)];

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Provider {
                status: status.as_u16(),
                detail: resp.text().await.unwrap_or_default(),
            });
        }

        let reply: serde_json::Value = resp.json().await?;
        let sid = reply.get("sid").and_then(|s| s.as_str()).unwrap_or("?");
        debug!("Provider accepted message, sid={sid}");

        Ok(())
    }
}

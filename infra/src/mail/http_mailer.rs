//! HTTP transactional email (Brevo-compatible API)
//!
//! Posts `{ sender, to, subject, textContent }` as JSON with an `api-key`
//! header. Any 2xx is success. 429 and 5xx responses, as well as transport
//! errors, are retried with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use eb_shared::config::MailConfig;
use eb_shared::mask_email;

use super::mailer::{Mailer, OutgoingMail};
use crate::InfrastructureError;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailAddress<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendEmailBody<'a> {
    pub sender: EmailAddress<'a>,
    pub to: Vec<EmailAddress<'a>>,
    pub subject: &'a str,
    pub text_content: &'a str,
}

/// Mailer backed by an HTTP email API
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

impl HttpMailer {
    /// Build from configuration
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - No API key configured
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| InfrastructureError::Config("mail api_key is not set".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        info!(
            endpoint = %config.endpoint,
            sender = %mask_email(&config.sender_email),
            "HTTP mailer initialized"
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        })
    }

    pub(crate) fn body<'a>(&'a self, mail: &'a OutgoingMail) -> SendEmailBody<'a> {
        SendEmailBody {
            sender: EmailAddress {
                email: &self.sender_email,
                name: Some(self.sender_name.as_str()).filter(|n| !n.is_empty()),
            },
            to: vec![EmailAddress {
                email: &mail.to_email,
                name: Some(mail.to_name.as_str()).filter(|n| !n.is_empty()),
            }],
            subject: &mail.subject,
            text_content: &mail.text,
        }
    }

    /// One POST; `Ok(None)` on success, `Ok(Some(status))` on a retryable status
    async fn attempt(&self, mail: &OutgoingMail) -> Result<Option<StatusCode>, InfrastructureError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(&self.body(mail))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(None);
        }
        if is_retryable(status) {
            return Ok(Some(status));
        }

        let body = response.text().await.unwrap_or_default();
        Err(InfrastructureError::Mail(format!(
            "send failed (status={}): {}",
            status.as_u16(),
            body
        )))
    }
}

pub(crate) fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), InfrastructureError> {
        let mut delay = INITIAL_RETRY_DELAY;
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                MAX_ATTEMPTS,
                mask_email(&mail.to_email)
            );

            let failure = match self.attempt(mail).await {
                Ok(None) => {
                    info!(
                        to = %mask_email(&mail.to_email),
                        subject = %mail.subject,
                        "Mail sent"
                    );
                    return Ok(());
                }
                Ok(Some(status)) => format!("status={}", status.as_u16()),
                Err(InfrastructureError::Http(e)) if e.is_timeout() || e.is_connect() => {
                    e.to_string()
                }
                Err(e) => return Err(e),
            };

            if attempts >= MAX_ATTEMPTS {
                return Err(InfrastructureError::Mail(format!(
                    "send failed after {} attempts: {}",
                    MAX_ATTEMPTS, failure
                )));
            }

            warn!("Mail send failed ({}), retrying after {:?}", failure, delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}

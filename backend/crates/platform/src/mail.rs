//! Transactional Mail
//!
//! Template-based mail delivery through the Brevo HTTP API
//! (`POST /v3/smtp/email`). Callers name a template and supply its
//! params; rendering happens on the provider side.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Mail provider configuration
#[derive(Clone)]
pub struct MailConfig {
    /// Provider base URL, e.g. `https://api.brevo.com`
    pub api_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Upper bound on a single send
    pub timeout: Duration,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One templated message to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to_email: String,
    pub to_name: String,
    pub template_id: i64,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Mail delivery timed out")]
    Timeout,
}

/// Notification collaborator
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Send with an upper bound on elapsed time
pub async fn send_with_timeout<M: Mailer + Sync>(
    mailer: &M,
    message: &MailMessage,
    timeout: Duration,
) -> Result<(), MailError> {
    match tokio::time::timeout(timeout, mailer.send(message)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout),
    }
}

// ============================================================================
// Brevo
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoRequest<'a> {
    sender: BrevoContact<'a>,
    to: [BrevoContact<'a>; 1],
    template_id: i64,
    params: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct BrevoContact<'a> {
    email: &'a str,
    name: &'a str,
}

/// Brevo transactional mail client
#[derive(Clone)]
pub struct BrevoMailer {
    client: reqwest::Client,
    config: Arc<MailConfig>,
}

impl BrevoMailer {
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/smtp/email", self.config.api_url.trim_end_matches('/'))
    }
}

impl Mailer for BrevoMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = BrevoRequest {
            sender: BrevoContact {
                email: &self.config.sender_email,
                name: &self.config.sender_name,
            },
            to: [BrevoContact {
                email: &message.to_email,
                name: &message.to_name,
            }],
            template_id: message.template_id,
            params: &message.params,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout
                } else {
                    MailError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            template_id = message.template_id,
            recipient = %message.to_email,
            "Transactional mail accepted"
        );

        Ok(())
    }
}

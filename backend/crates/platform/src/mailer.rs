//! Outbound Mail Infrastructure
//!
//! Thin client for an HTTP transactional-email API. Sends are
//! best-effort by design: callers log failures and continue, they never
//! fail a request because a notification could not be delivered.

use serde::Serialize;

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Send endpoint of the mail API
    pub api_url: String,
    /// Bearer token for the mail API
    pub api_key: String,
    /// From address for all outgoing mail
    pub from: String,
}

/// Error from a send attempt
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Mail API rejected the message with status {0}")]
    Rejected(u16),
}

#[derive(Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// HTTP mail API client
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a single plain-text message
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), MailError> {
        let payload = SendPayload {
            from: &self.config.from,
            to,
            subject,
            text,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = SendPayload {
            from: "noreply@example.com",
            to: "student@example.com",
            subject: "Welcome",
            text: "Thanks for reaching out.",
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from"], "noreply@example.com");
        assert_eq!(json["to"], "student@example.com");
        assert_eq!(json["subject"], "Welcome");
        assert_eq!(json["text"], "Thanks for reaching out.");
    }
}

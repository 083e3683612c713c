//! Contact Form Use Case
//!
//! Validates a submission and triggers two best-effort emails: a
//! notification to the team and an acknowledgment to the sender. Each
//! send is caught individually; mail failures are logged and never fail
//! the request.

use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::LmsConfig;
use crate::error::{LmsError, LmsResult};

const MAX_NAME_LEN: usize = 200;
const MAX_SUBJECT_LEN: usize = 300;
const MAX_MESSAGE_LEN: usize = 5_000;

/// Input DTO for a contact submission
#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactInput {
    /// Validate before any side effect
    pub fn validate(&self) -> LmsResult<()> {
        if self.name.trim().is_empty() || self.name.len() > MAX_NAME_LEN {
            return Err(LmsError::InvalidData("name".to_string()));
        }
        if !self.email.contains('@') || self.email.trim().is_empty() {
            return Err(LmsError::InvalidData("email".to_string()));
        }
        if self.subject.trim().is_empty() || self.subject.len() > MAX_SUBJECT_LEN {
            return Err(LmsError::InvalidData("subject".to_string()));
        }
        if self.message.trim().is_empty() || self.message.len() > MAX_MESSAGE_LEN {
            return Err(LmsError::InvalidData("message".to_string()));
        }
        Ok(())
    }
}

/// Contact form use case
pub struct ContactUseCase {
    mailer: Option<Arc<Mailer>>,
    config: Arc<LmsConfig>,
}

impl ContactUseCase {
    pub fn new(mailer: Option<Arc<Mailer>>, config: Arc<LmsConfig>) -> Self {
        Self { mailer, config }
    }

    pub async fn execute(&self, input: ContactInput) -> LmsResult<()> {
        input.validate()?;

        let Some(mailer) = &self.mailer else {
            tracing::warn!("Mailer not configured; contact submission logged only");
            tracing::info!(from = %input.email, subject = %input.subject, "Contact submission");
            return Ok(());
        };

        let notification = format!(
            "From: {} <{}>\n\n{}",
            input.name, input.email, input.message
        );

        if let Err(e) = mailer
            .send(&self.config.contact_team_email, &input.subject, &notification)
            .await
        {
            tracing::warn!(error = %e, "Failed to send contact notification");
        }

        if let Err(e) = mailer
            .send(
                &input.email,
                "We received your message",
                "Thanks for reaching out. We will get back to you shortly.",
            )
            .await
        {
            tracing::warn!(error = %e, "Failed to send contact acknowledgment");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ContactInput {
        ContactInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Question".to_string(),
            message: "When does the next cohort start?".to_string(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_fields() {
        for field in ["name", "email", "subject", "message"] {
            let mut input = valid_input();
            match field {
                "name" => input.name = "  ".to_string(),
                "email" => input.email = String::new(),
                "subject" => input.subject = String::new(),
                _ => input.message = "\n".to_string(),
            }
            let err = input.validate().unwrap_err();
            assert!(matches!(err, LmsError::InvalidData(_)), "field: {field}");
        }
    }

    #[test]
    fn test_rejects_oversized_message() {
        let mut input = valid_input();
        input.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rejects_address_without_at() {
        let mut input = valid_input();
        input.email = "not-an-address".to_string();
        assert!(input.validate().is_err());
    }
}

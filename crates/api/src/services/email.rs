//! Email delivery for account activation and password reset.
//!
//! Uses SMTP via lettre when configured. Without SMTP settings the mailer
//! logs the recipient and subject and drops the message, which keeps local
//! development free of mail infrastructure.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

#[derive(Clone)]
struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

/// Sends transactional email.
#[derive(Clone, Default)]
pub struct Mailer {
    smtp: Option<SmtpMailer>,
}

impl Mailer {
    /// Create a mailer from optional SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: Option<&EmailConfig>) -> Result<Self, SmtpError> {
        let Some(config) = config else {
            tracing::info!("SMTP not configured, outgoing email will be logged only");
            return Ok(Self::default());
        };

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            smtp: Some(SmtpMailer {
                transport,
                from_address: config.from_address.clone(),
            }),
        })
    }

    /// Whether messages actually leave the server.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    /// Send the account activation link after registration.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or delivered.
    pub async fn send_activation(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hi {username},\n\n\
             Please activate your Emporium account by opening the link below:\n\n\
             {link}\n\n\
             The link is valid for 7 days.\n"
        );
        self.send(to, "Activate your Emporium account", body).await
    }

    /// Send a password reset link.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or delivered.
    pub async fn send_password_reset(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hi {username},\n\n\
             Someone asked to reset the password of your Emporium account.\n\
             If it was you, open the link below to choose a new one:\n\n\
             {link}\n\n\
             The link is valid for 1 hour. If you did not ask for this, ignore this email.\n"
        );
        self.send(to, "Reset your Emporium password", body).await
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), EmailError> {
        let Some(smtp) = &self.smtp else {
            tracing::info!(to = %to, subject = %subject, "Email not sent (SMTP disabled)");
            return Ok(());
        };

        let email = Message::builder()
            .from(
                smtp.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(smtp.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        smtp.transport.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_mailer_drops_messages() {
        let mailer = Mailer::new(None).unwrap();
        assert!(!mailer.is_enabled());
        mailer
            .send_activation("shopper@example.com", "shopper", "http://localhost/activate/abc")
            .await
            .unwrap();
    }
}

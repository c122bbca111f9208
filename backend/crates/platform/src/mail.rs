//! Outbound Mail
//!
//! SMTP delivery through `lettre`. When no SMTP host is configured the
//! [`Mailer`] logs the message instead of sending it, which keeps local
//! development and CI free of mail infrastructure.

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Implicit-TLS SMTP port; every other port uses STARTTLS
const SMTPS_PORT: u16 = 465;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP server settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Mail configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// `None` disables delivery (messages are logged)
    pub smtp: Option<SmtpConfig>,
    /// `From:` header, e.g. `"Community <no-reply@example.com>"`
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp: None,
            from: "Community <no-reply@localhost>".to_string(),
        }
    }
}

impl MailConfig {
    /// Read `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `MAIL_FROM`
    pub fn from_env() -> Self {
        let smtp = std::env::var("SMTP_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .map(|host| SmtpConfig {
                host,
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                username: std::env::var("SMTP_USERNAME").ok(),
                password: std::env::var("SMTP_PASSWORD").ok(),
            });

        Self {
            smtp,
            from: std::env::var("MAIL_FROM").unwrap_or_else(|_| Self::default().from),
        }
    }
}

/// A rendered HTML mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Anything that can deliver an [`OutgoingMail`]
#[trait_variant::make(MailSender: Send)]
pub trait LocalMailSender {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// SMTP mailer
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.from.parse()?;

        let transport = match &config.smtp {
            Some(smtp) => {
                let builder = if smtp.port == SMTPS_PORT {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
                };
                let builder = builder.port(smtp.port);
                let builder = match (&smtp.username, &smtp.password) {
                    (Some(user), Some(pass)) => {
                        builder.credentials(Credentials::new(user.clone(), pass.clone()))
                    }
                    _ => builder,
                };
                Some(builder.build())
            }
            None => None,
        };

        Ok(Self { transport, from })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

impl MailSender for Mailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let Some(transport) = &self.transport else {
            tracing::info!(
                to = %mail.to,
                subject = %mail.subject,
                "SMTP not configured, mail not sent"
            );
            tracing::debug!(body = %mail.html, "Unsent mail body");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html)?;

        transport.send(message).await?;
        tracing::debug!(to = %mail.to, "Mail delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MailConfig, MailError, MailSender, Mailer, OutgoingMail};

    #[test]
    fn test_default_config_disables_delivery() {
        let mailer = Mailer::new(&MailConfig::default()).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn test_invalid_from_rejected() {
        let config = MailConfig {
            from: "not an address".to_string(),
            ..Default::default()
        };
        assert!(matches!(Mailer::new(&config), Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn test_disabled_mailer_accepts_mail() {
        let mailer = Mailer::new(&MailConfig::default()).unwrap();
        let result = mailer
            .send(OutgoingMail {
                to: "reader@example.com".into(),
                subject: "Hello".into(),
                html: "<p>Hi</p>".into(),
            })
            .await;
        assert!(result.is_ok());
    }
}

//! Mail dispatch capability and its SMTP backend

use async_trait::async_trait;

use crate::OutgoingEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("mail transport failed: {0}")]
    Transport(String),

    #[error("mail dispatch timed out")]
    Timeout,
}

/// Anything able to deliver an [`OutgoingEmail`].
///
/// The relay holds a single shared instance for the whole process.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

#[cfg(feature = "smtp")]
pub use smtp::{SmtpMailer, SmtpSettings};

#[cfg(feature = "smtp")]
mod smtp {
    use std::time::Duration;

    use async_trait::async_trait;
    use lettre::{
        AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::MultiPart,
        transport::smtp::authentication::Credentials,
    };

    use super::{MailError, MailSender};
    use crate::OutgoingEmail;

    #[derive(Debug, Clone)]
    pub struct SmtpSettings {
        pub host: String,
        pub port: u16,
        pub username: String,
        pub password: String,
        pub timeout: Duration,
    }

    /// Sends over an async SMTP connection, so dropping the send future
    /// (for example on a request timeout) abandons the delivery.
    #[derive(Clone)]
    pub struct SmtpMailer {
        mailer: AsyncSmtpTransport<Tokio1Executor>,
    }

    impl SmtpMailer {
        pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
            let mailer = if settings.username.is_empty() && settings.password.is_empty() {
                tracing::info!(
                    smtp_host = %settings.host,
                    smtp_port = settings.port,
                    "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
                );
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                    .port(settings.port)
                    .timeout(Some(settings.timeout))
                    .build()
            } else {
                if settings.password.is_empty() {
                    // Sends will fail authentication; surfaced per request, not at startup.
                    tracing::warn!(
                        smtp_username = %settings.username,
                        "SMTP password is empty"
                    );
                }

                tracing::info!(
                    smtp_host = %settings.host,
                    smtp_port = settings.port,
                    smtp_username = %settings.username,
                    "Email service initialized with authentication and TLS"
                );

                let creds = Credentials::new(settings.username.clone(), settings.password.clone());

                AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
                    .port(settings.port)
                    .credentials(creds)
                    .timeout(Some(settings.timeout))
                    .build()
            };

            Ok(Self { mailer })
        }
    }

    #[async_trait]
    impl MailSender for SmtpMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            let message = Message::builder()
                .from(
                    email
                        .from
                        .parse()
                        .map_err(|e: lettre::address::AddressError| {
                            MailError::Address(e.to_string())
                        })?,
                )
                .to(email
                    .to
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        MailError::Address(e.to_string())
                    })?)
                .subject(email.subject.clone())
                .multipart(MultiPart::alternative_plain_html(
                    email.plain.clone(),
                    email.html.clone(),
                ))
                .map_err(|e| MailError::Build(e.to_string()))?;

            self.mailer
                .send(message)
                .await
                .map_err(|e| MailError::Transport(e.to_string()))?;

            tracing::info!(to = %email.to, "Contact email sent");

            Ok(())
        }
    }

}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use mervolt::{
    AppState, Config,
    config::{EmailConfig, ObservabilityConfig, ServerConfig},
};
use mervolt_contact::{MailError, MailSender, OutgoingEmail};

/// Records every email instead of sending it; optionally fails each send.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());

        if self.fail {
            return Err(MailError::Transport("535 authentication failed".to_string()));
        }

        Ok(())
    }
}

/// Never completes a send.
#[derive(Clone, Default)]
pub struct HangingMailer;

#[async_trait]
impl MailSender for HangingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        email: EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "site@mervolt.test".to_string(),
            contact_address: "mervoltelektrik@gmail.com".to_string(),
            timeout_secs: 1,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(mailer: impl MailSender + 'static) -> Router {
    mervolt::app(AppState {
        config: test_config(),
        mailer: Arc::new(mailer),
    })
}

//! Completion notification
//!
//! `compose` turns a finished report into a subject and body; a `Mailer`
//! delivers it. Delivery failures never fail the run: the coordinator logs
//! them and moves on.

use crate::config::EmailConfig;
use crate::output::report::CrawlReport;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Errors raised while building or delivering a notification
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A composed notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Builds the completion message for a report
///
/// # Arguments
///
/// * `report` - The finished report
/// * `output` - Where the exported report can be found
pub fn compose(report: &CrawlReport, output: &str) -> Notification {
    let count = report.len();
    Notification {
        subject: format!("JUMP Job Scraping Report - {} jobs found", count),
        body: format!(
            "Finished scraping.\n\nFound {} jobs. See the report file '{}' for details.",
            count, output
        ),
    }
}

/// Mail transport for notifications
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Sends notifications through an SMTP relay using STARTTLS
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    sender: String,
    recipient: String,
    smtp_server: String,
    smtp_port: u16,
    sender_password: String,
}

impl SmtpMailer {
    pub fn from_config(config: &EmailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            smtp_server: config.smtp_server.clone(),
            smtp_port: config.smtp_port,
            sender_password: config.sender_password.clone(),
        }
    }

    /// Builds the plain-text UTF-8 message for a notification
    pub fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        let message = Message::builder()
            .from(self.sender.parse()?)
            .to(self.recipient.parse()?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())?;
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = self.build_message(notification)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_server)?
            .port(self.smtp_port)
            .credentials(Credentials::new(
                self.sender.clone(),
                self.sender_password.clone(),
            ))
            .build();

        transport.send(message).await?;
        tracing::info!("Email notification sent to {}", self.recipient);
        Ok(())
    }
}

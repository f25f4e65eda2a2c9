//! Console mail transport for development

use async_trait::async_trait;
use yatra_core::{Attachment, Mailer, MailerError};

/// [`Mailer`] that prints instead of sending
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), MailerError> {
        println!();
        println!("========================================");
        println!("  MAIL FOR: {}", to);
        println!("  SUBJECT: {}", subject);
        println!("----------------------------------------");
        println!("{}", body);
        if let Some(att) = &attachment {
            println!("----------------------------------------");
            println!("  ATTACHMENT: {} ({} bytes)", att.filename, att.data.len());
        }
        println!("========================================");
        println!();

        tracing::info!(to = %to, subject = %subject, "console mailer: mail printed, not sent");
        Ok(())
    }
}

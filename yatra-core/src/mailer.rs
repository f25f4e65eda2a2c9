use async_trait::async_trait;

/// A named binary attachment for outgoing mail (e.g. a ticket QR image)
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),
}

/// Mail transport collaborator.
///
/// The engine only composes subject/body text and treats delivery as
/// external; implementations live in `yatra-notify`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), MailerError>;
}

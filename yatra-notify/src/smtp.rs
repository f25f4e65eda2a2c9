//! SMTP mail transport for production

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MailAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use yatra_core::{Attachment, Mailer, MailerError};

/// Configuration for SMTP delivery
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    /// 465 for TLS, as the demo deployment uses
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: Option<String>,
}

/// [`Mailer`] backed by a relay SMTP connection
pub struct SmtpMailer {
    transport: SmtpTransport,
    from_email: String,
    from_name: Option<String>,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(config.username, config.password);

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|err| MailerError::Transport(format!("Failed to create SMTP transport: {err}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        tracing::info!(host = %config.host, port = config.port, "SMTP mailer configured");

        Ok(Self {
            transport,
            from_email: config.from_email,
            from_name: config.from_name,
        })
    }

    fn from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), MailerError> {
        let from: Mailbox = self
            .from_address()
            .parse()
            .map_err(|err| MailerError::InvalidAddress(format!("from: {err}")))?;
        let to_addr: Mailbox = to
            .parse()
            .map_err(|err| MailerError::InvalidAddress(format!("to: {err}")))?;

        let builder = Message::builder().from(from).to(to_addr).subject(subject);

        let email = match attachment {
            Some(att) => {
                let content_type = ContentType::parse(&att.content_type).map_err(|err| {
                    MailerError::Transport(format!("Bad attachment content type: {err}"))
                })?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body.to_string()))
                        .singlepart(MailAttachment::new(att.filename).body(att.data, content_type)),
                )
            }
            None => builder.header(ContentType::TEXT_PLAIN).body(body.to_string()),
        }
        .map_err(|err| MailerError::Transport(format!("Failed to build email: {err}")))?;

        self.transport
            .send(&email)
            .map_err(|err| MailerError::Transport(format!("Failed to send email: {err}")))?;

        tracing::info!(to = %to, subject = %subject, "email sent");
        Ok(())
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::codes;
use crate::mailer::{Mailer, MailerError};

/// Codes stop verifying this long after issue
pub const OTP_EXPIRY_MINUTES: i64 = 5;

const OTP_MAIL_SUBJECT: &str = "Your OTP for Railway Booking";

#[derive(Debug, Clone)]
struct OtpRecord {
    code: String,
    expires_at: DateTime<Utc>,
}

/// Issues and verifies single-use login/registration codes.
///
/// Records are expired lazily at verification time; there is no background
/// sweep. `sweep_expired` exists for memory hygiene in long-running
/// processes.
pub struct OtpAuthenticator {
    pending: HashMap<String, OtpRecord>,
}

impl OtpAuthenticator {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Generate a fresh code for `email`, dispatch it, and store it with a
    /// 5-minute expiry, replacing any previously pending code.
    ///
    /// The record is only committed once dispatch succeeds, so a transport
    /// failure never leaves behind a code nobody received.
    pub async fn issue(&mut self, email: &str, mailer: &dyn Mailer) -> Result<(), OtpError> {
        let code = codes::new_otp();
        mailer
            .send(email, OTP_MAIL_SUBJECT, &otp_mail_body(&code), None)
            .await?;

        tracing::info!(email = %email, "OTP issued");
        self.pending.insert(
            email.to_string(),
            OtpRecord {
                code,
                expires_at: Utc::now() + Duration::minutes(OTP_EXPIRY_MINUTES),
            },
        );
        Ok(())
    }

    /// Check a submitted code.
    ///
    /// Expired records are deleted on detection. A mismatched code leaves
    /// the record in place for another attempt; a successful match consumes
    /// it, so a code can never verify twice.
    pub fn verify(&mut self, email: &str, code: &str) -> bool {
        let Some(record) = self.pending.get(email) else {
            return false;
        };
        if record.expires_at < Utc::now() {
            self.pending.remove(email);
            return false;
        }
        if record.code != code {
            return false;
        }
        self.pending.remove(email);
        true
    }

    /// Drop every expired record, returning how many were removed
    pub fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.pending.len();
        self.pending.retain(|_, record| record.expires_at >= now);
        before - self.pending.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    fn backdate(&mut self, email: &str) {
        if let Some(record) = self.pending.get_mut(email) {
            record.expires_at = Utc::now() - Duration::minutes(1);
        }
    }

    #[cfg(test)]
    fn pending_code(&self, email: &str) -> Option<String> {
        self.pending.get(email).map(|record| record.code.clone())
    }
}

impl Default for OtpAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

fn otp_mail_body(code: &str) -> String {
    format!(
        "Indian Railway Booking System\n\n\
         Your One Time Password (OTP) is: {code}\n\
         This code is valid for {OTP_EXPIRY_MINUTES} minutes.\n\n\
         If you did not request this, please ignore this email."
    )
}

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("OTP delivery failed: {0}")]
    DeliveryFailed(#[from] MailerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::Attachment;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(
            &self,
            to: &str,
            _subject: &str,
            body: &str,
            _attachment: Option<Attachment>,
        ) -> Result<(), MailerError> {
            self.sent.lock().unwrap().push((to.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(
            &self,
            _to: &str,
            _subject: &str,
            _body: &str,
            _attachment: Option<Attachment>,
        ) -> Result<(), MailerError> {
            Err(MailerError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_issue_and_verify() {
        let mut otp = OtpAuthenticator::new();
        let mailer = RecordingMailer::new();

        otp.issue("a@b.com", &mailer).await.unwrap();
        let code = otp.pending_code("a@b.com").unwrap();
        assert!(mailer.sent.lock().unwrap()[0].1.contains(&code));

        // Wrong code fails but the record survives
        let wrong = if code == "000000" { "000001" } else { "000000" };
        assert!(!otp.verify("a@b.com", wrong));
        assert!(otp.verify("a@b.com", &code));

        // Single use: the record was consumed
        assert!(!otp.verify("a@b.com", &code));
    }

    #[tokio::test]
    async fn test_reissue_invalidates_prior_code() {
        let mut otp = OtpAuthenticator::new();
        let mailer = RecordingMailer::new();

        otp.issue("a@b.com", &mailer).await.unwrap();
        let first = otp.pending_code("a@b.com").unwrap();
        otp.issue("a@b.com", &mailer).await.unwrap();
        let second = otp.pending_code("a@b.com").unwrap();

        if first != second {
            assert!(!otp.verify("a@b.com", &first));
        }
        assert!(otp.verify("a@b.com", &second));
    }

    #[tokio::test]
    async fn test_expired_code_rejected_and_deleted() {
        let mut otp = OtpAuthenticator::new();
        let mailer = RecordingMailer::new();

        otp.issue("a@b.com", &mailer).await.unwrap();
        let code = otp.pending_code("a@b.com").unwrap();
        otp.backdate("a@b.com");

        assert!(!otp.verify("a@b.com", &code));
        assert_eq!(otp.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_commits_nothing() {
        let mut otp = OtpAuthenticator::new();

        let err = otp.issue("a@b.com", &FailingMailer).await.unwrap_err();
        assert!(matches!(err, OtpError::DeliveryFailed(_)));
        assert_eq!(otp.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let mut otp = OtpAuthenticator::new();
        let mailer = RecordingMailer::new();

        otp.issue("a@b.com", &mailer).await.unwrap();
        otp.issue("c@d.com", &mailer).await.unwrap();
        otp.backdate("a@b.com");

        assert_eq!(otp.sweep_expired(), 1);
        assert_eq!(otp.pending_count(), 1);
    }
}

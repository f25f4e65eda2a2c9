pub mod codes;
pub mod crypto;
pub mod identity;
pub mod mailer;
pub mod otp;

pub use identity::{Account, AccountStore, IdentityError};
pub use mailer::{Attachment, Mailer, MailerError};
pub use otp::{OtpAuthenticator, OtpError};

//! Outbound notification: mail transports and QR encoding seams

pub mod console;
pub mod messages;
pub mod qr;
pub mod smtp;

pub use console::ConsoleMailer;
pub use qr::QrEncoder;
pub use smtp::{SmtpConfig, SmtpMailer};

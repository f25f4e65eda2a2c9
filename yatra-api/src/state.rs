use std::sync::Arc;

use tokio::sync::Mutex;
use yatra_core::{Mailer, OtpAuthenticator};
use yatra_ledger::BookingService;
use yatra_notify::QrEncoder;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
    pub otp: Arc<Mutex<OtpAuthenticator>>,
    pub mailer: Arc<dyn Mailer>,
    /// When absent, ticket mail goes out without a QR attachment
    pub qr: Option<Arc<dyn QrEncoder>>,
    pub auth: AuthConfig,
}

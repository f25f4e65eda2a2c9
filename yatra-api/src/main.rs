use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yatra_api::{
    app,
    state::{AppState, AuthConfig},
};
use yatra_catalog::{seed, SeatInventory};
use yatra_core::{Mailer, OtpAuthenticator};
use yatra_ledger::BookingService;
use yatra_notify::{ConsoleMailer, SmtpConfig, SmtpMailer};
use yatra_store::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yatra_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = yatra_store::app_config::Config::load()?;
    tracing::info!("Starting Yatra API on port {}", config.server.port);

    let store = Arc::new(JsonFileStore::new(&config.storage.data_dir));
    let service = BookingService::load(SeatInventory::from_trains(seed::trains()), store).await?;

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(SmtpConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from_email: smtp.from_email.clone(),
            from_name: smtp.from_name.clone(),
        })?),
        None => {
            tracing::warn!("No SMTP settings configured; OTP and ticket mail go to the console");
            Arc::new(ConsoleMailer::new())
        }
    };

    let app_state = AppState {
        service: Arc::new(service),
        otp: Arc::new(Mutex::new(OtpAuthenticator::new())),
        mailer,
        qr: None,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use yatra_catalog::{TravelClass, UnknownClass};
use yatra_core::Attachment;
use yatra_ledger::models::{BookingRequest, PassengerDetails, TicketUpdate};
use yatra_ledger::{payload, Ticket};
use yatra_notify::messages;

use crate::{auth::decode_bearer, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct BookTicketRequest {
    name: String,
    age: u8,
    mobile: String,
    #[serde(default = "default_nationality")]
    nationality: String,
    #[serde(default)]
    address: String,
    from_station: String,
    to_station: String,
    journey_date: NaiveDate,
    train_no: String,
    travel_class: String,
}

fn default_nationality() -> String {
    "Indian".to_string()
}

#[derive(Debug, Deserialize)]
struct EditBookingRequest {
    name: String,
    age: u8,
    nationality: String,
    address: String,
    journey_date: NaiveDate,
    travel_class: String,
}

#[derive(Debug, Serialize)]
struct TicketResponse {
    ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
struct CancelResponse {
    ticket: Ticket,
    refund: u32,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: usize,
}

#[derive(Debug, Serialize)]
struct TrackResponse {
    ticket: Ticket,
    /// Canonical text block, the same content a ticket QR code carries
    payload: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/bookings",
            post(book_ticket).get(list_bookings).delete(clear_bookings),
        )
        .route("/v1/bookings/{pnr}", put(edit_booking))
        .route("/v1/bookings/{pnr}/cancel", post(cancel_booking))
        .route("/v1/pnr/{pnr}", get(track_pnr))
}

async fn book_ticket(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<BookTicketRequest>,
) -> Result<Json<TicketResponse>, AppError> {
    let claims = decode_bearer(&state, bearer.token())?;
    let class = parse_class(&req.travel_class)?;

    let request = BookingRequest {
        passenger: PassengerDetails {
            name: req.name,
            age: req.age,
            mobile: req.mobile,
            nationality: req.nationality,
            address: req.address,
            from: req.from_station,
            to: req.to_station,
        },
        train_no: req.train_no,
        class,
        journey_date: req.journey_date,
    };

    let ticket = state
        .service
        .book(&claims.sub, &request, Local::now().date_naive())
        .await?;

    // delivery problems after the booking is persisted are a warning, not a failure
    let warning = send_ticket_mail(&state, &ticket).await;

    Ok(Json(TicketResponse { ticket, warning }))
}

async fn list_bookings(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<Ticket>>, AppError> {
    let claims = decode_bearer(&state, bearer.token())?;
    Ok(Json(state.service.list_for_account(&claims.sub).await?))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<CancelResponse>, AppError> {
    let claims = decode_bearer(&state, bearer.token())?;
    let receipt = state.service.cancel(&pnr, &claims.sub).await?;

    Ok(Json(CancelResponse {
        ticket: receipt.ticket,
        refund: receipt.refund,
    }))
}

async fn edit_booking(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    Json(req): Json<EditBookingRequest>,
) -> Result<Json<TicketResponse>, AppError> {
    let claims = decode_bearer(&state, bearer.token())?;
    let class = parse_class(&req.travel_class)?;

    let update = TicketUpdate {
        name: req.name,
        age: req.age,
        nationality: req.nationality,
        address: req.address,
        class,
        journey_date: req.journey_date,
    };

    let ticket = state
        .service
        .edit(&pnr, &claims.sub, &update, Local::now().date_naive())
        .await?;

    Ok(Json(TicketResponse { ticket, warning: None }))
}

async fn clear_bookings(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ClearResponse>, AppError> {
    let claims = decode_bearer(&state, bearer.token())?;
    let cleared = state.service.clear_all(&claims.sub).await?;

    Ok(Json(ClearResponse { cleared }))
}

/// Public PNR status check; deliberately unauthenticated
async fn track_pnr(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<TrackResponse>, AppError> {
    let ticket = state.service.track_by_pnr(&pnr).await?;
    let payload = payload::display_payload(&ticket);

    Ok(Json(TrackResponse { ticket, payload }))
}

fn parse_class(code: &str) -> Result<TravelClass, AppError> {
    code.parse()
        .map_err(|err: UnknownClass| AppError::ValidationError(err.to_string()))
}

async fn send_ticket_mail(state: &AppState, ticket: &Ticket) -> Option<String> {
    let text = payload::display_payload(ticket);
    let attachment = state.qr.as_ref().and_then(|encoder| match encoder.encode(&text) {
        Ok(data) => Some(Attachment {
            filename: "ticket_qr.png".to_string(),
            content_type: "image/png".to_string(),
            data,
        }),
        Err(err) => {
            tracing::warn!(pnr = %ticket.pnr, error = %err, "QR encoding failed, sending mail without attachment");
            None
        }
    });

    match state
        .mailer
        .send(
            &ticket.user,
            messages::TICKET_MAIL_SUBJECT,
            &messages::ticket_mail_body(ticket),
            attachment,
        )
        .await
    {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(pnr = %ticket.pnr, error = %err, "ticket mail delivery failed");
            Some("Ticket booked successfully, but we could not email the ticket copy.".to_string())
        }
    }
}

//! Ticket e-mail composition

use yatra_ledger::payload;
use yatra_ledger::Ticket;

pub const TICKET_MAIL_SUBJECT: &str = "Your Railway E-Ticket";

/// Body of the post-booking confirmation mail.
///
/// Wraps the canonical ticket payload so mail, QR code, and tracking views
/// all present the same field block.
pub fn ticket_mail_body(ticket: &Ticket) -> String {
    format!(
        "Thank you for booking with Indian Railway Booking System.\n\n\
         Your ticket details are below:\n\n\
         {}\n\n\
         Scan the attached QR code at the station for quick access to your ticket.\n\n\
         Have a safe journey!",
        payload::display_payload(ticket)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yatra_ledger::models::TicketStatus;

    #[test]
    fn test_body_embeds_payload() {
        let ticket = Ticket {
            pnr: "1234567890123".to_string(),
            user: "a@b.com".to_string(),
            name: "Asha Verma".to_string(),
            from: "Delhi".to_string(),
            to: "Mumbai".to_string(),
            mobile: "9876543210".to_string(),
            age: 34,
            nationality: "Indian".to_string(),
            address: "14 MG Road".to_string(),
            journey_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            train_name: "Express A".to_string(),
            train_no: "T101".to_string(),
            class: "SL".parse().unwrap(),
            fare: 600,
            departure: "09:00".to_string(),
            arrival: "18:00".to_string(),
            booking_time: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            status: TicketStatus::Confirmed,
        };

        let body = ticket_mail_body(&ticket);
        assert!(body.contains("PNR: 1234567890123"));
        assert!(body.contains("Have a safe journey!"));
    }
}

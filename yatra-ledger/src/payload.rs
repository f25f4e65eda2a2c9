use crate::models::Ticket;

/// Render the canonical text block for a ticket.
///
/// This is the payload embedded in the ticket QR code and the e-mail body,
/// so the field order is fixed and the output must stay byte-identical for
/// identical ticket fields.
pub fn display_payload(ticket: &Ticket) -> String {
    format!(
        "PNR: {pnr}\n\
         Name: {name}\n\
         Train: {train} ({train_no})\n\
         From: {from} to {to}\n\
         Class: {class}\n\
         Fare: Rs.{fare}\n\
         Journey Date: {journey_date}\n\
         Status: {status}",
        pnr = ticket.pnr,
        name = ticket.name,
        train = ticket.train_name,
        train_no = ticket.train_no,
        from = ticket.from,
        to = ticket.to,
        class = ticket.class,
        fare = ticket.fare,
        journey_date = ticket.journey_date.format("%d-%m-%Y"),
        status = ticket.status,
    )
}

//! QR encoding seam.
//!
//! The engine only produces the ticket payload text; turning it into an
//! image is an external collaborator's job. Deployments wire an encoder in
//! through this trait; without one, tickets simply go out without a QR
//! attachment.

#[derive(Debug, thiserror::Error)]
#[error("QR encoding failed: {0}")]
pub struct QrError(pub String);

/// Encode a ticket payload into an opaque image blob (e.g. PNG bytes)
pub trait QrEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u8>, QrError>;
}

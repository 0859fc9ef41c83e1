use thiserror::Error;

/// Failures talking to the generative AI backend. Never shown to shoppers; the
/// concierge swaps them for a canned reply.
#[derive(Debug, Error)]
pub enum ConciergeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Response contained no usable content")]
    EmptyResponse,
}

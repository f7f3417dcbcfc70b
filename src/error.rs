//! Error types.

use crate::query::RecordKind;

/// Error enumerates the failure states of the update pipeline.
///
/// The request-path variants each map to a single HTTP status in the
/// [API layer][crate::api]; their `Display` output is what clients see
/// as the response body.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the `domain`, `token`, or `ip` query parameter is
    /// missing or blank after trimming.
    #[error("Empty domain, token, or IP value")]
    EmptyField,

    /// Returned when `type` is present but is neither `A` nor `AAAA`.
    #[error("Invalid type")]
    InvalidType,

    /// Returned when `ip` is not a valid literal for the requested
    /// record kind (dotted quad for `A`, IPv6 for `AAAA`).
    #[error("Invalid {} address", .0.address_family())]
    InvalidAddress(RecordKind),

    /// Returned when `domain` does not match the DNS-name grammar: two
    /// or more labels of `[A-Za-z0-9_-]`, no leading hyphen, no
    /// trailing dot.
    #[error("Invalid record name")]
    InvalidName,

    /// Returned when the presented security token does not match the
    /// configured one.
    #[error("Authentication failed")]
    AuthFailed,

    /// Returned when the provider has no record for the requested
    /// `(zone, type, name)` triple.
    #[error("Record not found")]
    RecordMissing,

    /// Returned when the record lookup could not be completed; the
    /// detail is the transport error or the unexpected provider status.
    #[error("{0}")]
    LookupFailed(String),

    /// Returned when the record edit could not be completed after a
    /// successful lookup.
    #[error("{0}")]
    EditFailed(String),

    /// Returned when the token bucket has no token for this request.
    #[error("Too Many Requests")]
    RateLimited {
        /// Seconds until a token would be available, rounded up.
        retry_after: u64,
    },

    /// Returned when startup configuration is unusable. Fatal.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Returned when an HTTP call to the provider fails at the
    /// transport level (connect, TLS, body decode).
    #[error("request error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

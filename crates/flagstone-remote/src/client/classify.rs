//! Classification of raw transport failures.

use flagstone_core::FlagError;

/// Turns a raw transport error into a classified [`FlagError`].
///
/// Only errors that have not been classified yet go through here. Anything
/// already expressed as a `FlagError` keeps its kind.
pub fn classify_transport_error(error: reqwest::Error) -> FlagError {
    let reason = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else if error.is_decode() {
        format!("undecodable response: {}", error)
    } else {
        error.to_string()
    };

    match error.status() {
        Some(status) => FlagError::remote_status(status.as_u16(), reason),
        None => FlagError::remote_unavailable(reason),
    }
}

//! Map request failures onto retry `ErrorKind`s.

use super::policy::ErrorKind;
use crate::error::{Error, RequestError};

pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Only request-level failures can be transient; a job that reported
/// `error`, a timeout, a cancellation or a malformed body never is.
pub fn classify(e: &Error) -> ErrorKind {
    match e {
        Error::Request(RequestError::Http { status, .. }) => classify_http_status(*status),
        Error::Request(RequestError::Transport(ce)) => classify_curl_error(ce),
        Error::Request(RequestError::Runtime(_))
        | Error::JobFailed { .. }
        | Error::PollTimeout { .. }
        | Error::Cancelled { .. }
        | Error::SubmitCancelled { .. }
        | Error::MalformedResponse(_) => ErrorKind::Other,
    }
}

//! One blocking HTTP exchange over libcurl.
//!
//! Runs in the current thread; the client calls it from `spawn_blocking`.

use std::time::Duration;

/// HTTP method used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Timeouts applied to each request. `None` leaves libcurl's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

/// Status code and body text of a completed exchange.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u32,
    pub text: String,
}

/// Performs the request. `json_body`, when present, is sent with
/// `Content-Type: application/json`. Non-2xx statuses are returned, not failed.
pub(crate) fn perform(
    method: Method,
    url: &str,
    json_body: Option<&[u8]>,
    opts: &TransportOptions,
) -> Result<RawResponse, curl::Error> {
    let mut buf: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    match (method, json_body) {
        (Method::Post, body) => {
            easy.post(true)?;
            let body = body.unwrap_or_default();
            easy.post_fields_copy(body)?;
            if json_body.is_some() {
                list.append("Content-Type: application/json")?;
            }
        }
        (Method::Get, _) => {
            easy.get(true)?;
        }
    }
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            buf.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(RawResponse {
        status,
        text: String::from_utf8_lossy(&buf).into_owned(),
    })
}

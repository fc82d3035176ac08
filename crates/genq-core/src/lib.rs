pub mod config;
pub mod logging;

// Protocol
pub mod api;
pub mod error;
pub mod identity;
pub mod job;
pub mod media;
pub mod models;

// Submit and poll
pub mod control;
pub mod flow;
pub mod poller;
pub mod retry;

// Front end
pub mod session;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, RequestError, Result};

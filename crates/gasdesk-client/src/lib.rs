//! # gasdesk-client
//!
//! Thin wrapper over the backend REST API. Every non-success response is
//! classified once, here, into the shared error taxonomy: no response at
//! all is a transport failure, 401/403 an authentication failure, 5xx a
//! server failure. Authenticated calls attach the session as a bearer
//! token and clear it when the API rejects it.

pub mod client;
pub mod endpoints;

pub use client::ApiClient;

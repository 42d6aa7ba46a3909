//! HTTP API client
//!
//! Thin JSON client for the authentication backend. Request
//! construction and TLS live here; flow sequencing lives in
//! [`crate::auth`].

mod client;

pub use client::ApiClient;

//! HTTP query backend.
//!
//! Implements `QueryBackend` over reqwest. Queries travel either as a JSON
//! `POST` body or as a percent-encoded path segment of a `GET`, depending on
//! the configured `Transport`. The same client also registers database
//! connections.

mod api;
mod client;
mod config;

pub use client::HttpBackend;
pub use config::HttpConfig;

//! API Client
//!
//! HTTP access to the Eventdash REST API.

pub mod client;

pub use client::*;

//! Eventdash Dashboard
//!
//! Team events and members dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Session-guarded dashboard with a sign-in page
//! - Event management with image upload
//! - Team member directory
//! - Animated particle background
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the Eventdash API over HTTP with a bearer token
//! kept in local storage.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

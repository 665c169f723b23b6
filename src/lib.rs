//! # Eventdash
//!
//! Team events dashboard - a full-stack Rust application where signed-in
//! members create, edit and delete events and browse the team roster.
//!
//! This crate is the backend the `eventdash-ui` dashboard talks to.
//!
//! ## Modules
//!
//! - [`store`]: SQLite persistence for events, members and sessions
//! - [`uploads`]: On-disk storage for event images
//! - [`auth`]: Bearer-token sessions
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eventdash::store::{parse_event_date, NewEvent, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Store::open("eventdash_data".as_ref())?;
//!
//!     store.add_member("Ada Lovelace", "ada@example.com", "owner").await?;
//!
//!     let date = parse_event_date("2024-11-02").ok_or("bad date")?;
//!     store
//!         .create_event(NewEvent::new("Hackathon", "48 hours of code", date), None)
//!         .await?;
//!
//!     println!("{} events", store.list_events().await?.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod store;
pub mod uploads;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState, AuthSession};

pub use auth::AuthConfig;

pub use store::{Event, Member, NewEvent, Session, Store, StoreError, StoreResult};

pub use uploads::{StoredUpload, UploadConfig, UploadError, UploadStore};

pub use config::{
    Config, ConfigError, LoadedConfig, LoggingConfig, StorageConfig as ConfigStorageConfig,
    ApiConfig as ConfigApiConfig, UploadsConfig, AuthConfig as ConfigAuthConfig,
};

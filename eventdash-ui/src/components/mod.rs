//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod events;
pub mod loading;
pub mod members;
pub mod nav;
pub mod particles;
pub mod toast;

pub use events::Events;
pub use loading::{FullPageSpinner, Loading};
pub use members::Members;
pub use nav::Nav;
pub use particles::ParticleBackground;
pub use toast::Toast;

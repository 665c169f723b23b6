//! State Management
//!
//! Global reactive state plus the pure state machines behind the panels.

pub mod events;
pub mod global;
pub mod session;

pub use events::{EventForm, EventRecord, EventsPanel};
pub use global::{provide_global_state, GlobalState};
pub use session::{guard, Guard, SessionStatus, SessionUser};

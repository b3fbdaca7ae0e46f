//! In-memory change-event bus.
//!
//! Lets decoupled parts of the application react to resource mutations
//! without direct references. Fire-and-forget: listeners are invoked
//! synchronously, with no ordering or delivery guarantees.

pub mod bus;
pub mod types;

pub use bus::{EventBus, SubscriptionId};
pub use types::{ChangeEvent, ChangeKind, EntityKind};

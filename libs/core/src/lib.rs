//! EmployMe messenger bot core contracts and value types.
//!
//! This crate exposes the wire shapes exchanged with the Messenger platform:
//! the inbound webhook callback model, the classifier that turns one decoded
//! messaging event into a typed [`Event`], and the outbound message tree
//! serialized into Send API calls.

pub mod classify;
pub mod events;
pub mod outbound;

pub use classify::*;
pub use events::*;
pub use outbound::*;

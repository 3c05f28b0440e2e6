//! Keyword routing and reply construction for the EmployMe messenger bot.
//!
//! [`respond`] is the main entry point: it takes a classified message or
//! postback and derives zero or more [`emo_core::OutboundMessage`] replies.
//! Routing is an ordered rule list over the case-folded text ([`router`]);
//! the payloads themselves come from the pure builders in [`builders`].
//! Company searches go through the [`CompanyLookup`] collaborator seam.

pub mod builders;
pub mod lookup;
pub mod respond;
pub mod router;

pub use lookup::{CompanyLookup, Employer, LookupError};

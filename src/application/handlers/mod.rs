//! Application handlers.
//!
//! Command handlers that drive the membership lifecycle through providers.

pub mod cancel_membership;
pub mod create_membership;

pub use cancel_membership::{
    CancelMembershipCommand, CancelMembershipHandler, CancelMembershipResult,
};
pub use create_membership::{
    CreateMembershipCommand, CreateMembershipHandler, CreateMembershipResult,
};

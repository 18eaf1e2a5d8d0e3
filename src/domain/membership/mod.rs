//! Membership domain module.
//!
//! Handles the membership lifecycle and the linkage between local membership
//! records and remote billing platforms.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `state` - MembershipState state machine
//! - `remote_ids` - Provider-scoped remote identifier map
//! - `events` - Lifecycle domain events

mod aggregate;
mod events;
mod remote_ids;
mod state;

pub use aggregate::Membership;
pub use events::MembershipEvent;
pub use remote_ids::RemoteIdentifierMap;
pub use state::MembershipState;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `google` - Google Play membership provider and billing client
//! - `memory` - In-memory repository and event bus for tests

pub mod google;
pub mod memory;

pub use google::{
    build_provider, GooglePlayBillingClient, GooglePlayProvider, MockBillingClient, RecordedCall,
    ServiceAccountAuthenticator, ServiceAccountKey,
};
pub use memory::{InMemoryEventBus, InMemoryMembershipRepository};

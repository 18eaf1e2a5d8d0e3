//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MembershipProvider` / `SupportsCancellation` - the lifecycle contract
//!   platform providers implement
//! - `BillingClient` - narrow operation set of a remote billing platform
//! - `MembershipRepository` - storage collaborator for membership records
//! - `EventPublisher` - transport for lifecycle domain events

mod billing_client;
mod event_publisher;
mod membership_provider;
mod membership_repository;

pub use billing_client::{
    BillingClient, BillingError, BillingErrorCode, CancelReason, PurchaseRecord,
};
pub use event_publisher::EventPublisher;
pub use membership_provider::{
    MembershipProvider, PluginValues, ProviderError, SupportsCancellation,
};
pub use membership_repository::MembershipRepository;

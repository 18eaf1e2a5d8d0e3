//! In-memory adapters for testing.
//!
//! Deterministic, lock-based implementations of the storage and event
//! publisher ports. Not intended for production use.

mod event_bus;
mod membership_repository;

pub use event_bus::InMemoryEventBus;
pub use membership_repository::InMemoryMembershipRepository;

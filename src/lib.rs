//! Membership Bridge - Membership Lifecycle Provider
//!
//! This crate binds locally-tracked membership records to remote billing
//! platforms. Platform-specific providers implement a shared lifecycle
//! contract; the workflow engine resolves the provider responsible for a
//! membership and delegates activation and cancellation to it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

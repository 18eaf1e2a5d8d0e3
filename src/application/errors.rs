//! Workflow engine error types.
//!
//! Errors surfaced by the engine-side membership operations. Provider
//! failures are wrapped, not re-classified: a retryable remote failure stays
//! retryable all the way to the caller.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId};
use crate::ports::ProviderError;

/// Errors from engine-side membership operations.
#[derive(Debug, Clone)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No provider is registered for the membership's workflow.
    ProviderNotFound(String),

    /// A provider for this workflow id is already registered.
    DuplicateProvider(&'static str),

    /// The responsible provider does not support cancellation.
    ///
    /// Detected by capability introspection before dispatch; the provider
    /// never sees the request.
    CancellationNotSupported(String),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// A provider operation failed. Carries the provider classification
    /// unmodified.
    Provider(ProviderError),

    /// Infrastructure error (storage, event transport).
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn provider_not_found(workflow: impl Into<String>) -> Self {
        MembershipError::ProviderNotFound(workflow.into())
    }

    pub fn cancellation_not_supported(workflow: impl Into<String>) -> Self {
        MembershipError::CancellationNotSupported(workflow.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) => ErrorCode::MembershipNotFound,
            MembershipError::ProviderNotFound(_) | MembershipError::DuplicateProvider(_) => {
                ErrorCode::ProviderNotFound
            }
            MembershipError::CancellationNotSupported(_) => ErrorCode::CapabilityNotSupported,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::Provider(err) => err.code(),
            MembershipError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::ProviderNotFound(workflow) => {
                format!("No provider registered for workflow '{}'", workflow)
            }
            MembershipError::DuplicateProvider(workflow) => {
                format!("A provider for workflow '{}' is already registered", workflow)
            }
            MembershipError::CancellationNotSupported(workflow) => {
                format!("Provider for workflow '{}' does not support cancellation", workflow)
            }
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::Provider(err) => err.message(),
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    ///
    /// Provider errors keep their own classification; a data-integrity
    /// failure never becomes retryable by passing through the engine.
    pub fn is_retryable(&self) -> bool {
        match self {
            MembershipError::Provider(err) => err.is_retryable(),
            MembershipError::Infrastructure(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ProviderError> for MembershipError {
    fn from(err: ProviderError) -> Self {
        MembershipError::Provider(err)
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        MembershipError::Infrastructure(err.to_string())
    }
}

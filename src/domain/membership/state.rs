//! Membership state machine.
//!
//! The workflow engine owns these states; providers never transition a
//! membership themselves. A cancellation stops renewal at the remote platform,
//! so `Cancelled` is not terminal - the record expires in a later transition.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    /// Membership is live; the remote subscription renews.
    Active,

    /// Cancellation confirmed remotely; entitlement runs out at period end.
    Cancelled,

    /// Membership ended. Terminal.
    Expired,
}

impl StateMachine for MembershipState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipState::*;
        matches!(
            (self, target),
            (Active, Cancelled) | (Active, Expired) | (Cancelled, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipState::*;
        match self {
            Active => vec![Cancelled, Expired],
            Cancelled => vec![Expired],
            Expired => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_can_be_cancelled() {
        assert!(MembershipState::Active.can_transition_to(&MembershipState::Cancelled));
    }

    #[test]
    fn active_can_expire() {
        assert!(MembershipState::Active.can_transition_to(&MembershipState::Expired));
    }

    #[test]
    fn cancelled_can_only_expire() {
        assert_eq!(
            MembershipState::Cancelled.valid_transitions(),
            vec![MembershipState::Expired]
        );
    }

    #[test]
    fn cancelled_cannot_be_cancelled_again() {
        assert!(!MembershipState::Cancelled.can_transition_to(&MembershipState::Cancelled));
    }

    #[test]
    fn expired_is_terminal() {
        assert!(MembershipState::Expired.is_terminal());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&MembershipState::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}

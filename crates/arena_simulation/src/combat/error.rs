//! Combat configuration errors.

use thiserror::Error;

/// Runtime rejection of an invalid combat configuration lookup.
///
/// Never propagated out of a system: callers log it and skip the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatConfigError {
    #[error("swing {swing} is out of range (combo has {max} swings)")]
    SwingOutOfRange { swing: u8, max: u8 },
}

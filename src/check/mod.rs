//! Remote validity checks for credential profiles.
//!
//! The orchestrator only depends on [`ValidityChecker`]; the STS-backed
//! implementation lives behind the `sts` feature so library consumers and
//! tests can supply their own.

#[cfg(feature = "sts")]
mod sts;

#[cfg(feature = "sts")]
pub use sts::{StsSettings, StsValidityChecker};

use async_trait::async_trait;

use crate::models::Validity;

/// Why a profile failed its validity check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The identity service rejected the credentials (HTTP 403).
    #[error("credentials were rejected by the identity service")]
    InvalidCredentials,

    /// Anything else: network failures, missing credentials, malformed
    /// responses, other status codes.
    #[error("{0}")]
    Unexpected(String),
}

impl CheckError {
    /// Classify an identity-service failure from its HTTP status, if one was
    /// received.
    pub fn from_status(status: Option<u16>, message: impl Into<String>) -> Self {
        match status {
            Some(403) => CheckError::InvalidCredentials,
            _ => CheckError::Unexpected(message.into()),
        }
    }
}

/// Confirms whether a named profile's credentials are currently accepted.
#[async_trait]
pub trait ValidityChecker: Send + Sync {
    /// Returns `Ok(())` when the identity service accepts the profile.
    async fn check(&self, profile_name: &str) -> Result<(), CheckError>;
}

/// Map a check result onto the per-run classification.
pub fn classify(result: &Result<(), CheckError>) -> Validity {
    match result {
        Ok(()) => Validity::Valid,
        Err(CheckError::InvalidCredentials) => Validity::InvalidCredentials,
        Err(CheckError::Unexpected(message)) => Validity::UnexpectedError(message.clone()),
    }
}

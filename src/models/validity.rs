use serde::Serialize;

/// Outcome of checking one profile against the identity service.
///
/// Only lives for the duration of a `check` or `clean` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Validity {
    Valid,
    InvalidCredentials,
    UnexpectedError(String),
}

impl Validity {
    /// Whether `clean` may delete the profile. Checks that merely failed to
    /// complete never qualify.
    pub fn is_deletion_eligible(&self) -> bool {
        matches!(self, Validity::InvalidCredentials)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// One named block of the shared credentials file.
///
/// Values are owned copies taken verbatim from the file; nothing refers back
/// into the source text once parsing has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile - {}", self.name)?;
        writeln!(f, "Access Key ID - {}", self.access_key_id)?;
        writeln!(f, "Secret Access Key - {}", self.secret_access_key)
    }
}

mod apply;
mod check;
mod clean;
mod list;
pub mod render;
mod script;
mod types;

use std::io;
use std::path::PathBuf;

use crate::storage::StoreError;

pub use apply::{apply_profile, run_session};
pub use check::{check_profiles, check_profiles_with};
pub use clean::clean_profiles;
pub use list::{find_profile, list_profiles};
pub use script::{write_profile_script, SCRIPT_FILE_NAME};
pub use types::{ApplySummary, CheckOutcome, CleanReport, Deletion, DeletionStatus};

/// Failures that abort a whole command.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("profile {0:?} not found in the credentials file")]
    UnknownProfile(String),

    #[error("failed to run {command:?}: {source}")]
    Shell {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write profile script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

use std::path::Path;

use tracing::{info, warn};

use crate::check::ValidityChecker;
use crate::models::Validity;
use crate::storage::{parse_profiles, remove_block, BlockLayout, StoreLayouts, StorePaths};

use super::check::check_profiles;
use super::{AppError, CleanReport, Deletion, DeletionStatus};

/// Remove every profile the identity service rejects from both store files.
///
/// All checks complete before any file is touched. Each deletion is
/// independent: a failure is recorded and the run moves on, so the two files
/// can end up disagreeing about a profile. Only a failure to parse the
/// credentials file aborts the run.
pub async fn clean_profiles(
    store: &StorePaths,
    layouts: &StoreLayouts,
    checker: &dyn ValidityChecker,
    dry_run: bool,
) -> Result<CleanReport, AppError> {
    let profiles = parse_profiles(&store.credentials_file)?;
    let outcomes = check_profiles(&profiles, checker).await;

    let mut report = CleanReport {
        dry_run,
        checked: outcomes.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        if outcome.validity.is_deletion_eligible() {
            report.invalid.push(outcome.profile);
        } else if matches!(outcome.validity, Validity::UnexpectedError(_)) {
            report.skipped.push(outcome);
        }
    }

    for name in &report.invalid {
        for (path, layout) in [
            (&store.credentials_file, &layouts.credentials),
            (&store.config_file, &layouts.config),
        ] {
            report
                .deletions
                .push(delete_from(path, name, layout, dry_run));
        }
    }

    Ok(report)
}

fn delete_from(path: &Path, profile: &str, layout: &BlockLayout, dry_run: bool) -> Deletion {
    let status = if dry_run {
        DeletionStatus::Planned
    } else {
        match remove_block(path, profile, layout) {
            Ok(blocks) => {
                info!(profile = %profile, path = %path.display(), blocks, "Removed profile");
                DeletionStatus::Removed { blocks }
            }
            Err(err) => {
                warn!(profile = %profile, error = %err, "Failed to remove profile");
                DeletionStatus::Failed {
                    error: err.to_string(),
                }
            }
        }
    };

    Deletion {
        profile: profile.to_string(),
        file: path.to_path_buf(),
        status,
    }
}

//! Plain-text rendering for command results.

use std::fmt::Write;

use crate::models::{Profile, Validity};

use super::{CheckOutcome, CleanReport, Deletion, DeletionStatus};

const DELIMITER: &str = "--------------------------------------------------------------";
const SUCCESS_MARK: char = '\u{2705}';
const FAILURE_MARK: char = '\u{274C}';

/// Each profile followed by a delimiter line.
pub fn profiles_text(profiles: &[Profile]) -> String {
    let mut out = String::new();
    for profile in profiles {
        out.push_str(&profile.to_string());
        out.push_str(DELIMITER);
        out.push('\n');
    }
    out
}

pub fn check_line(outcome: &CheckOutcome) -> String {
    match &outcome.validity {
        Validity::Valid => format!("Profile \"{}\" {SUCCESS_MARK}", outcome.profile),
        Validity::InvalidCredentials => format!(
            "Profile \"{}\" has invalid credentials {FAILURE_MARK}",
            outcome.profile
        ),
        Validity::UnexpectedError(message) => {
            format!("An unexpected error occurred: {message}")
        }
    }
}

fn deletion_line(deletion: &Deletion) -> String {
    let file = deletion.file.display();
    match &deletion.status {
        DeletionStatus::Removed { blocks: 0 } => {
            format!("Profile \"{}\" not present in {file}", deletion.profile)
        }
        DeletionStatus::Removed { .. } => {
            format!("Removed profile \"{}\" from {file} {SUCCESS_MARK}", deletion.profile)
        }
        DeletionStatus::Planned => {
            format!("Would remove profile \"{}\" from {file}", deletion.profile)
        }
        DeletionStatus::Failed { error } => format!(
            "Failed to remove profile \"{}\" from {file}: {error} {FAILURE_MARK}",
            deletion.profile
        ),
    }
}

pub fn clean_text(report: &CleanReport) -> String {
    let mut out = String::new();

    for outcome in &report.skipped {
        if let Validity::UnexpectedError(message) = &outcome.validity {
            let _ = writeln!(out, "Skipped profile \"{}\": {message}", outcome.profile);
        }
    }
    if report.invalid.is_empty() {
        let _ = writeln!(
            out,
            "No invalid profiles found ({} checked)",
            report.checked
        );
    }
    for deletion in &report.deletions {
        out.push_str(&deletion_line(deletion));
        out.push('\n');
    }

    out
}

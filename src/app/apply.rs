use std::io::BufRead;
use std::process::Command;

use tracing::{debug, warn};

use crate::config::ApplySettings;
use crate::storage::StorePaths;

use super::list::find_profile;
use super::{AppError, ApplySummary};

/// Run commands read from `input` under `profile_name`.
///
/// The profile must exist in the credentials file. See [`run_session`].
pub fn apply_profile<R: BufRead>(
    store: &StorePaths,
    profile_name: &str,
    settings: &ApplySettings,
    input: R,
) -> Result<ApplySummary, AppError> {
    let profile = find_profile(store, profile_name)?;
    run_session(&profile.name, settings, input)
}

/// Execute each input line with `<shell> -c <line>`, with the profile
/// variable set on the child only. Output goes straight to the inherited
/// stdout/stderr.
///
/// Blank lines are skipped and `exit` or `quit` ends the session. A command
/// exiting non-zero is counted and the session continues; failing to start
/// the shell at all aborts it.
pub fn run_session<R: BufRead>(
    profile_name: &str,
    settings: &ApplySettings,
    input: R,
) -> Result<ApplySummary, AppError> {
    let mut summary = ApplySummary::default();

    for line in input.lines() {
        let line = line.map_err(|source| AppError::Shell {
            command: "<stdin>".to_string(),
            source,
        })?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "exit" || command == "quit" {
            break;
        }

        debug!(profile = %profile_name, command, "Running command");
        let status = Command::new(&settings.shell)
            .arg("-c")
            .arg(command)
            .env(&settings.profile_env_var, profile_name)
            .status()
            .map_err(|source| AppError::Shell {
                command: command.to_string(),
                source,
            })?;

        summary.commands += 1;
        if !status.success() {
            warn!(command, %status, "Command failed");
            summary.failed += 1;
        }
    }

    Ok(summary)
}

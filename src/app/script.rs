use std::fs;
use std::path::{Path, PathBuf};

use super::AppError;

pub const SCRIPT_FILE_NAME: &str = "set_aws_profile.sh";

/// Write a script that exports `AWS_PROFILE` when sourced.
///
/// A child process can't change its parent shell's environment, so the user
/// has to `source` the returned path themselves.
pub fn write_profile_script(profile_name: &str, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(SCRIPT_FILE_NAME);
    let script = format!("#!/bin/sh\nexport AWS_PROFILE={profile_name}\n");
    let to_error = |source| AppError::Script {
        path: path.clone(),
        source,
    };

    fs::write(&path, script).map_err(to_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).map_err(to_error)?;
    }

    Ok(path)
}

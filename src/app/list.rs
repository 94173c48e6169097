use crate::models::Profile;
use crate::storage::{parse_profiles, StorePaths};

use super::AppError;

/// Every complete profile in the credentials file, in file order.
pub fn list_profiles(store: &StorePaths) -> Result<Vec<Profile>, AppError> {
    Ok(parse_profiles(&store.credentials_file)?)
}

/// Look up one profile by exact name.
pub fn find_profile(store: &StorePaths, name: &str) -> Result<Profile, AppError> {
    list_profiles(store)?
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| AppError::UnknownProfile(name.to_string()))
}
